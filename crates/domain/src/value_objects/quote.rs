use crate::entities::token::Token;
use crate::error::SwapError;
use crate::value_objects::amount::Amount;
use crate::value_objects::slippage::SlippageTolerance;
use serde::{Deserialize, Serialize};

/// A price quote for a candidate trade.
///
/// The two variants share a shape but must never be confused: `Live` is
/// backed by real pool state, `Estimated` is a best-effort reference rate
/// produced when no pool or no DEX is available. Callers that need to know
/// which one they hold have to match on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Quote {
    /// Derived from an on-chain pool snapshot.
    Live {
        /// Expected output, truncated to the output token's display precision.
        amount_out: String,
        /// Exchange rate (output units per input unit).
        rate: f64,
        /// Heuristic price-impact percentage.
        price_impact_pct: f64,
    },
    /// Reference-rate estimate; no liquidity backs this number.
    Estimated {
        amount_out: String,
        rate: f64,
        price_impact_pct: f64,
        /// Set when the estimate exists because a chain read failed, as
        /// opposed to a chain that simply has no DEX or pool.
        degraded: bool,
    },
}

impl Quote {
    pub fn amount_out(&self) -> &str {
        match self {
            Quote::Live { amount_out, .. } | Quote::Estimated { amount_out, .. } => amount_out,
        }
    }

    pub fn rate(&self) -> f64 {
        match self {
            Quote::Live { rate, .. } | Quote::Estimated { rate, .. } => *rate,
        }
    }

    pub fn price_impact_pct(&self) -> f64 {
        match self {
            Quote::Live { price_impact_pct, .. } | Quote::Estimated { price_impact_pct, .. } => {
                *price_impact_pct
            }
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self, Quote::Estimated { .. })
    }

    /// Whether this quote was degraded by a read failure (retryable; the
    /// caller should surface a warning rather than trust the number).
    pub fn is_degraded(&self) -> bool {
        matches!(self, Quote::Estimated { degraded: true, .. })
    }
}

/// A fully specified swap order, validated before any chain interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequest {
    pub token_in: Token,
    pub token_out: Token,
    /// Human decimal string, e.g. "1.5".
    pub amount_in: String,
    /// e.g. 0.5 for 0.5%.
    pub slippage_percent: f64,
    /// Transaction deadline, minutes from submission.
    pub deadline_minutes: u64,
}

impl SwapRequest {
    /// Rejects same-token swaps, non-positive amounts, out-of-range
    /// slippage and zero deadlines. Returns the parsed input amount and
    /// tolerance so callers don't re-parse.
    pub fn validate(&self) -> Result<(Amount, SlippageTolerance), SwapError> {
        if self.token_in.same_asset(&self.token_out) || self.token_in.symbol == self.token_out.symbol
        {
            return Err(SwapError::Validation("cannot swap a token for itself".into()));
        }

        let amount_in = Amount::parse(&self.amount_in, self.token_in.decimals)?;
        if amount_in.is_zero() {
            return Err(SwapError::Validation("amount must be positive".into()));
        }

        let slippage = SlippageTolerance::new(self.slippage_percent)?;

        if self.deadline_minutes == 0 {
            return Err(SwapError::Validation("deadline must be positive".into()));
        }

        Ok((amount_in, slippage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::token::{Token, TokenAddress};

    fn native() -> Token {
        Token::native("0G", "0G Token", 18)
    }

    fn usdc() -> Token {
        Token::new(
            "0x1f3aa82227281ca364bfb3d253b0f1af1da6473e"
                .parse::<TokenAddress>()
                .unwrap(),
            "USDCe",
            "Bridged USDC",
            6,
        )
    }

    fn request(amount: &str) -> SwapRequest {
        SwapRequest {
            token_in: native(),
            token_out: usdc(),
            amount_in: amount.to_string(),
            slippage_percent: 0.5,
            deadline_minutes: 20,
        }
    }

    #[test]
    fn test_valid_request() {
        let (amount, slippage) = request("10").validate().unwrap();
        assert_eq!(amount.format_display(), "10");
        assert_eq!(slippage.bps(), 50);
    }

    #[test]
    fn test_rejects_same_token() {
        let mut req = request("10");
        req.token_out = native();
        assert!(matches!(req.validate(), Err(SwapError::Validation(_))));
    }

    #[test]
    fn test_rejects_zero_amount_and_deadline() {
        assert!(request("0").validate().is_err());
        assert!(request("").validate().is_err());

        let mut req = request("10");
        req.deadline_minutes = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_quote_variants_distinguishable() {
        let live = Quote::Live {
            amount_out: "15".into(),
            rate: 1.5,
            price_impact_pct: 0.02,
        };
        let estimated = Quote::Estimated {
            amount_out: "15".into(),
            rate: 1.5,
            price_impact_pct: 0.5,
            degraded: false,
        };
        assert!(!live.is_estimated());
        assert!(estimated.is_estimated());
        assert!(!estimated.is_degraded());
        assert_eq!(live.amount_out(), estimated.amount_out());
    }
}
