use crate::error::SwapError;
use crate::value_objects::amount::Amount;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Slippage tolerance as a percentage (0.5 means 0.5%).
///
/// The minimum-output bound derived from it is computed in integer basis
/// points on base units; the percentage float never touches the value sent
/// to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlippageTolerance(f64);

impl SlippageTolerance {
    /// Accepts percentages in `(0, 50]`. Anything above half the trade is
    /// a configuration mistake, not a tolerance.
    pub fn new(percent: f64) -> Result<Self, SwapError> {
        if !percent.is_finite() || percent <= 0.0 || percent > 50.0 {
            return Err(SwapError::Validation(format!(
                "slippage must be in (0, 50], got {percent}"
            )));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Tolerance in basis points, the resolution used on chain.
    pub fn bps(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// `amountOutMinimum = expected * (10000 - bps) / 10000`, floor
    /// division on base units.
    pub fn minimum_out(&self, expected: Amount) -> Amount {
        let keep = U256::from(10_000u64 - u64::from(self.bps()));
        Amount::new(expected.raw * keep / U256::from(10_000u64), expected.decimals)
    }
}
