use crate::error::SwapError;
use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A token amount in base units, paired with the token's decimals.
///
/// All bounds passed to the chain (amountIn, amountOutMinimum, approval
/// amounts) are carried as `U256` base units; floating point only appears
/// in display rates, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    pub fn zero(decimals: u8) -> Self {
        Self::new(U256::zero(), decimals)
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Parses a human decimal string ("1.5", "0.000001") into base units.
    ///
    /// Fractional digits beyond the token's decimals are truncated, never
    /// rounded. Empty strings, signs and scientific notation are rejected.
    pub fn parse(input: &str, decimals: u8) -> Result<Self, SwapError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(SwapError::Validation("empty amount".into()));
        }
        if !s.chars().all(|c| c.is_ascii_digit() || c == '.') || s.matches('.').count() > 1 {
            return Err(SwapError::Validation(format!("invalid amount: {input}")));
        }

        let (integer, fraction) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if integer.is_empty() && fraction.is_empty() {
            return Err(SwapError::Validation(format!("invalid amount: {input}")));
        }

        let mut padded = String::with_capacity(integer.len() + decimals as usize);
        padded.push_str(if integer.is_empty() { "0" } else { integer });
        let mut frac: String = fraction.chars().take(decimals as usize).collect();
        while frac.len() < decimals as usize {
            frac.push('0');
        }
        padded.push_str(&frac);

        let raw = U256::from_dec_str(&padded)
            .map_err(|_| SwapError::Validation(format!("amount out of range: {input}")))?;
        Ok(Self::new(raw, decimals))
    }

    /// Converts an `f64` human amount into base units, truncating below the
    /// token's precision. Used only for estimated quotes where the rate is
    /// already a float.
    pub fn from_f64(value: f64, decimals: u8) -> Result<Self, SwapError> {
        if !value.is_finite() || value < 0.0 {
            return Err(SwapError::Validation(format!("invalid amount: {value}")));
        }
        let d = Decimal::from_f64(value)
            .ok_or_else(|| SwapError::Validation(format!("amount out of range: {value}")))?;
        Self::parse(&d.to_string(), decimals)
    }

    /// Formats the amount truncated to the given number of fractional
    /// digits, trimming trailing zeros. Exact string math on the base
    /// units; no floats involved.
    pub fn format(&self, display_decimals: u8) -> String {
        let digits = self.raw.to_string();
        let decimals = self.decimals as usize;

        let padded = if digits.len() <= decimals {
            format!("{:0>width$}", digits, width = decimals + 1)
        } else {
            digits
        };
        let split = padded.len() - decimals;
        let integer = &padded[..split];
        let fraction = &padded[split..];

        let truncated: &str = &fraction[..fraction.len().min(display_decimals as usize)];
        let trimmed = truncated.trim_end_matches('0');
        if trimmed.is_empty() {
            integer.to_string()
        } else {
            format!("{integer}.{trimmed}")
        }
    }

    /// Formats at the token's display precision (decimals capped at six).
    pub fn format_display(&self) -> String {
        self.format(self.decimals.min(6))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(self.decimals))
    }
}
