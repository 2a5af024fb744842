//! Rate derivation from a pool's Q64.96 sqrt price.
//!
//! price(token1 per token0) = (sqrtPriceX96 / 2^96)^2, adjusted by
//! 10^(token0Decimals - token1Decimals) to land in human units, and
//! inverted when the caller's input token is token1. This is the most
//! error-prone step of the whole pipeline; the tests below pin it to
//! known values.
//!
//! The result is a display/estimation rate only. Execution correctness is
//! enforced on chain through the integer minimum-output bound, never
//! through this float.

use primitive_types::U256;

/// Converts a full 256-bit word to `f64`, limb by limb. Used only at the
/// very end of the price derivation; `sqrtPriceX96` must stay `U256` up to
/// this point (a uint160 does not fit machine integers).
fn u256_to_f64(value: U256) -> f64 {
    value
        .0
        .iter()
        .enumerate()
        .map(|(i, limb)| (*limb as f64) * 2f64.powi(64 * i as i32))
        .sum()
}

/// Derives the human-unit exchange rate (output per input unit) from a
/// pool's sqrt price.
///
/// `token0_decimals`/`token1_decimals` are the pool's canonical sides, not
/// the caller's; `input_is_token0` selects the direction.
pub fn rate_from_sqrt_price(
    sqrt_price_x96: U256,
    token0_decimals: u8,
    token1_decimals: u8,
    input_is_token0: bool,
) -> f64 {
    let q96 = 2f64.powi(96);
    let sqrt_price = u256_to_f64(sqrt_price_x96) / q96;
    let price = sqrt_price * sqrt_price;

    let decimal_adjustment = 10f64.powi(i32::from(token0_decimals) - i32::from(token1_decimals));
    let adjusted = price * decimal_adjustment;

    if input_is_token0 { adjusted } else { 1.0 / adjusted }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q96() -> U256 {
        U256::one() << 96
    }

    #[test]
    fn test_unit_price_equal_decimals() {
        // sqrtPriceX96 = 2^96 encodes a 1:1 raw ratio.
        let rate = rate_from_sqrt_price(q96(), 18, 18, true);
        assert!((rate - 1.0).abs() < 1e-12);

        let inverse = rate_from_sqrt_price(q96(), 18, 18, false);
        assert!((inverse - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_decimal_adjustment() {
        // 18-decimal token0 vs 6-decimal token1 at a human 1:1 price:
        // the raw ratio is 10^-12, so sqrtPriceX96 = 2^96 / 10^6.
        let sqrt = q96() / U256::from(1_000_000u64);
        let rate = rate_from_sqrt_price(sqrt, 18, 6, true);
        assert!((rate - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_direction_inversion_is_reciprocal() {
        // Arbitrary off-unit price: sqrt raw ratio 1.2.
        let sqrt = q96() * U256::from(12u64) / U256::from(10u64);
        let forward = rate_from_sqrt_price(sqrt, 18, 18, true);
        let backward = rate_from_sqrt_price(sqrt, 18, 18, false);
        assert!((forward * backward - 1.0).abs() < 1e-9);
        assert!((forward - 1.44).abs() < 1e-9);
    }

    #[test]
    fn test_uint160_range_survives() {
        // A sqrt price well beyond u128 range must not truncate: price 2^80.
        let sqrt = q96() << 40;
        let rate = rate_from_sqrt_price(sqrt, 18, 18, true);
        assert!((rate - 2f64.powi(80)).abs() / 2f64.powi(80) < 1e-12);
    }

    #[test]
    fn test_rate_positive_for_nonzero_price() {
        let sqrt = q96() / U256::from(3u64);
        assert!(rate_from_sqrt_price(sqrt, 6, 18, true) > 0.0);
        assert!(rate_from_sqrt_price(sqrt, 6, 18, false) > 0.0);
    }
}
