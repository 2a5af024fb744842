use crate::entities::token::Token;
use crate::enums::FeeTier;
use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};

/// A resolved on-chain pool for one (token pair, fee tier) triple.
///
/// `token0`/`token1` follow the factory's canonical address ordering, which
/// is unrelated to the caller's swap direction; use [`PoolReference::input_is_token0`]
/// to find out which side an input token occupies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolReference {
    pub address: H160,
    pub token0: Token,
    pub token1: Token,
    pub fee: FeeTier,
}

impl PoolReference {
    /// Whether the given resolved input address is the pool's token0.
    pub fn input_is_token0(&self, input: H160) -> bool {
        self.token0.address.contract() == Some(input)
    }
}

/// Point-in-time price snapshot read from a pool contract. Never mutated
/// locally; re-fetched for every quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    /// sqrt(token1/token0 price) in Q64.96 fixed point. Kept as a full
    /// 256-bit word until the final float conversion.
    pub sqrt_price_x96: U256,
    /// Current tick.
    pub tick: i32,
    /// In-range liquidity. Zero means the pool exists but is empty.
    pub liquidity: u128,
}

impl PoolState {
    /// Whether the pool has any in-range liquidity to price against.
    pub fn has_liquidity(&self) -> bool {
        self.liquidity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::token::Token;

    #[test]
    fn test_input_side_detection() {
        let w0g: H160 = "0x1cd0690ff9a693f5ef2dd976660a8dafc81a109c"
            .parse::<crate::TokenAddress>()
            .unwrap()
            .contract()
            .unwrap();
        let usdc: H160 = "0x1f3aa82227281ca364bfb3d253b0f1af1da6473e"
            .parse::<crate::TokenAddress>()
            .unwrap()
            .contract()
            .unwrap();

        let pool = PoolReference {
            address: H160::zero(),
            token0: Token::new(crate::TokenAddress::Contract(w0g), "W0G", "Wrapped 0G", 18),
            token1: Token::new(crate::TokenAddress::Contract(usdc), "USDCe", "Bridged USDC", 6),
            fee: FeeTier::Medium,
        };

        assert!(pool.input_is_token0(w0g));
        assert!(!pool.input_is_token0(usdc));
    }

    #[test]
    fn test_zero_liquidity_is_not_an_error() {
        let state = PoolState {
            sqrt_price_x96: U256::one() << 96,
            tick: 0,
            liquidity: 0,
        };
        assert!(!state.has_liquidity());
    }
}
