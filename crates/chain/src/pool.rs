//! Price oracle reads against a pool contract.

use crate::abi::{self, CallData, SEL_LIQUIDITY, SEL_SLOT0, SEL_TOKEN0};
use crate::provider::{CallRequest, ChainReader};
use dex_domain::{PoolState, SwapError};
use primitive_types::H160;
use std::sync::Arc;

/// Reads the instantaneous price state of one pool. Snapshots are never
/// cached: every quote re-fetches.
pub struct PoolClient {
    reader: Arc<dyn ChainReader>,
    address: H160,
}

impl PoolClient {
    pub fn new(reader: Arc<dyn ChainReader>, address: H160) -> Self {
        Self { reader, address }
    }

    async fn read(&self, selector: [u8; 4]) -> Result<Vec<u8>, SwapError> {
        self.reader
            .call(CallRequest {
                to: self.address,
                data: CallData::new(selector).build(),
            })
            .await
    }

    /// The pool's canonically first token.
    pub async fn token0(&self) -> Result<H160, SwapError> {
        let ret = self.read(SEL_TOKEN0).await?;
        abi::decode_address(&ret, 0)
    }

    /// Current in-range liquidity. Zero is a valid state, not an error.
    pub async fn liquidity(&self) -> Result<u128, SwapError> {
        let ret = self.read(SEL_LIQUIDITY).await?;
        Ok(abi::decode_u256(&ret, 0)?.low_u128())
    }

    /// Point-in-time snapshot: `slot0` price and tick plus liquidity.
    /// `sqrtPriceX96` is kept as a full word; downstream math is
    /// responsible for the one float conversion at the end.
    pub async fn state(&self) -> Result<PoolState, SwapError> {
        let slot0 = self.read(SEL_SLOT0).await?;
        let sqrt_price_x96 = abi::decode_u256(&slot0, 0)?;
        let tick = abi::decode_tick(&slot0, 1)?;
        let liquidity = self.liquidity().await?;

        Ok(PoolState {
            sqrt_price_x96,
            tick,
            liquidity,
        })
    }
}
