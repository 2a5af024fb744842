//! Pool locator over the factory contract.

use crate::abi::{self, CallData, SEL_GET_POOL};
use crate::provider::{CallRequest, ChainReader};
use dex_domain::{FeeTier, SwapError};
use primitive_types::H160;
use std::sync::Arc;
use tracing::debug;

/// Looks up the deterministic pool address for an unordered token pair and
/// fee tier. Purely read-only; has no native-token awareness, so callers
/// must substitute the wrapped-native address beforehand.
pub struct FactoryClient {
    reader: Arc<dyn ChainReader>,
    address: H160,
}

impl FactoryClient {
    pub fn new(reader: Arc<dyn ChainReader>, address: H160) -> Self {
        Self { reader, address }
    }

    /// Returns the pool address, or `None` when the factory reports the
    /// zero address. "No pool exists" is distinct from an RPC failure,
    /// which surfaces as `SwapError::Network`.
    pub async fn get_pool(
        &self,
        token_a: H160,
        token_b: H160,
        fee: FeeTier,
    ) -> Result<Option<H160>, SwapError> {
        let data = CallData::new(SEL_GET_POOL)
            .address(token_a)
            .address(token_b)
            .uint32(fee.bps())
            .build();

        let ret = self
            .reader
            .call(CallRequest {
                to: self.address,
                data,
            })
            .await?;

        let pool = abi::decode_address(&ret, 0)?;
        if pool.is_zero() {
            debug!(
                token_a = %token_a,
                token_b = %token_b,
                fee_bps = fee.bps(),
                "No pool for pair"
            );
            return Ok(None);
        }

        debug!(pool = %pool, fee_bps = fee.bps(), "Pool resolved");
        Ok(Some(pool))
    }
}
