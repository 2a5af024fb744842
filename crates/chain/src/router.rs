//! Exact-input swap calldata for the V3-style router.

use crate::abi::{CallData, SEL_EXACT_INPUT_SINGLE};
use crate::provider::TransactionRequest;
use dex_domain::FeeTier;
use primitive_types::{H160, U256};

/// Parameters of an `exactInputSingle` call. The price limit is always
/// zero (no limit); slippage protection comes from `amount_out_minimum`.
#[derive(Debug, Clone)]
pub struct ExactInputSingle {
    pub token_in: H160,
    pub token_out: H160,
    pub fee: FeeTier,
    pub recipient: H160,
    /// Unix timestamp after which the router reverts.
    pub deadline: u64,
    /// Input in base units.
    pub amount_in: U256,
    /// Integer minimum-output bound in base units.
    pub amount_out_minimum: U256,
}

/// Builds router transactions. Submission goes through the wallet seam so
/// this stays a pure calldata concern.
pub struct RouterClient {
    address: H160,
}

impl RouterClient {
    pub fn new(address: H160) -> Self {
        Self { address }
    }

    /// Encodes the swap. `value` must equal `amount_in` for native-input
    /// swaps and zero otherwise.
    pub fn exact_input_single(&self, params: &ExactInputSingle, value: U256) -> TransactionRequest {
        // The params tuple is fully static, so it encodes inline as eight
        // words after the selector.
        let data = CallData::new(SEL_EXACT_INPUT_SINGLE)
            .address(params.token_in)
            .address(params.token_out)
            .uint32(params.fee.bps())
            .address(params.recipient)
            .uint(U256::from(params.deadline))
            .uint(params.amount_in)
            .uint(params.amount_out_minimum)
            .uint(U256::zero()) // sqrtPriceLimitX96: no limit
            .build();

        TransactionRequest {
            to: self.address,
            data,
            value,
        }
    }
}
