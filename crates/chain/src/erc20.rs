//! ERC-20 reads and the approval write.

use crate::abi::{self, CallData, SEL_ALLOWANCE, SEL_APPROVE, SEL_BALANCE_OF};
use crate::provider::{CallRequest, ChainReader, TransactionReceipt, TransactionRequest, WalletProvider};
use dex_domain::SwapError;
use primitive_types::{H160, U256};
use std::sync::Arc;
use tracing::{debug, info};

/// Client for the ERC-20 surface the swap pipeline needs: allowance and
/// balance reads, plus the bounded approval write.
pub struct Erc20Client {
    reader: Arc<dyn ChainReader>,
}

impl Erc20Client {
    pub fn new(reader: Arc<dyn ChainReader>) -> Self {
        Self { reader }
    }

    pub async fn allowance(
        &self,
        token: H160,
        owner: H160,
        spender: H160,
    ) -> Result<U256, SwapError> {
        let data = CallData::new(SEL_ALLOWANCE)
            .address(owner)
            .address(spender)
            .build();
        let ret = self.reader.call(CallRequest { to: token, data }).await?;
        abi::decode_u256(&ret, 0)
    }

    pub async fn balance_of(&self, token: H160, owner: H160) -> Result<U256, SwapError> {
        let data = CallData::new(SEL_BALANCE_OF).address(owner).build();
        let ret = self.reader.call(CallRequest { to: token, data }).await?;
        abi::decode_u256(&ret, 0)
    }

    /// Builds the `approve(spender, amount)` transaction. The amount is
    /// always the exact trade amount, never unlimited.
    pub fn approve_request(token: H160, spender: H160, amount: U256) -> TransactionRequest {
        TransactionRequest {
            to: token,
            data: CallData::new(SEL_APPROVE)
                .address(spender)
                .uint(amount)
                .build(),
            value: U256::zero(),
        }
    }

    /// Submits an approval and waits for it to be mined. All failure modes
    /// map into the approval branch of the error taxonomy so the session
    /// lands in `Error` with a human-readable reason, never stuck.
    pub async fn approve(
        &self,
        wallet: &dyn WalletProvider,
        token: H160,
        spender: H160,
        amount: U256,
    ) -> Result<TransactionReceipt, SwapError> {
        debug!(token = %token, spender = %spender, amount = %amount, "Submitting approval");

        let request = Self::approve_request(token, spender, amount);
        let tx_hash = wallet.send_transaction(request).await.map_err(|e| match e {
            SwapError::ApprovalRejected(_) => e,
            other => SwapError::ApprovalFailed(other.to_string()),
        })?;

        let receipt = wallet
            .wait_for_receipt(tx_hash)
            .await
            .map_err(|e| SwapError::ApprovalFailed(e.to_string()))?;

        if !receipt.success {
            return Err(SwapError::ApprovalFailed(format!(
                "approval transaction reverted (tx {tx_hash:#x})"
            )));
        }

        info!(token = %token, tx_hash = %format_args!("{tx_hash:#x}"), "Approval confirmed");
        Ok(receipt)
    }
}
