//! Idempotent, bounded token approvals.

use dex_chain::erc20::Erc20Client;
use dex_chain::provider::{ChainReader, WalletProvider};
use dex_domain::{SwapError, Token};
use primitive_types::{H160, U256};
use std::sync::Arc;
use tracing::{debug, info};

/// Ensures the router may spend exactly what a swap needs, and nothing
/// more. Unlimited approvals are never issued.
pub struct AllowanceManager {
    erc20: Erc20Client,
}

impl AllowanceManager {
    pub fn new(reader: Arc<dyn ChainReader>) -> Self {
        Self {
            erc20: Erc20Client::new(reader),
        }
    }

    /// Guarantees `spender` holds an allowance of at least `amount` base
    /// units for the wallet's tokens. Native input needs no approval;
    /// a sufficient existing allowance is left untouched (no transaction
    /// is sent); otherwise one approval for the exact amount is submitted
    /// and awaited.
    pub async fn ensure_approved(
        &self,
        wallet: &dyn WalletProvider,
        token: &Token,
        amount: U256,
        spender: H160,
    ) -> Result<(), SwapError> {
        let Some(contract) = token.address.contract() else {
            debug!(token = %token.symbol, "Native input, no approval needed");
            return Ok(());
        };

        let owner = wallet.address();
        let current = self
            .erc20
            .allowance(contract, owner, spender)
            .await
            .map_err(|e| SwapError::ApprovalFailed(format!("allowance read failed: {e}")))?;

        if current >= amount {
            debug!(
                token = %token.symbol,
                allowance = %current,
                required = %amount,
                "Existing allowance sufficient"
            );
            return Ok(());
        }

        info!(
            token = %token.symbol,
            spender = %spender,
            amount = %amount,
            "Requesting bounded approval"
        );
        self.erc20.approve(wallet, contract, spender, amount).await?;
        Ok(())
    }
}
