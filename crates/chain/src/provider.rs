//! Provider traits separating chain reads from wallet-signed writes.
//!
//! Reads go through [`ChainReader`], implemented over JSON-RPC in
//! [`crate::rpc`]. Writes require a signer and therefore go through
//! [`WalletProvider`], which an embedding application supplies from its
//! wallet-connection layer; this workspace only ships mock and demo
//! implementations.

use async_trait::async_trait;
use dex_domain::SwapError;
use primitive_types::{H160, H256, U256};

/// A read-only `eth_call`-style request.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub to: H160,
    pub data: Vec<u8>,
}

/// A state-changing transaction to be signed and broadcast by the wallet.
#[derive(Debug, Clone)]
pub struct TransactionRequest {
    pub to: H160,
    pub data: Vec<u8>,
    /// Native value attached to the call. Non-zero only for native-input
    /// swaps.
    pub value: U256,
}

/// Terminal status of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub tx_hash: H256,
    pub success: bool,
}

/// Read access to chain state. Cheap, re-entrant, safe to retry.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Executes a read-only contract call and returns the raw return data.
    async fn call(&self, request: CallRequest) -> Result<Vec<u8>, SwapError>;

    /// Native-currency balance of an account.
    async fn native_balance(&self, owner: H160) -> Result<U256, SwapError>;
}

/// Write access through a connected wallet.
///
/// `send_transaction` failing means nothing reached the mempool; a failure
/// from `wait_for_receipt` means the outcome is unknown and callers must
/// not blindly retry.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The connected account, used as swap recipient and approval owner.
    fn address(&self) -> H160;

    /// Signs and broadcasts a transaction, returning its hash.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<H256, SwapError>;

    /// Waits for the transaction to be mined. Long-running suspension
    /// point; may take tens of seconds.
    async fn wait_for_receipt(&self, tx_hash: H256) -> Result<TransactionReceipt, SwapError>;
}
