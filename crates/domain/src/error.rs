//! Error taxonomy for the swap pipeline.
//!
//! Every chain-facing operation fails explicitly with one of these
//! variants; the only deliberate exception is the fallback-quote path,
//! which degrades into a tagged [`crate::Quote::Estimated`] instead of
//! erroring.

use primitive_types::H256;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    /// Bad input, rejected before any network call.
    #[error("invalid swap request: {0}")]
    Validation(String),

    /// The factory reported no pool for the pair and fee tier. Not fatal:
    /// the quote engine falls back to an estimated rate.
    #[error("no pool for {token_in}/{token_out} at {fee_bps} bps")]
    PoolNotFound {
        token_in: String,
        token_out: String,
        fee_bps: u32,
    },

    /// RPC failure reading chain state. Retryable; must never be folded
    /// into "no liquidity".
    #[error("network error: {0}")]
    Network(String),

    /// The chain has no DEX deployment and the requested operation needs one.
    #[error("no DEX deployment on chain {0}")]
    DexUnavailable(u64),

    /// The user declined the approval in their wallet.
    #[error("token approval rejected: {0}")]
    ApprovalRejected(String),

    /// The approval transaction reverted or could not be confirmed.
    #[error("token approval failed: {0}")]
    ApprovalFailed(String),

    /// The swap never reached the mempool. Safe to retry.
    #[error("swap submission failed: {0}")]
    SubmitFailed(String),

    /// The swap transaction was mined but reverted. The hash is retained
    /// so the user can inspect it.
    #[error("swap reverted on chain (tx {tx_hash:#x})")]
    SwapReverted { tx_hash: H256 },

    /// The swap was broadcast but confirmation never arrived. NOT safe to
    /// retry blindly; chain state must be queried first.
    #[error("timed out waiting for confirmation (tx {tx_hash:#x})")]
    SwapTimedOut { tx_hash: H256 },

    /// A swap session is already in flight on this surface.
    #[error("a swap is already in progress")]
    SessionBusy,
}

impl SwapError {
    /// The transaction hash attached to this error, if one was obtained
    /// before the failure.
    pub fn tx_hash(&self) -> Option<H256> {
        match self {
            SwapError::SwapReverted { tx_hash } | SwapError::SwapTimedOut { tx_hash } => {
                Some(*tx_hash)
            }
            _ => None,
        }
    }

    /// Whether retrying the same operation is safe without further checks.
    pub fn retry_safe(&self) -> bool {
        matches!(self, SwapError::Network(_) | SwapError::SubmitFailed(_))
    }
}
