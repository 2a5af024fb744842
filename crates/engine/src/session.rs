//! Swap session lifecycle.
//!
//! One session tracks one swap attempt from initiation to a terminal
//! state. Transitions are monotonic: a session never moves backwards, and
//! only `reset` (from a terminal state) returns it to `Idle`.

use dex_domain::SwapError;
use primitive_types::H256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Approving,
    Swapping,
    Success,
    Error,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Success | SessionStatus::Error)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, SessionStatus::Approving | SessionStatus::Swapping)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Approving => "approving",
            SessionStatus::Swapping => "swapping",
            SessionStatus::Success => "success",
            SessionStatus::Error => "error",
        };
        f.write_str(s)
    }
}

fn valid_transition(from: SessionStatus, to: SessionStatus) -> bool {
    use SessionStatus::*;
    matches!(
        (from, to),
        (Idle, Approving)
            | (Idle, Swapping)
            | (Approving, Swapping)
            | (Approving, Error)
            | (Swapping, Success)
            | (Swapping, Error)
    )
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    /// Set once the swap transaction is submitted; survives into both
    /// terminal states so timed-out swaps can still be looked up.
    pub tx_hash: Option<H256>,
    pub error: Option<String>,
}

/// Shared, lock-guarded session state. Cheap to clone; all clones observe
/// the same session.
#[derive(Debug, Clone, Default)]
pub struct SwapSession {
    state: Arc<RwLock<SessionSnapshot>>,
}

impl SwapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.clone()
    }

    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.status
    }

    pub async fn tx_hash(&self) -> Option<H256> {
        self.state.read().await.tx_hash
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Claims the session for a new swap. The check and the first
    /// transition happen under one write lock, so concurrent initiations
    /// cannot both pass: the loser gets `SessionBusy`.
    pub(crate) async fn begin(&self, first: SessionStatus) -> Result<(), SwapError> {
        debug_assert!(first.is_in_flight());
        let mut state = self.state.write().await;
        if state.status != SessionStatus::Idle {
            warn!(status = %state.status, "Swap rejected, session already active");
            return Err(SwapError::SessionBusy);
        }
        info!(from = %SessionStatus::Idle, to = %first, "Session transition");
        state.status = first;
        state.tx_hash = None;
        state.error = None;
        Ok(())
    }

    pub(crate) async fn transition(&self, to: SessionStatus) -> Result<(), SwapError> {
        let mut state = self.state.write().await;
        if !valid_transition(state.status, to) {
            warn!(from = %state.status, to = %to, "Invalid session transition");
            return Err(SwapError::SessionBusy);
        }
        info!(from = %state.status, to = %to, "Session transition");
        state.status = to;
        Ok(())
    }

    pub(crate) async fn record_tx_hash(&self, tx_hash: H256) {
        self.state.write().await.tx_hash = Some(tx_hash);
    }

    /// Moves an in-flight session to `Error`, keeping the transaction hash
    /// when the failure carries one (reverts and timeouts).
    pub(crate) async fn fail(&self, error: &SwapError) {
        let mut state = self.state.write().await;
        if !state.status.is_in_flight() {
            return;
        }
        info!(from = %state.status, error = %error, "Session failed");
        state.status = SessionStatus::Error;
        state.error = Some(error.to_string());
        if let Some(hash) = error.tx_hash() {
            state.tx_hash = Some(hash);
        }
    }

    pub(crate) async fn succeed(&self, tx_hash: H256) {
        let mut state = self.state.write().await;
        info!(tx_hash = %format_args!("{tx_hash:#x}"), "Session complete");
        state.status = SessionStatus::Success;
        state.tx_hash = Some(tx_hash);
        state.error = None;
    }

    /// Returns to `Idle`. Only legal from a terminal state (or when
    /// already idle, as a no-op); an in-flight session cannot be reset
    /// out from under its swap.
    pub async fn reset(&self) -> Result<(), SwapError> {
        let mut state = self.state.write().await;
        match state.status {
            SessionStatus::Idle => Ok(()),
            SessionStatus::Success | SessionStatus::Error => {
                info!(from = %state.status, "Session reset");
                *state = SessionSnapshot::default();
                Ok(())
            }
            _ => Err(SwapError::SessionBusy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_begin_claims_idle_session_only() {
        let session = SwapSession::new();
        session.begin(SessionStatus::Approving).await.unwrap();
        assert!(matches!(
            session.begin(SessionStatus::Approving).await,
            Err(SwapError::SessionBusy)
        ));
    }

    #[tokio::test]
    async fn test_full_lifecycle_and_reset() {
        let session = SwapSession::new();
        session.begin(SessionStatus::Approving).await.unwrap();
        session.transition(SessionStatus::Swapping).await.unwrap();
        session.succeed(H256::repeat_byte(0x11)).await;

        let snap = session.snapshot().await;
        assert_eq!(snap.status, SessionStatus::Success);
        assert_eq!(snap.tx_hash, Some(H256::repeat_byte(0x11)));
        assert!(snap.error.is_none());

        session.reset().await.unwrap();
        assert_eq!(session.status().await, SessionStatus::Idle);
        assert!(session.tx_hash().await.is_none());
    }

    #[tokio::test]
    async fn test_no_backwards_transitions() {
        let session = SwapSession::new();
        session.begin(SessionStatus::Swapping).await.unwrap();
        session.succeed(H256::zero()).await;
        // Terminal states only leave via reset.
        assert!(session.transition(SessionStatus::Swapping).await.is_err());
        assert!(session.transition(SessionStatus::Approving).await.is_err());
    }

    #[tokio::test]
    async fn test_reset_rejected_in_flight() {
        let session = SwapSession::new();
        session.begin(SessionStatus::Swapping).await.unwrap();
        assert!(matches!(session.reset().await, Err(SwapError::SessionBusy)));
    }

    #[tokio::test]
    async fn test_failure_keeps_tx_hash_from_error() {
        let session = SwapSession::new();
        session.begin(SessionStatus::Swapping).await.unwrap();
        let hash = H256::repeat_byte(0xab);
        session.fail(&SwapError::SwapTimedOut { tx_hash: hash }).await;

        let snap = session.snapshot().await;
        assert_eq!(snap.status, SessionStatus::Error);
        assert_eq!(snap.tx_hash, Some(hash));
        assert!(snap.error.unwrap().contains("timed out"));
    }
}
