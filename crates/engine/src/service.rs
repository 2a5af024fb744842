//! The swap facade: quoting, approval, execution and session tracking
//! behind one surface.

use crate::allowance::AllowanceManager;
use crate::executor::{SwapExecutor, SwapOutcome};
use crate::quote::{QuoteEngine, QuoteRequest, QuoteSequencer};
use crate::session::{SessionStatus, SwapSession};
use dex_chain::provider::{ChainReader, WalletProvider};
use dex_chain::registry::ChainRegistry;
use dex_domain::{Quote, SwapError, SwapRequest};
use primitive_types::{H256, U256};
use std::sync::Arc;
use tracing::debug;

/// One service per chain surface. Owns the session, so at most one swap
/// is in flight at a time; quoting stays available throughout.
pub struct SwapService {
    registry: Arc<ChainRegistry>,
    quotes: QuoteEngine,
    allowance: AllowanceManager,
    executor: SwapExecutor,
    session: SwapSession,
    sequencer: QuoteSequencer,
}

impl SwapService {
    pub fn new(registry: Arc<ChainRegistry>, reader: Arc<dyn ChainReader>) -> Self {
        Self {
            quotes: QuoteEngine::new(registry.clone(), reader.clone()),
            allowance: AllowanceManager::new(reader),
            executor: SwapExecutor::new(registry.clone()),
            session: SwapSession::new(),
            sequencer: QuoteSequencer::new(),
            registry,
        }
    }

    pub fn session(&self) -> &SwapSession {
        &self.session
    }

    pub fn is_dex_available(&self, chain_id: u64) -> bool {
        self.registry.has_dex_support(chain_id)
    }

    /// Quotes with supersession: if a newer quote was requested while this
    /// one was resolving, the stale result is dropped and `None` comes
    /// back, so callers never display an out-of-date number.
    pub async fn quote(
        &self,
        chain_id: u64,
        request: &QuoteRequest,
    ) -> Result<Option<Quote>, SwapError> {
        let ticket = self.sequencer.begin();
        let result = self.quotes.quote(chain_id, request).await;
        match result {
            Ok(Some(_)) if !self.sequencer.is_current(ticket) => {
                debug!(ticket, "Discarding superseded quote");
                Ok(None)
            }
            other => other,
        }
    }

    /// Runs a full swap: claims the session, re-quotes, approves when the
    /// input is an ERC-20 on a live chain, then executes. Any failure
    /// after the claim lands the session in `Error` with the reason; the
    /// session must then be `reset` before the next swap.
    pub async fn execute_swap(
        &self,
        wallet: &dyn WalletProvider,
        chain_id: u64,
        request: &SwapRequest,
    ) -> Result<SwapOutcome, SwapError> {
        // Bad requests bounce before the session is touched.
        let (amount_in, _) = request.validate()?;
        let chain = self.registry.chain(chain_id)?;

        let live = chain.has_dex_support();
        let needs_approval = live && !request.token_in.is_native();
        let first = if needs_approval {
            SessionStatus::Approving
        } else {
            SessionStatus::Swapping
        };
        self.session.begin(first).await?;

        match self
            .run_swap(wallet, chain_id, request, amount_in.raw, needs_approval)
            .await
        {
            Ok(outcome) => {
                self.session.succeed(outcome.tx_hash).await;
                Ok(outcome)
            }
            Err(e) => {
                self.session.fail(&e).await;
                Err(e)
            }
        }
    }

    async fn run_swap(
        &self,
        wallet: &dyn WalletProvider,
        chain_id: u64,
        request: &SwapRequest,
        amount_raw: U256,
        needs_approval: bool,
    ) -> Result<SwapOutcome, SwapError> {
        // Always execute against a fresh quote; a previously displayed one
        // may be stale by now.
        let quote = self
            .quotes
            .quote(chain_id, &QuoteRequest::from(request))
            .await?
            .ok_or_else(|| SwapError::Validation("nothing to swap".into()))?;

        if needs_approval {
            let spender = self.registry.chain(chain_id)?.router()?;
            self.allowance
                .ensure_approved(wallet, &request.token_in, amount_raw, spender)
                .await?;
            self.session.transition(SessionStatus::Swapping).await?;
        }

        let outcome = self
            .executor
            .execute(wallet, chain_id, request, &quote)
            .await?;
        self.session.record_tx_hash(outcome.tx_hash).await;
        Ok(outcome)
    }

    /// Clears a finished session. Errors if a swap is still in flight.
    pub async fn reset(&self) -> Result<(), SwapError> {
        self.session.reset().await
    }

    pub async fn last_tx_hash(&self) -> Option<H256> {
        self.session.tx_hash().await
    }
}
