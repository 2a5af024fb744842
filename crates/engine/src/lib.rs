//! Swap engine: quoting, approvals, execution and session lifecycle.
//!
//! The crate is wired as a pipeline behind [`service::SwapService`]:
//! [`quote::QuoteEngine`] prices a candidate trade (live pool state with
//! estimated fallbacks), [`allowance::AllowanceManager`] issues bounded
//! approvals, [`executor::SwapExecutor`] submits and confirms the swap,
//! and [`session::SwapSession`] tracks the attempt through its monotonic
//! state machine.

pub mod allowance;
pub mod executor;
pub mod quote;
pub mod service;
pub mod session;

#[cfg(test)]
mod testing;

pub use allowance::AllowanceManager;
pub use executor::{SwapExecutor, SwapOutcome};
pub use quote::{QuoteEngine, QuoteRequest, QuoteSequencer};
pub use service::SwapService;
pub use session::{SessionSnapshot, SessionStatus, SwapSession};
