//! Core domain types for the swap engine.
//!
//! Everything in this crate is pure: token and pool models, base-unit
//! amounts, the quote sum type, slippage math, and the sqrt-price
//! conversion. No I/O, no async.

/// Token and pool entities.
pub mod entities;
/// Fee tier and related enums.
pub mod enums;
/// Error taxonomy shared across the workspace.
pub mod error;
/// Pure pricing math.
pub mod math;
/// Amounts, quotes and slippage.
pub mod value_objects;

pub use entities::pool::{PoolReference, PoolState};
pub use entities::token::{Token, TokenAddress};
pub use enums::FeeTier;
pub use error::SwapError;
pub use value_objects::amount::Amount;
pub use value_objects::quote::{Quote, SwapRequest};
pub use value_objects::slippage::SlippageTolerance;
