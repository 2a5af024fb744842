//! Chain access layer for the swap engine.
//!
//! This crate owns everything that touches an EVM endpoint:
//! - Chain registry (per-network contract addresses, tokens, reference rates)
//! - ABI calldata encoding for the handful of consumed contract calls
//! - Async provider traits (reads via `eth_call`, writes via a wallet seam)
//! - Typed clients for the factory, pool, ERC-20 and router contracts
//!
//! Wallet connection and transaction signing live behind [`WalletProvider`];
//! this crate only builds the requests.

/// Calldata encoding and return-word decoding.
pub mod abi;
/// ERC-20 reads and the approval write.
pub mod erc20;
/// Factory pool lookup.
pub mod factory;
/// Pool state reads.
pub mod pool;
/// Provider traits and request/receipt types.
pub mod provider;
/// Chain and token registry.
pub mod registry;
/// JSON-RPC reader.
pub mod rpc;
/// Router swap calldata.
pub mod router;

pub use provider::{CallRequest, ChainReader, TransactionReceipt, TransactionRequest, WalletProvider};
pub use registry::{ChainConfig, ChainRegistry, KnownPool};
