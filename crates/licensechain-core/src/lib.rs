//! Multi-chain dispatch for the LicenseChain client.
//!
//! `MultiChainManager` is the single entry point for blockchain operations.
//! It resolves the requested chain through a `ChainRegistry`, makes sure the
//! adapter is connected, runs the operation and translates failures into
//! `Web3Error`. Cross-chain transfers are coordinated by the
//! `CrossChainOrchestrator`, which reports completions on the `EventBus`.

pub mod event_bus;
pub mod manager;
pub mod transfer;

#[cfg(test)]
pub(crate) mod test_utils;

pub use event_bus::{listener, EventBus, Listener};
pub use manager::MultiChainManager;
pub use transfer::{CrossChainOrchestrator, TransferPhase};
