//! Chain adapters for the LicenseChain multi-chain client.
//!
//! This crate provides the pieces that sit directly behind the `ChainAdapter`
//! capability contract defined in `licensechain-types`.
//!
//! # Architecture
//!
//! - `registry`: maps chain identifiers to adapter instances and resolves
//!   lookups, preserving registration order for discovery
//! - `implementations`: the built-in simulated adapters for the supported
//!   EVM, Solana and Polkadot networks
//! - `utils`: address, unit and gas helpers shared by callers

pub mod implementations;
pub mod registry;
pub mod utils;

pub use implementations::{builtin_adapter, builtin_chains, ChainFamily, SimulatedAdapter};
pub use registry::ChainRegistry;
