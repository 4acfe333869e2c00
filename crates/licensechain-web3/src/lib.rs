//! LicenseChain Web3 SDK.
//!
//! `LicenseChainWeb3` combines the license management API with blockchain
//! operations across the supported networks. Blockchain calls are routed by
//! chain identifier to a registered adapter; the built-in adapters for
//! Ethereum, Polygon, BSC, Avalanche, Arbitrum, Optimism, Solana and
//! Polkadot are registered on construction and custom adapters can be added
//! with `add_provider`.
//!
//! # Components
//!
//! - `client`: the `LicenseChainWeb3` entry point
//! - `cli`: command-line interface of the `licensechain` binary
//! - `error`: the aggregate error type

pub mod cli;
pub mod client;
pub mod error;

pub use client::LicenseChainWeb3;
pub use error::{Error, Result};

pub use licensechain_chains::{builtin_adapter, utils, ChainRegistry, SimulatedAdapter};
pub use licensechain_config::{Config, ConfigLoader};
pub use licensechain_core::{listener, EventBus, Listener, MultiChainManager};
pub use licensechain_license::{LicenseClient, LicenseError};
pub use licensechain_types as types;
