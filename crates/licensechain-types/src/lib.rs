//! Common types for the LicenseChain multi-chain client.
//!
//! This crate holds the data model shared by every other crate in the
//! workspace: chain identifiers and metadata, the `ChainAdapter` capability
//! contract, transaction and transfer descriptors, event payloads, license
//! records and the error taxonomy.

pub mod chains;
pub mod config;
pub mod errors;
pub mod events;
pub mod license;
pub mod transactions;

pub use chains::*;
pub use config::*;
pub use errors::*;
pub use events::*;
pub use license::*;
pub use transactions::*;
