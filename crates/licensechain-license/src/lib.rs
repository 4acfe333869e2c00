//! License management over the LicenseChain HTTP API.

pub mod client;
pub mod error;

pub use client::{normalize_endpoint, LicenseClient};
pub use error::LicenseError;
