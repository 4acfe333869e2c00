//! Client configuration shared by the license client and the SDK façade.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base URL of the license API.
pub const DEFAULT_BASE_URL: &str = "https://api.licensechain.app";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of retries for license API requests.
pub const DEFAULT_RETRIES: u32 = 3;

/// Chain used when a caller does not name one.
pub const DEFAULT_CHAIN: &str = "ethereum";

/// Credentials and transport settings for the license API.
///
/// Only `api_key` and `base_url` shape requests directly; `timeout_ms` and
/// `retries` are handed to the request layer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Web3Config {
	#[serde(default)]
	pub api_key: String,
	#[serde(default = "default_base_url")]
	pub base_url: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default = "default_retries")]
	pub retries: u32,
}

impl Web3Config {
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			base_url: default_base_url(),
			timeout_ms: DEFAULT_TIMEOUT_MS,
			retries: DEFAULT_RETRIES,
		}
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout_ms = timeout.as_millis() as u64;
		self
	}

	pub fn with_retries(mut self, retries: u32) -> Self {
		self.retries = retries;
		self
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}
}

impl Default for Web3Config {
	/// Defaults with an empty API key, to be filled in by the caller.
	fn default() -> Self {
		Self::new("")
	}
}

fn default_base_url() -> String {
	DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
	DEFAULT_TIMEOUT_MS
}

fn default_retries() -> u32 {
	DEFAULT_RETRIES
}
