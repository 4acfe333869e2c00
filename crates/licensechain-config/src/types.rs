//! Configuration file model.

use licensechain_chains::builtin_chains;
use licensechain_types::{ChainId, Web3Config, DEFAULT_CHAIN};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Root of a `licensechain.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub client: Web3Config,
	#[serde(default)]
	pub chains: ChainsConfig,
	#[serde(default)]
	pub logging: LoggingConfig,
}

/// Which built-in chains the client registers, and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainsConfig {
	/// Chain used when an operation does not name one.
	#[serde(default = "default_chain")]
	pub default: ChainId,
	/// Built-in chains to register, in registration order.
	#[serde(default = "builtin_chains")]
	pub enabled: Vec<ChainId>,
	#[serde(default)]
	pub overrides: BTreeMap<ChainId, ChainOverride>,
}

impl Default for ChainsConfig {
	fn default() -> Self {
		Self {
			default: default_chain(),
			enabled: builtin_chains(),
			overrides: BTreeMap::new(),
		}
	}
}

/// Endpoint overrides for one built-in chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOverride {
	pub rpc_url: Option<String>,
	pub explorer_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
	#[serde(default = "default_log_level")]
	pub level: String,
	#[serde(default)]
	pub format: LogFormat,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: default_log_level(),
			format: LogFormat::default(),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
}

impl fmt::Display for LogFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LogFormat::Pretty => f.write_str("pretty"),
			LogFormat::Json => f.write_str("json"),
		}
	}
}

fn default_chain() -> ChainId {
	ChainId::new(DEFAULT_CHAIN)
}

fn default_log_level() -> String {
	"info".to_string()
}
