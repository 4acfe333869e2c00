//! Configuration loading for the LicenseChain client.
//!
//! Configuration is read from a TOML file, with `${VAR}` placeholders
//! substituted from the environment before parsing. Selected settings can
//! then be overridden through `LICENSECHAIN_*` variables. The result is
//! validated before it is handed out.

use thiserror::Error;

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX};
pub use types::{ChainOverride, ChainsConfig, Config, LogFormat, LoggingConfig};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}
