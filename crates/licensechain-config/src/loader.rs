//! Configuration loading from files and environment.

use crate::types::Config;
use crate::ConfigError;
use licensechain_chains::builtin_chains;
use licensechain_types::ChainId;
use regex::Regex;
use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of the environment variables that override loaded settings.
pub const DEFAULT_ENV_PREFIX: &str = "LICENSECHAIN_";

/// Configuration loader with environment variable substitution
#[derive(Debug, Clone)]
pub struct ConfigLoader {
	file_path: Option<PathBuf>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: DEFAULT_ENV_PREFIX.to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	/// Loads, overrides and validates the configuration.
	///
	/// Without a file the defaults are used, so the API key must then come
	/// from the `API_KEY` override.
	pub async fn load(&self) -> Result<Config, ConfigError> {
		let mut config = match &self.file_path {
			Some(path) => self.load_from_file(path).await?,
			None => {
				debug!("No configuration file given, using defaults");
				Config::default()
			}
		};

		self.apply_env_overrides(&mut config)?;
		Self::validate(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, path: &Path) -> Result<Config, ConfigError> {
		info!("Loading configuration from {:?}", path);

		let content = tokio::fs::read_to_string(path)
			.await
			.map_err(|e| match e.kind() {
				ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
				_ => ConfigError::IoError(e),
			})?;

		let substituted = substitute_env_vars(&content)?;
		Self::from_toml(&substituted)
	}

	/// Parses a TOML document without substitution, overrides or validation.
	pub fn from_toml(content: &str) -> Result<Config, ConfigError> {
		toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
	}

	fn env_var(&self, name: &str) -> Option<String> {
		env::var(format!("{}{}", self.env_prefix, name)).ok()
	}

	fn apply_env_overrides(&self, config: &mut Config) -> Result<(), ConfigError> {
		if let Some(api_key) = self.env_var("API_KEY") {
			debug!("Overriding API key from environment");
			config.client.api_key = api_key;
		}

		if let Some(base_url) = self.env_var("BASE_URL") {
			config.client.base_url = base_url;
		}

		if let Some(timeout) = self.env_var("TIMEOUT_MS") {
			config.client.timeout_ms = timeout
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid timeout: {}", e)))?;
		}

		if let Some(retries) = self.env_var("RETRIES") {
			config.client.retries = retries
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid retries: {}", e)))?;
		}

		if let Some(chain) = self.env_var("DEFAULT_CHAIN") {
			config.chains.default = ChainId::new(chain);
		}

		if let Some(level) = self.env_var("LOG_LEVEL") {
			config.logging.level = level;
		}

		Ok(())
	}

	/// Checks the invariants the client relies on.
	pub fn validate(config: &Config) -> Result<(), ConfigError> {
		if config.client.api_key.trim().is_empty() {
			return Err(ConfigError::ValidationError(
				"API key is required".to_string(),
			));
		}

		let base_url = url::Url::parse(&config.client.base_url).map_err(|e| {
			ConfigError::ValidationError(format!(
				"Invalid base URL '{}': {}",
				config.client.base_url, e
			))
		})?;
		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(ConfigError::ValidationError(format!(
				"Base URL must use http or https: {}",
				config.client.base_url
			)));
		}

		if config.client.timeout_ms == 0 {
			return Err(ConfigError::ValidationError(
				"Timeout must be greater than zero".to_string(),
			));
		}

		let known = builtin_chains();
		let unknown = config
			.chains
			.enabled
			.iter()
			.chain(config.chains.overrides.keys())
			.find(|chain| !known.contains(chain));
		if let Some(chain) = unknown {
			return Err(ConfigError::ValidationError(format!(
				"Unknown chain '{}'",
				chain
			)));
		}

		if !config.chains.enabled.contains(&config.chains.default) {
			return Err(ConfigError::ValidationError(format!(
				"Default chain '{}' is not enabled",
				config.chains.default
			)));
		}

		Ok(())
	}
}

/// Replaces every `${VAR_NAME}` in `content` with the variable's value.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::ParseError(e.to_string()))?;

	let mut result = content.to_string();
	for cap in re.captures_iter(content) {
		let full_match = &cap[0];
		let var_name = &cap[1];

		let value =
			env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

		result = result.replace(full_match, &value);
	}

	Ok(result)
}
