use anyhow::{Context, Result};
use clap::Parser;
use licensechain_config::{Config, ConfigLoader, LogFormat};
use licensechain_types::{ChainId, CrossChainTransfer};
use licensechain_web3::cli::{Args, Command};
use licensechain_web3::LicenseChainWeb3;
use serde_json::{json, Value};
use tracing::info;
use tracing::instrument::WithSubscriber;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	let config = load_config(&args).await?;

	let log_level = args
		.log_level
		.clone()
		.unwrap_or_else(|| config.logging.level.clone());
	setup_tracing(&log_level, config.logging.format)?;

	run(args.command, &config).await
}

/// Loads the configuration under a stderr subscriber filtered by
/// `--log-level`, since the configured logging is not known yet.
async fn load_config(args: &Args) -> Result<Config> {
	let bootstrap = tracing_subscriber::registry()
		.with(env_filter(args.log_level.as_deref().unwrap_or("info")))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

	let mut loader = ConfigLoader::new();
	if let Some(path) = &args.config {
		loader = loader.with_file(path);
	}
	loader
		.load()
		.with_subscriber(bootstrap)
		.await
		.context("Failed to load configuration")
}

async fn run(command: Command, config: &Config) -> Result<()> {
	let client = LicenseChainWeb3::from_config(config).context("Failed to create client")?;
	let output = execute(&client, config, command).await;
	client.disconnect().await;

	print(output?)
}

async fn execute(client: &LicenseChainWeb3, config: &Config, command: Command) -> Result<Value> {
	let output = match command {
		Command::Chains => serde_json::to_value(client.get_supported_chains())?,
		Command::ChainConfig { chain } => {
			let config = client
				.get_chain_config(&chain)
				.with_context(|| format!("Failed to get configuration of {}", chain))?;
			serde_json::to_value(config)?
		}
		Command::Balance { address, chain } => {
			let chain = chain.unwrap_or_else(|| client.default_chain().to_string());
			let balance = client
				.get_balance(&address, Some(&chain))
				.await
				.context("Failed to get balance")?;
			json!({ "chain": chain, "address": address, "balance": balance })
		}
		Command::Send { to, amount, chain } => {
			let result = client
				.send_transaction(&to, &amount, chain.as_deref())
				.await
				.context("Failed to send transaction")?;
			serde_json::to_value(result)?
		}
		Command::Transfer {
			from,
			to,
			token,
			amount,
			recipient,
			bridge,
		} => {
			let transfer = CrossChainTransfer {
				from_chain: ChainId::new(from),
				to_chain: ChainId::new(to),
				token_address: token,
				amount,
				recipient,
				bridge_protocol: bridge,
			};
			let result = client
				.transfer_cross_chain(&transfer)
				.await
				.context("Failed to transfer cross-chain")?;
			serde_json::to_value(result)?
		}
		Command::ValidateLicense { key } => {
			let valid = client
				.validate_license(&key)
				.await
				.context("Failed to validate license")?;
			json!({ "licenseKey": key, "valid": valid })
		}
		Command::ValidateConfig => {
			info!("Configuration is valid");
			json!({
				"valid": true,
				"baseUrl": config.client.base_url,
				"defaultChain": client.default_chain(),
				"enabledChains": client.get_supported_chains(),
				"logFormat": config.logging.format,
			})
		}
	};

	Ok(output)
}

fn print(value: Value) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(&value)?);
	Ok(())
}

fn env_filter(log_level: &str) -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

fn setup_tracing(log_level: &str, format: LogFormat) -> Result<()> {
	let registry = tracing_subscriber::registry().with(env_filter(log_level));
	match format {
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
			.init(),
		LogFormat::Pretty => registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.init(),
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_validate_config_reports_registered_chains() {
		let config = ConfigLoader::from_toml(
			r#"
[client]
api_key = "key"

[chains]
default = "solana"
enabled = ["solana", "polkadot"]
"#,
		)
		.unwrap();
		let client = LicenseChainWeb3::from_config(&config).unwrap();

		let output = execute(&client, &config, Command::ValidateConfig)
			.await
			.unwrap();

		assert_eq!(output["valid"], true);
		assert_eq!(output["defaultChain"], "solana");
		assert_eq!(output["enabledChains"], json!(["solana", "polkadot"]));
	}

	#[tokio::test]
	async fn test_load_config_logs_without_installing_global_subscriber() {
		let args = Args::try_parse_from([
			"licensechain",
			"--log-level",
			"debug",
			"--config",
			"/nonexistent/licensechain.toml",
			"chains",
		])
		.unwrap();

		let err = load_config(&args).await.unwrap_err();

		assert_eq!(err.to_string(), "Failed to load configuration");
		assert!(!tracing::dispatcher::has_been_set());
	}
}
