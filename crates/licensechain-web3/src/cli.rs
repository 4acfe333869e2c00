//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "licensechain")]
#[command(about = "LicenseChain multi-chain client", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
	/// Path to configuration file
	#[arg(short, long, global = true, env = "LICENSECHAIN_CONFIG")]
	pub config: Option<PathBuf>,

	/// Log level override (trace, debug, info, warn, error)
	#[arg(short, long, global = true, env = "LICENSECHAIN_LOG_LEVEL")]
	pub log_level: Option<String>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// List the supported chains
	Chains,

	/// Show the configuration of one chain
	ChainConfig {
		chain: String,
	},

	/// Query the native balance of an address
	Balance {
		address: String,
		#[arg(long)]
		chain: Option<String>,
	},

	/// Send native currency
	Send {
		to: String,
		/// Amount in the smallest denomination
		amount: String,
		#[arg(long)]
		chain: Option<String>,
	},

	/// Transfer tokens from one chain to another
	Transfer {
		#[arg(long)]
		from: String,
		#[arg(long)]
		to: String,
		#[arg(long)]
		token: String,
		#[arg(long)]
		amount: String,
		#[arg(long)]
		recipient: String,
		#[arg(long)]
		bridge: Option<String>,
	},

	/// Check a license key against the license API
	ValidateLicense {
		key: String,
	},

	/// Validate the configuration and print a summary
	ValidateConfig,
}
