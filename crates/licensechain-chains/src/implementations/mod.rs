//! Built-in chain adapter implementations.
//!
//! Every supported network is served by a `SimulatedAdapter` configured with
//! that network's chain descriptor. The adapters keep a connected flag and
//! return synthetic data; they perform no RPC or signing.

pub mod simulated;

pub use simulated::SimulatedAdapter;

use licensechain_types::{ChainConfig, ChainId, NativeCurrency};

/// Account model family of a chain. Only affects the shape of synthetic
/// identifiers and fee figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFamily {
	Evm,
	Solana,
	Polkadot,
}

impl ChainFamily {
	/// Whether hashes and addresses carry a `0x` prefix.
	pub fn hex_prefixed(&self) -> bool {
		matches!(self, ChainFamily::Evm)
	}

	/// Fee reported for a plain value transfer.
	pub fn transfer_gas(&self) -> &'static str {
		match self {
			ChainFamily::Evm => "21000",
			ChainFamily::Solana => "5000",
			ChainFamily::Polkadot => "1000000000",
		}
	}

	/// Result label returned by contract calls.
	pub fn call_result(&self) -> &'static str {
		match self {
			ChainFamily::Evm => "contract_call_success",
			ChainFamily::Solana => "program_call_success",
			ChainFamily::Polkadot => "pallet_call_success",
		}
	}
}

/// Identifiers of the built-in chains, in the order the client registers them.
pub fn builtin_chains() -> Vec<ChainId> {
	[
		ChainId::ETHEREUM,
		ChainId::POLYGON,
		ChainId::BSC,
		ChainId::AVALANCHE,
		ChainId::ARBITRUM,
		ChainId::OPTIMISM,
		ChainId::SOLANA,
		ChainId::POLKADOT,
	]
	.into_iter()
	.map(ChainId::from)
	.collect()
}

/// Creates the simulated adapter for a built-in chain.
///
/// Returns `None` for identifiers that are not built in.
pub fn builtin_adapter(chain_id: &str) -> Option<SimulatedAdapter> {
	let adapter = match chain_id {
		ChainId::ETHEREUM => SimulatedAdapter::new(
			ChainFamily::Evm,
			chain_config(
				1,
				"Ethereum Mainnet",
				"https://mainnet.infura.io/v3/",
				"https://etherscan.io",
				("Ether", "ETH", 18),
			),
		),
		ChainId::POLYGON => SimulatedAdapter::new(
			ChainFamily::Evm,
			chain_config(
				137,
				"Polygon Mainnet",
				"https://polygon-rpc.com",
				"https://polygonscan.com",
				("MATIC", "MATIC", 18),
			),
		),
		ChainId::BSC => SimulatedAdapter::new(
			ChainFamily::Evm,
			chain_config(
				56,
				"BNB Smart Chain",
				"https://bsc-dataseed.binance.org",
				"https://bscscan.com",
				("BNB", "BNB", 18),
			),
		),
		ChainId::AVALANCHE => SimulatedAdapter::new(
			ChainFamily::Evm,
			chain_config(
				43114,
				"Avalanche C-Chain",
				"https://api.avax.network/ext/bc/C/rpc",
				"https://snowtrace.io",
				("Avalanche", "AVAX", 18),
			),
		),
		ChainId::ARBITRUM => SimulatedAdapter::new(
			ChainFamily::Evm,
			chain_config(
				42161,
				"Arbitrum One",
				"https://arb1.arbitrum.io/rpc",
				"https://arbiscan.io",
				("Ether", "ETH", 18),
			),
		),
		ChainId::OPTIMISM => SimulatedAdapter::new(
			ChainFamily::Evm,
			chain_config(
				10,
				"Optimism",
				"https://mainnet.optimism.io",
				"https://optimistic.etherscan.io",
				("Ether", "ETH", 18),
			),
		),
		ChainId::SOLANA => SimulatedAdapter::new(
			ChainFamily::Solana,
			chain_config(
				101,
				"Solana Mainnet",
				"https://api.mainnet-beta.solana.com",
				"https://explorer.solana.com",
				("Solana", "SOL", 9),
			),
		),
		// Balance is 1 DOT expressed in planck at the legacy 12-decimal scale
		ChainId::POLKADOT => SimulatedAdapter::new(
			ChainFamily::Polkadot,
			chain_config(
				0,
				"Polkadot",
				"wss://rpc.polkadot.io",
				"https://polkadot.subscan.io",
				("Polkadot", "DOT", 10),
			),
		)
		.with_balance("1000000000000"),
		_ => return None,
	};

	Some(adapter)
}

fn chain_config(
	chain_id: u64,
	name: &str,
	rpc_url: &str,
	explorer_url: &str,
	currency: (&str, &str, u8),
) -> ChainConfig {
	let (currency_name, symbol, decimals) = currency;
	ChainConfig {
		chain_id,
		name: name.to_string(),
		rpc_url: rpc_url.to_string(),
		explorer_url: explorer_url.to_string(),
		native_currency: NativeCurrency {
			name: currency_name.to_string(),
			symbol: symbol.to_string(),
			decimals,
		},
	}
}
