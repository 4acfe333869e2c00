//! Chain-related types and the adapter capability contract.

use crate::{errors::ChainResult, SmartContractCall, TransactionResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Chain identifier.
///
/// An opaque, case-sensitive string key such as `"ethereum"` or `"solana"`.
/// It is the lookup key of the adapter registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(String);

impl ChainId {
	pub const ETHEREUM: &'static str = "ethereum";
	pub const POLYGON: &'static str = "polygon";
	pub const BSC: &'static str = "bsc";
	pub const AVALANCHE: &'static str = "avalanche";
	pub const ARBITRUM: &'static str = "arbitrum";
	pub const OPTIMISM: &'static str = "optimism";
	pub const SOLANA: &'static str = "solana";
	pub const POLKADOT: &'static str = "polkadot";

	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for ChainId {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

impl From<String> for ChainId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl AsRef<str> for ChainId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for ChainId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl PartialEq<str> for ChainId {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for ChainId {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}

/// Native currency of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
	pub name: String,
	pub symbol: String,
	/// Number of decimal places between the display unit and the
	/// smallest denomination.
	pub decimals: u8,
}

/// Immutable chain descriptor produced by an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
	/// Numeric chain id as used by the network itself.
	pub chain_id: u64,
	/// Human-readable name of the chain.
	pub name: String,
	/// RPC endpoint URL.
	pub rpc_url: String,
	/// Block explorer URL.
	pub explorer_url: String,
	pub native_currency: NativeCurrency,
}

/// Capability contract every chain implementation satisfies.
///
/// The multi-chain manager treats all adapters as interchangeable and never
/// branches on the concrete chain family. Adapters hold their own connection
/// state; the manager asks for a connect before every operation, so
/// `connect` must be idempotent.
///
/// Adapters may be invoked concurrently. Implementations that keep more than
/// a connected flag are responsible for their own internal consistency.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
	/// Establishes readiness. Safe to call when already connected.
	///
	/// Fails with `ChainError::Network` when the link cannot be established.
	async fn connect(&self) -> ChainResult<()>;

	/// Releases readiness.
	///
	/// Expected to always succeed; callers performing teardown log and
	/// ignore failures.
	async fn disconnect(&self) -> ChainResult<()>;

	/// Returns the balance of `address` in the smallest denomination as a
	/// plain decimal string.
	async fn get_balance(&self, address: &str) -> ChainResult<String>;

	/// Submits a value transfer. The returned status reflects submission,
	/// not necessarily on-chain finality.
	async fn send_transaction(&self, to: &str, amount: &str) -> ChainResult<TransactionResult>;

	/// Calls a contract method. The result shape is adapter-defined.
	async fn call_contract(&self, call: &SmartContractCall) -> ChainResult<serde_json::Value>;

	/// Deploys a contract or program and returns its assigned address.
	async fn deploy_contract(
		&self,
		bytecode: &str,
		abi: &[serde_json::Value],
		constructor_args: &[serde_json::Value],
	) -> ChainResult<String>;

	/// Returns the chain descriptor. Requires no connection.
	fn chain_config(&self) -> ChainConfig;
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn test_chain_id_display_and_equality() {
		let id = ChainId::from(ChainId::ETHEREUM);
		assert_eq!(id.to_string(), "ethereum");
		assert_eq!(id, "ethereum");
		assert_ne!(id, ChainId::new("Ethereum"));
	}

	#[test]
	fn test_chain_id_borrow_lookup() {
		let mut map = HashMap::new();
		map.insert(ChainId::new("polygon"), 137u64);
		assert_eq!(map.get("polygon"), Some(&137));
		assert_eq!(map.get("POLYGON"), None);
	}

	#[test]
	fn test_chain_config_wire_format() {
		let config = ChainConfig {
			chain_id: 137,
			name: "Polygon Mainnet".to_string(),
			rpc_url: "https://polygon-rpc.com".to_string(),
			explorer_url: "https://polygonscan.com".to_string(),
			native_currency: NativeCurrency {
				name: "MATIC".to_string(),
				symbol: "MATIC".to_string(),
				decimals: 18,
			},
		};

		let json = serde_json::to_value(&config).unwrap();
		assert_eq!(json["chainId"], 137);
		assert_eq!(json["rpcUrl"], "https://polygon-rpc.com");
		assert_eq!(json["nativeCurrency"]["decimals"], 18);
	}
}
