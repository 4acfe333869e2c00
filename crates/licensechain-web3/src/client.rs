//! The `LicenseChainWeb3` SDK entry point.

use crate::error::{Error, Result};
use licensechain_chains::builtin_adapter;
use licensechain_config::{Config, ConfigError};
use licensechain_core::{Listener, MultiChainManager};
use licensechain_license::LicenseClient;
use licensechain_types::{
	ChainAdapter, ChainConfig, ChainId, CrossChainTransfer, ErrorEvent, EventName, LicenseData,
	LicenseUpdate, SmartContractCall, TransactionConfirmedEvent, TransactionResult, Web3Config,
	Web3Error, Web3Event,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// License management and multi-chain operations behind one handle.
///
/// Blockchain methods take an optional chain; `None` means the client's
/// default chain. Failed blockchain operations are published as `error`
/// events and successful sends as `transactionConfirmed` events, in addition
/// to being returned.
#[derive(Debug)]
pub struct LicenseChainWeb3 {
	license: LicenseClient,
	manager: MultiChainManager,
	default_chain: ChainId,
}

impl LicenseChainWeb3 {
	/// Creates a client with every built-in chain registered and
	/// `ethereum` as the default chain.
	pub fn new(config: Web3Config) -> Result<Self> {
		Self::from_config(&Config {
			client: config,
			..Default::default()
		})
	}

	/// Creates a client from a loaded configuration file.
	pub fn from_config(config: &Config) -> Result<Self> {
		let license = LicenseClient::new(config.client.clone())?;

		let mut manager = MultiChainManager::new();
		for chain in &config.chains.enabled {
			let mut adapter = builtin_adapter(chain.as_str()).ok_or_else(|| {
				ConfigError::ValidationError(format!("Unknown chain '{}'", chain))
			})?;

			if let Some(overrides) = config.chains.overrides.get(chain) {
				if let Some(rpc_url) = &overrides.rpc_url {
					adapter = adapter.with_rpc_url(rpc_url.clone());
				}
				if let Some(explorer_url) = &overrides.explorer_url {
					adapter = adapter.with_explorer_url(explorer_url.clone());
				}
			}

			manager.add_provider(chain.clone(), Arc::new(adapter));
		}

		info!(
			"LicenseChain client ready with {} chain(s), default {}",
			config.chains.enabled.len(),
			config.chains.default
		);

		Ok(Self {
			license,
			manager,
			default_chain: config.chains.default.clone(),
		})
	}

	pub fn default_chain(&self) -> &ChainId {
		&self.default_chain
	}

	pub fn license_client(&self) -> &LicenseClient {
		&self.license
	}

	pub fn manager(&self) -> &MultiChainManager {
		&self.manager
	}

	fn chain_or_default<'a>(&'a self, chain: Option<&'a str>) -> &'a str {
		chain.unwrap_or_else(|| self.default_chain.as_str())
	}

	/// Publishes an `error` event for a failed operation and passes the
	/// result through.
	fn report<T>(&self, operation: &str, result: std::result::Result<T, Web3Error>) -> Result<T> {
		result.map_err(|e| {
			debug!("{} failed: {}", operation, e);
			self.manager.events().publish(Web3Event::Error(ErrorEvent {
				operation: operation.to_string(),
				chain: Some(e.chain().clone()),
				kind: e.kind(),
				message: e.to_string(),
			}));
			Error::from(e)
		})
	}

	// License management

	pub async fn create_license(
		&self,
		user_id: &str,
		product_id: &str,
		metadata: Option<HashMap<String, Value>>,
	) -> Result<LicenseData> {
		Ok(self
			.license
			.create_license(user_id, product_id, metadata)
			.await?)
	}

	pub async fn get_license(&self, license_id: &str) -> Result<LicenseData> {
		Ok(self.license.get_license(license_id).await?)
	}

	pub async fn validate_license(&self, license_key: &str) -> Result<bool> {
		Ok(self.license.validate_license(license_key).await?)
	}

	pub async fn update_license(
		&self,
		license_id: &str,
		updates: &LicenseUpdate,
	) -> Result<LicenseData> {
		Ok(self.license.update_license(license_id, updates).await?)
	}

	pub async fn revoke_license(&self, license_id: &str) -> Result<bool> {
		Ok(self.license.revoke_license(license_id).await?)
	}

	// Blockchain operations

	pub async fn get_balance(&self, address: &str, chain: Option<&str>) -> Result<String> {
		let chain = self.chain_or_default(chain);
		let result = self.manager.get_balance(address, chain).await;
		self.report("getBalance", result)
	}

	pub async fn send_transaction(
		&self,
		to: &str,
		amount: &str,
		chain: Option<&str>,
	) -> Result<TransactionResult> {
		let chain = self.chain_or_default(chain);
		let result = self.manager.send_transaction(to, amount, chain).await;
		let result = self.report("sendTransaction", result)?;

		if result.is_success() {
			self.manager
				.events()
				.publish(Web3Event::TransactionConfirmed(TransactionConfirmedEvent {
					chain: ChainId::from(chain),
					result: result.clone(),
				}));
		}

		Ok(result)
	}

	pub async fn call_contract(
		&self,
		call: &SmartContractCall,
		chain: Option<&str>,
	) -> Result<Value> {
		let chain = self.chain_or_default(chain);
		let result = self.manager.call_contract(call, chain).await;
		self.report("callContract", result)
	}

	pub async fn deploy_contract(
		&self,
		bytecode: &str,
		abi: &[Value],
		constructor_args: &[Value],
		chain: Option<&str>,
	) -> Result<String> {
		let chain = self.chain_or_default(chain);
		let result = self
			.manager
			.deploy_contract(bytecode, abi, constructor_args, chain)
			.await;
		self.report("deployContract", result)
	}

	pub async fn transfer_cross_chain(
		&self,
		transfer: &CrossChainTransfer,
	) -> Result<TransactionResult> {
		let result = self.manager.transfer_cross_chain(transfer).await;
		self.report("transferCrossChain", result)
	}

	pub fn get_supported_chains(&self) -> Vec<ChainId> {
		self.manager.supported_chains()
	}

	pub fn get_chain_config(&self, chain: &str) -> Result<ChainConfig> {
		Ok(self.manager.chain_config(chain)?)
	}

	/// Registers a custom adapter, replacing any adapter for `chain`.
	pub fn add_provider(
		&mut self,
		chain: impl Into<ChainId>,
		adapter: Arc<dyn ChainAdapter>,
	) -> Option<Arc<dyn ChainAdapter>> {
		self.manager.add_provider(chain, adapter)
	}

	// Events

	pub fn on(&self, name: EventName, listener: Listener) -> bool {
		self.manager.on(name, listener)
	}

	pub fn off(&self, name: EventName, listener: &Listener) -> bool {
		self.manager.off(name, listener)
	}

	pub async fn disconnect(&self) {
		self.manager.disconnect().await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use licensechain_core::listener;
	use licensechain_types::{ErrorKind, TransactionStatus};
	use std::sync::Mutex;

	const ADDRESS: &str = "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6";

	fn client() -> LicenseChainWeb3 {
		LicenseChainWeb3::new(Web3Config::new("test-key")).unwrap()
	}

	fn record(client: &LicenseChainWeb3, name: EventName) -> Arc<Mutex<Vec<Web3Event>>> {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink = seen.clone();
		client.on(
			name,
			listener(move |event| {
				sink.lock().unwrap().push(event.clone());
				Ok(())
			}),
		);
		seen
	}

	#[test]
	fn test_builtin_chains_registered_in_order() {
		let chains: Vec<String> = client()
			.get_supported_chains()
			.into_iter()
			.map(|c| c.to_string())
			.collect();
		assert_eq!(
			chains,
			vec![
				"ethereum",
				"polygon",
				"bsc",
				"avalanche",
				"arbitrum",
				"optimism",
				"solana",
				"polkadot"
			]
		);
		assert_eq!(client().default_chain(), "ethereum");
	}

	#[tokio::test]
	async fn test_default_chain_used_when_none_given() {
		let client = client();
		let explicit = client.get_balance(ADDRESS, Some("ethereum")).await.unwrap();
		let implicit = client.get_balance(ADDRESS, None).await.unwrap();
		assert_eq!(implicit, explicit);
		assert_eq!(implicit, "1000000000000000000");
	}

	#[tokio::test]
	async fn test_send_publishes_transaction_confirmed() {
		let client = client();
		let seen = record(&client, EventName::TransactionConfirmed);

		let result = client
			.send_transaction(ADDRESS, "1000", Some("polygon"))
			.await
			.unwrap();

		assert_eq!(result.status, TransactionStatus::Success);
		let events = seen.lock().unwrap();
		assert_eq!(events.len(), 1);
		match &events[0] {
			Web3Event::TransactionConfirmed(payload) => {
				assert_eq!(payload.chain, "polygon");
				assert_eq!(payload.result.hash, result.hash);
			}
			other => panic!("unexpected event {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_failures_publish_error_events() {
		let client = client();
		let seen = record(&client, EventName::Error);

		let err = client.get_balance(ADDRESS, Some("cosmos")).await.unwrap_err();
		assert_eq!(err.kind(), Some(ErrorKind::ProviderNotFound));

		let events = seen.lock().unwrap();
		assert_eq!(events.len(), 1);
		match &events[0] {
			Web3Event::Error(payload) => {
				assert_eq!(payload.operation, "getBalance");
				assert_eq!(payload.chain.as_ref().unwrap(), "cosmos");
				assert_eq!(payload.kind, ErrorKind::ProviderNotFound);
			}
			other => panic!("unexpected event {:?}", other),
		}
	}

	#[test]
	fn test_from_config_applies_enabled_chains_and_overrides() {
		let config = licensechain_config::ConfigLoader::from_toml(
			r#"
[client]
api_key = "key"

[chains]
default = "solana"
enabled = ["solana", "polkadot"]

[chains.overrides.solana]
rpc_url = "https://solana.example.com"
"#,
		)
		.unwrap();

		let client = LicenseChainWeb3::from_config(&config).unwrap();
		assert_eq!(
			client.get_supported_chains(),
			vec![ChainId::new("solana"), ChainId::new("polkadot")]
		);
		assert_eq!(client.default_chain(), "solana");
		assert_eq!(
			client.get_chain_config("solana").unwrap().rpc_url,
			"https://solana.example.com"
		);
		assert!(client.get_chain_config("ethereum").is_err());
	}

	#[test]
	fn test_from_config_rejects_unknown_chain() {
		let mut config = licensechain_config::ConfigLoader::from_toml("[client]\napi_key = \"key\"")
			.unwrap();
		config.chains.enabled.push(ChainId::new("cosmos"));

		let err = LicenseChainWeb3::from_config(&config).unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}
}
