//! Registry for managing chain adapters.
//!
//! The `ChainRegistry` maps chain identifiers to adapter instances. It is the
//! only place where a chain name is turned into something that can be called.
//!
//! # Ordering
//!
//! Chains are listed in the order they were first registered. Re-registering
//! an identifier replaces its adapter in place without moving it.
//!
//! # Thread Safety
//!
//! The registry itself is not synchronized; registration takes `&mut self`.
//! Adapters are stored as `Arc<dyn ChainAdapter>` so resolved handles can be
//! shared freely across tasks.

use licensechain_types::{ChainAdapter, ChainId, Result, Web3Error};
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::{debug, info};

/// Registry of chain adapters keyed by chain identifier.
pub struct ChainRegistry {
	adapters: HashMap<ChainId, Arc<dyn ChainAdapter>>,
	order: Vec<ChainId>,
}

impl ChainRegistry {
	/// Creates a new empty registry.
	pub fn new() -> Self {
		Self {
			adapters: HashMap::new(),
			order: Vec::new(),
		}
	}

	/// Registers an adapter under `chain_id`.
	///
	/// An existing registration for the same identifier is replaced and
	/// returned; the last registration wins.
	pub fn register(
		&mut self,
		chain_id: impl Into<ChainId>,
		adapter: Arc<dyn ChainAdapter>,
	) -> Option<Arc<dyn ChainAdapter>> {
		let chain_id = chain_id.into();
		let replaced = self.adapters.insert(chain_id.clone(), adapter);

		if replaced.is_some() {
			info!("Replacing chain adapter for {}", chain_id);
		} else {
			debug!("Registering chain adapter for {}", chain_id);
			self.order.push(chain_id);
		}

		replaced
	}

	/// Retrieves the adapter for a chain, if registered.
	pub fn get(&self, chain_id: &str) -> Option<Arc<dyn ChainAdapter>> {
		self.adapters.get(chain_id).cloned()
	}

	/// Retrieves the adapter for a chain, failing with
	/// `Web3Error::ProviderNotFound` when it is not registered.
	pub fn resolve(&self, chain_id: &str) -> Result<Arc<dyn ChainAdapter>> {
		self.get(chain_id).ok_or_else(|| Web3Error::ProviderNotFound {
			chain: ChainId::from(chain_id),
		})
	}

	/// Returns the registered chain identifiers in registration order.
	pub fn chains(&self) -> Vec<ChainId> {
		self.order.clone()
	}

	/// Iterates over `(chain, adapter)` pairs in registration order.
	pub fn iter(&self) -> impl Iterator<Item = (&ChainId, &Arc<dyn ChainAdapter>)> {
		self.order
			.iter()
			.filter_map(|id| self.adapters.get_key_value(id))
	}

	pub fn contains(&self, chain_id: &str) -> bool {
		self.adapters.contains_key(chain_id)
	}

	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}
}

impl Default for ChainRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for ChainRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChainRegistry")
			.field("adapters", &self.order)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use licensechain_types::{
		ChainConfig, ChainResult, ErrorKind, NativeCurrency, SmartContractCall, TransactionResult,
	};

	// Mock chain adapter for testing
	#[derive(Debug)]
	struct MockAdapter {
		chain_id: u64,
	}

	#[async_trait]
	impl ChainAdapter for MockAdapter {
		async fn connect(&self) -> ChainResult<()> {
			Ok(())
		}
		async fn disconnect(&self) -> ChainResult<()> {
			Ok(())
		}
		async fn get_balance(&self, _: &str) -> ChainResult<String> {
			Ok("0".to_string())
		}
		async fn send_transaction(&self, _: &str, _: &str) -> ChainResult<TransactionResult> {
			Ok(TransactionResult::pending("0x0"))
		}
		async fn call_contract(&self, _: &SmartContractCall) -> ChainResult<serde_json::Value> {
			Ok(serde_json::Value::Null)
		}
		async fn deploy_contract(
			&self,
			_: &str,
			_: &[serde_json::Value],
			_: &[serde_json::Value],
		) -> ChainResult<String> {
			Ok("0x0".to_string())
		}
		fn chain_config(&self) -> ChainConfig {
			ChainConfig {
				chain_id: self.chain_id,
				name: "Mock".to_string(),
				rpc_url: "http://localhost:8545".to_string(),
				explorer_url: "http://localhost".to_string(),
				native_currency: NativeCurrency {
					name: "Mock".to_string(),
					symbol: "MCK".to_string(),
					decimals: 18,
				},
			}
		}
	}

	fn mock(chain_id: u64) -> Arc<dyn ChainAdapter> {
		Arc::new(MockAdapter { chain_id })
	}

	#[test]
	fn test_registry_register_and_get() {
		let mut registry = ChainRegistry::new();
		assert!(registry.register("ethereum", mock(1)).is_none());

		let retrieved = registry.get("ethereum").unwrap();
		assert_eq!(retrieved.chain_config().chain_id, 1);
		assert!(registry.get("polygon").is_none());
		assert!(registry.contains("ethereum"));
	}

	#[test]
	fn test_registry_lookup_is_case_sensitive() {
		let mut registry = ChainRegistry::new();
		registry.register("ethereum", mock(1));
		assert!(registry.get("Ethereum").is_none());
	}

	#[test]
	fn test_registry_overwrite_replaces_adapter() {
		let mut registry = ChainRegistry::new();
		registry.register("ethereum", mock(1));
		registry.register("polygon", mock(137));

		let replaced = registry.register("ethereum", mock(5));
		assert_eq!(replaced.unwrap().chain_config().chain_id, 1);

		// Latest adapter wins, position is kept
		assert_eq!(registry.resolve("ethereum").unwrap().chain_config().chain_id, 5);
		assert_eq!(registry.chains(), vec![ChainId::new("ethereum"), ChainId::new("polygon")]);
		assert_eq!(registry.len(), 2);
	}

	#[test]
	fn test_resolve_unregistered_chain() {
		let registry = ChainRegistry::new();
		let err = registry.resolve("avalanche").err().unwrap();

		assert_eq!(err.kind(), ErrorKind::ProviderNotFound);
		assert_eq!(err.chain(), "avalanche");
		assert_eq!(err.to_string(), "Provider for chain 'avalanche' not found");
	}

	#[test]
	fn test_list_chains_in_registration_order() {
		let mut registry = ChainRegistry::new();
		assert!(registry.chains().is_empty());
		assert!(registry.is_empty());

		registry.register("ethereum", mock(1));
		registry.register("polygon", mock(137));
		registry.register("arbitrum", mock(42161));

		assert_eq!(
			registry.chains(),
			vec![
				ChainId::new("ethereum"),
				ChainId::new("polygon"),
				ChainId::new("arbitrum")
			]
		);

		let ids: Vec<u64> = registry
			.iter()
			.map(|(_, adapter)| adapter.chain_config().chain_id)
			.collect();
		assert_eq!(ids, vec![1, 137, 42161]);
	}
}
