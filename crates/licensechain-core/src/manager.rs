//! Chain-agnostic dispatch over the adapter registry.
//!
//! Every blockchain operation follows the same path: resolve the adapter for
//! the requested chain, connect it, run the operation and scope any failure
//! to the chain it happened on. Connecting is delegated to the adapter on
//! every call, so adapters are expected to treat repeated connects as cheap.

use crate::event_bus::{EventBus, Listener};
use crate::transfer::CrossChainOrchestrator;
use futures::future::join_all;
use licensechain_chains::ChainRegistry;
use licensechain_types::{
	ChainAdapter, ChainConfig, ChainId, ContractOperation, CrossChainTransfer, EventName, Result,
	SmartContractCall, TransactionResult, Web3Error,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routes operations to the adapter registered for a chain.
#[derive(Debug, Default)]
pub struct MultiChainManager {
	registry: ChainRegistry,
	events: EventBus,
}

impl MultiChainManager {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a manager that publishes on an existing bus.
	pub fn with_event_bus(events: EventBus) -> Self {
		Self {
			registry: ChainRegistry::new(),
			events,
		}
	}

	/// Registers `adapter` for `chain`, returning the adapter it replaced.
	pub fn add_provider(
		&mut self,
		chain: impl Into<ChainId>,
		adapter: Arc<dyn ChainAdapter>,
	) -> Option<Arc<dyn ChainAdapter>> {
		self.registry.register(chain, adapter)
	}

	pub fn provider(&self, chain: &str) -> Result<Arc<dyn ChainAdapter>> {
		self.registry.resolve(chain)
	}

	pub fn registry(&self) -> &ChainRegistry {
		&self.registry
	}

	pub fn events(&self) -> &EventBus {
		&self.events
	}

	async fn connected(&self, chain: &str) -> Result<Arc<dyn ChainAdapter>> {
		let adapter = self.registry.resolve(chain)?;
		adapter.connect().await.map_err(|e| Web3Error::Network {
			chain: ChainId::from(chain),
			source: e,
		})?;
		Ok(adapter)
	}

	pub async fn get_balance(&self, address: &str, chain: &str) -> Result<String> {
		let adapter = self.connected(chain).await?;
		adapter
			.get_balance(address)
			.await
			.map_err(|e| Web3Error::Balance {
				chain: ChainId::from(chain),
				source: e,
			})
	}

	pub async fn send_transaction(
		&self,
		to: &str,
		amount: &str,
		chain: &str,
	) -> Result<TransactionResult> {
		let adapter = self.connected(chain).await?;
		let result = adapter
			.send_transaction(to, amount)
			.await
			.map_err(|e| Web3Error::Transaction {
				chain: ChainId::from(chain),
				source: e,
			})?;

		debug!("Sent transaction {} on {}", result.hash, chain);
		Ok(result)
	}

	pub async fn call_contract(
		&self,
		call: &SmartContractCall,
		chain: &str,
	) -> Result<serde_json::Value> {
		let adapter = self.connected(chain).await?;
		adapter
			.call_contract(call)
			.await
			.map_err(|e| Web3Error::Contract {
				chain: ChainId::from(chain),
				operation: ContractOperation::Call,
				source: e,
			})
	}

	pub async fn deploy_contract(
		&self,
		bytecode: &str,
		abi: &[serde_json::Value],
		constructor_args: &[serde_json::Value],
		chain: &str,
	) -> Result<String> {
		let adapter = self.connected(chain).await?;
		let address = adapter
			.deploy_contract(bytecode, abi, constructor_args)
			.await
			.map_err(|e| Web3Error::Contract {
				chain: ChainId::from(chain),
				operation: ContractOperation::Deploy,
				source: e,
			})?;

		info!("Deployed contract at {} on {}", address, chain);
		Ok(address)
	}

	/// Moves funds from `transfer.from_chain` towards `transfer.to_chain`.
	///
	/// See `CrossChainOrchestrator::execute` for the failure semantics.
	pub async fn transfer_cross_chain(
		&self,
		transfer: &CrossChainTransfer,
	) -> Result<TransactionResult> {
		CrossChainOrchestrator::new(&self.registry, &self.events)
			.execute(transfer)
			.await
	}

	/// Registered chains in registration order.
	pub fn supported_chains(&self) -> Vec<ChainId> {
		self.registry.chains()
	}

	pub fn chain_config(&self, chain: &str) -> Result<ChainConfig> {
		Ok(self.registry.resolve(chain)?.chain_config())
	}

	pub fn on(&self, name: EventName, listener: Listener) -> bool {
		self.events.subscribe(name, listener)
	}

	pub fn off(&self, name: EventName, listener: &Listener) -> bool {
		self.events.unsubscribe(name, listener)
	}

	/// Disconnects every registered adapter concurrently.
	///
	/// Individual failures are logged and never reported to the caller.
	pub async fn disconnect(&self) {
		let results = join_all(self.registry.iter().map(|(chain, adapter)| {
			let chain = chain.clone();
			let adapter = adapter.clone();
			async move { (chain, adapter.disconnect().await) }
		}))
		.await;

		let mut failed = 0;
		for (chain, result) in results {
			if let Err(e) = result {
				failed += 1;
				warn!("Error disconnecting from {}: {}", chain, e);
			}
		}

		info!(
			"Disconnected {} chain adapter(s), {} failed",
			self.registry.len(),
			failed
		);
	}
}
