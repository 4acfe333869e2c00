//! Cross-chain transfer orchestration.
//!
//! A transfer moves through `Initiated -> SourceConnecting ->
//! DestinationConnecting -> Transferring` and ends in `Completed` or
//! `Failed`. There is no retry and no compensation: when the destination
//! fails to connect, the source stays connected.
//!
//! Only the source leg is executed. The destination adapter is connected as
//! a readiness check; releasing or minting on the destination chain is not
//! implemented.

use crate::event_bus::EventBus;
use licensechain_chains::ChainRegistry;
use licensechain_types::{
	ChainAdapter, CrossChainTransfer, CrossChainTransferEvent, Result, TransactionResult,
	Web3Error, Web3Event,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Phase of a single cross-chain transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
	Initiated,
	SourceConnecting,
	DestinationConnecting,
	Transferring,
	Completed,
	Failed,
}

impl TransferPhase {
	pub fn is_terminal(&self) -> bool {
		matches!(self, TransferPhase::Completed | TransferPhase::Failed)
	}
}

impl fmt::Display for TransferPhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			TransferPhase::Initiated => "initiated",
			TransferPhase::SourceConnecting => "source-connecting",
			TransferPhase::DestinationConnecting => "destination-connecting",
			TransferPhase::Transferring => "transferring",
			TransferPhase::Completed => "completed",
			TransferPhase::Failed => "failed",
		};
		f.write_str(name)
	}
}

/// Coordinates the source and destination adapters of a transfer.
pub struct CrossChainOrchestrator<'a> {
	registry: &'a ChainRegistry,
	events: &'a EventBus,
}

impl<'a> CrossChainOrchestrator<'a> {
	pub fn new(registry: &'a ChainRegistry, events: &'a EventBus) -> Self {
		Self { registry, events }
	}

	/// Executes `transfer`.
	///
	/// Unregistered chains fail with `Web3Error::ProviderNotFound` before any
	/// adapter is touched. Every later failure is wrapped in
	/// `Web3Error::CrossChainTransfer`. A `crossChainTransfer` event is
	/// published only on success.
	pub async fn execute(&self, transfer: &CrossChainTransfer) -> Result<TransactionResult> {
		let source = self.registry.resolve(transfer.from_chain.as_str())?;
		let destination = self.registry.resolve(transfer.to_chain.as_str())?;

		let mut phase = TransferPhase::Initiated;
		debug!(
			"Cross-chain transfer {} -> {} {}",
			transfer.from_chain, transfer.to_chain, phase
		);

		match self
			.run(transfer, &source, &destination, &mut phase)
			.await
		{
			Ok(result) => {
				phase = TransferPhase::Completed;
				info!(
					"Cross-chain transfer {} -> {} {} with hash {}",
					transfer.from_chain, transfer.to_chain, phase, result.hash
				);

				self.events
					.publish(Web3Event::CrossChainTransfer(CrossChainTransferEvent {
						transfer: transfer.clone(),
						transaction_hash: result.hash.clone(),
					}));

				Ok(result)
			}
			Err(error) => {
				warn!(
					"Cross-chain transfer {} -> {} {} during {}: {}",
					transfer.from_chain,
					transfer.to_chain,
					TransferPhase::Failed,
					phase,
					error
				);

				Err(Web3Error::CrossChainTransfer {
					from: transfer.from_chain.clone(),
					to: transfer.to_chain.clone(),
					source: Box::new(error),
				})
			}
		}
	}

	async fn run(
		&self,
		transfer: &CrossChainTransfer,
		source: &Arc<dyn ChainAdapter>,
		destination: &Arc<dyn ChainAdapter>,
		phase: &mut TransferPhase,
	) -> Result<TransactionResult> {
		*phase = TransferPhase::SourceConnecting;
		source.connect().await.map_err(|e| Web3Error::Network {
			chain: transfer.from_chain.clone(),
			source: e,
		})?;

		*phase = TransferPhase::DestinationConnecting;
		destination.connect().await.map_err(|e| Web3Error::Network {
			chain: transfer.to_chain.clone(),
			source: e,
		})?;
		debug!(
			"Destination {} connected as readiness check only; no destination leg is executed",
			transfer.to_chain
		);

		*phase = TransferPhase::Transferring;
		source
			.send_transaction(&transfer.recipient, &transfer.amount)
			.await
			.map_err(|e| Web3Error::Transaction {
				chain: transfer.from_chain.clone(),
				source: e,
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event_bus::listener;
	use crate::test_utils::MockAdapter;
	use licensechain_types::{ChainId, ErrorKind, EventName};
	use std::sync::Mutex;

	fn transfer(from: &str, to: &str) -> CrossChainTransfer {
		CrossChainTransfer {
			from_chain: ChainId::new(from),
			to_chain: ChainId::new(to),
			token_address: "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6".to_string(),
			amount: "1000000000000000000".to_string(),
			recipient: "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6".to_string(),
			bridge_protocol: Some("polygon-bridge".to_string()),
		}
	}

	fn recorder(bus: &EventBus) -> Arc<Mutex<Vec<Web3Event>>> {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink = seen.clone();
		bus.subscribe(
			EventName::CrossChainTransfer,
			listener(move |event| {
				sink.lock().unwrap().push(event.clone());
				Ok(())
			}),
		);
		seen
	}

	#[tokio::test]
	async fn test_successful_transfer_publishes_matching_hash() {
		let source = MockAdapter::new(1).shared();
		let destination = MockAdapter::new(137).shared();
		let mut registry = ChainRegistry::new();
		registry.register("ethereum", source.clone());
		registry.register("polygon", destination.clone());
		let bus = EventBus::default();
		let seen = recorder(&bus);

		let request = transfer("ethereum", "polygon");
		let result = CrossChainOrchestrator::new(&registry, &bus)
			.execute(&request)
			.await
			.unwrap();

		let events = seen.lock().unwrap();
		assert_eq!(events.len(), 1);
		match &events[0] {
			Web3Event::CrossChainTransfer(payload) => {
				assert_eq!(payload.transaction_hash, result.hash);
				assert_eq!(payload.transfer, request);
			}
			other => panic!("unexpected event {:?}", other),
		}

		assert_eq!(source.connects(), 1);
		assert_eq!(destination.connects(), 1);
		// The destination is never asked to move funds
		assert_eq!(source.operations(), 1);
		assert_eq!(destination.operations(), 0);
	}

	#[tokio::test]
	async fn test_unregistered_destination_fails_before_connecting() {
		let source = MockAdapter::new(1).shared();
		let mut registry = ChainRegistry::new();
		registry.register("ethereum", source.clone());
		let bus = EventBus::default();
		let seen = recorder(&bus);

		let err = CrossChainOrchestrator::new(&registry, &bus)
			.execute(&transfer("ethereum", "polygon"))
			.await
			.unwrap_err();

		assert_eq!(err.kind(), ErrorKind::ProviderNotFound);
		assert_eq!(err.chain(), "polygon");
		assert_eq!(source.connects(), 0);
		assert!(seen.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_destination_connect_failure_keeps_source_connected() {
		let source = MockAdapter::new(1).shared();
		let destination = MockAdapter::new(137).failing_connect().shared();
		let mut registry = ChainRegistry::new();
		registry.register("ethereum", source.clone());
		registry.register("polygon", destination.clone());
		let bus = EventBus::default();
		let seen = recorder(&bus);

		let err = CrossChainOrchestrator::new(&registry, &bus)
			.execute(&transfer("ethereum", "polygon"))
			.await
			.unwrap_err();

		assert_eq!(err.kind(), ErrorKind::CrossChainError);
		assert_eq!(err.root_kind(), ErrorKind::NetworkError);
		assert_eq!(err.chain(), "polygon");
		assert!(source.is_connected());
		assert_eq!(source.operations(), 0);
		assert!(seen.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_source_connect_failure_skips_destination() {
		let source = MockAdapter::new(1).failing_connect().shared();
		let destination = MockAdapter::new(137).shared();
		let mut registry = ChainRegistry::new();
		registry.register("ethereum", source.clone());
		registry.register("polygon", destination.clone());
		let bus = EventBus::default();

		let err = CrossChainOrchestrator::new(&registry, &bus)
			.execute(&transfer("ethereum", "polygon"))
			.await
			.unwrap_err();

		assert_eq!(err.kind(), ErrorKind::CrossChainError);
		assert_eq!(err.chain(), "ethereum");
		assert_eq!(destination.connects(), 0);
	}

	#[tokio::test]
	async fn test_send_failure_is_wrapped_without_event() {
		let mut registry = ChainRegistry::new();
		registry.register("ethereum", MockAdapter::new(1).failing_send().shared());
		registry.register("polygon", MockAdapter::new(137).shared());
		let bus = EventBus::default();
		let seen = recorder(&bus);

		let err = CrossChainOrchestrator::new(&registry, &bus)
			.execute(&transfer("ethereum", "polygon"))
			.await
			.unwrap_err();

		assert_eq!(err.kind(), ErrorKind::CrossChainError);
		assert_eq!(err.root_kind(), ErrorKind::TransactionError);
		assert!(err.to_string().contains("insufficient funds"));
		assert!(seen.lock().unwrap().is_empty());
	}

	#[test]
	fn test_terminal_phases() {
		assert!(TransferPhase::Completed.is_terminal());
		assert!(TransferPhase::Failed.is_terminal());
		assert!(!TransferPhase::Transferring.is_terminal());
		assert_eq!(TransferPhase::DestinationConnecting.to_string(), "destination-connecting");
	}
}
