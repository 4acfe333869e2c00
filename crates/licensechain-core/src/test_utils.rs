//! Mock adapter shared by the manager and orchestrator tests.

use async_trait::async_trait;
use licensechain_types::{
	ChainAdapter, ChainConfig, ChainError, ChainResult, NativeCurrency, SmartContractCall,
	TransactionResult, TransactionStatus,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Adapter that counts lifecycle calls and fails on demand.
#[derive(Debug, Default)]
pub struct MockAdapter {
	chain_id: u64,
	balance: String,
	fail_connect: bool,
	fail_disconnect: bool,
	fail_send: bool,
	fail_contract: bool,
	connected: AtomicBool,
	connects: AtomicUsize,
	disconnects: AtomicUsize,
	operations: AtomicUsize,
}

impl MockAdapter {
	pub fn new(chain_id: u64) -> Self {
		Self {
			chain_id,
			balance: "1000000000000000000".to_string(),
			..Default::default()
		}
	}

	pub fn with_balance(mut self, balance: &str) -> Self {
		self.balance = balance.to_string();
		self
	}

	pub fn failing_connect(mut self) -> Self {
		self.fail_connect = true;
		self
	}

	pub fn failing_disconnect(mut self) -> Self {
		self.fail_disconnect = true;
		self
	}

	pub fn failing_send(mut self) -> Self {
		self.fail_send = true;
		self
	}

	pub fn failing_contract(mut self) -> Self {
		self.fail_contract = true;
		self
	}

	pub fn shared(self) -> Arc<Self> {
		Arc::new(self)
	}

	pub fn connects(&self) -> usize {
		self.connects.load(Ordering::SeqCst)
	}

	pub fn disconnects(&self) -> usize {
		self.disconnects.load(Ordering::SeqCst)
	}

	/// Number of data operations that reached the adapter.
	pub fn operations(&self) -> usize {
		self.operations.load(Ordering::SeqCst)
	}

	pub fn is_connected(&self) -> bool {
		self.connected.load(Ordering::SeqCst)
	}

	fn begin_operation(&self) -> ChainResult<()> {
		self.operations.fetch_add(1, Ordering::SeqCst);
		if self.is_connected() {
			Ok(())
		} else {
			Err(ChainError::NotConnected)
		}
	}
}

#[async_trait]
impl ChainAdapter for MockAdapter {
	async fn connect(&self) -> ChainResult<()> {
		self.connects.fetch_add(1, Ordering::SeqCst);
		if self.fail_connect {
			return Err(ChainError::Network("connection refused".to_string()));
		}
		self.connected.store(true, Ordering::SeqCst);
		Ok(())
	}

	async fn disconnect(&self) -> ChainResult<()> {
		self.disconnects.fetch_add(1, Ordering::SeqCst);
		self.connected.store(false, Ordering::SeqCst);
		if self.fail_disconnect {
			return Err(ChainError::Network("socket already closed".to_string()));
		}
		Ok(())
	}

	async fn get_balance(&self, _address: &str) -> ChainResult<String> {
		self.begin_operation()?;
		Ok(self.balance.clone())
	}

	async fn send_transaction(&self, _to: &str, amount: &str) -> ChainResult<TransactionResult> {
		self.begin_operation()?;
		if self.fail_send {
			return Err(ChainError::Transaction("insufficient funds".to_string()));
		}
		Ok(TransactionResult {
			hash: format!("0x{:064x}", self.chain_id),
			block_number: Some(42),
			gas_used: Some("21000".to_string()),
			status: if amount == "0" {
				TransactionStatus::Failed
			} else {
				TransactionStatus::Success
			},
		})
	}

	async fn call_contract(&self, call: &SmartContractCall) -> ChainResult<serde_json::Value> {
		self.begin_operation()?;
		if self.fail_contract {
			return Err(ChainError::Contract("execution reverted".to_string()));
		}
		Ok(serde_json::json!({ "method": call.method, "params": call.parameters }))
	}

	async fn deploy_contract(
		&self,
		_bytecode: &str,
		_abi: &[serde_json::Value],
		_constructor_args: &[serde_json::Value],
	) -> ChainResult<String> {
		self.begin_operation()?;
		if self.fail_contract {
			return Err(ChainError::Contract("out of gas".to_string()));
		}
		Ok("0x00000000000000000000000000000000000000aa".to_string())
	}

	fn chain_config(&self) -> ChainConfig {
		ChainConfig {
			chain_id: self.chain_id,
			name: format!("Mock {}", self.chain_id),
			rpc_url: "http://localhost:8545".to_string(),
			explorer_url: "http://localhost:4000".to_string(),
			native_currency: NativeCurrency {
				name: "Mock".to_string(),
				symbol: "MCK".to_string(),
				decimals: 18,
			},
		}
	}
}
