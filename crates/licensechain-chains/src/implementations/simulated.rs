//! Simulated chain adapter.
//!
//! Serves a chain descriptor and synthetic balances, hashes and addresses
//! without any network access. Data operations require a prior `connect`,
//! mirroring the lifecycle of a real provider.

use super::ChainFamily;
use async_trait::async_trait;
use licensechain_types::{
	ChainAdapter, ChainConfig, ChainError, ChainResult, SmartContractCall, TransactionResult,
	TransactionStatus,
};
use serde_json::json;
use sha3::{Digest, Keccak256};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

/// Upper bound (exclusive) of synthetic block numbers.
const BLOCK_NUMBER_RANGE: u64 = 1_000_000;

/// Adapter returning synthetic data for one chain.
///
/// The connected flag is a plain atomic; concurrent connect/disconnect
/// calls race on it without further coordination.
#[derive(Debug)]
pub struct SimulatedAdapter {
	family: ChainFamily,
	config: ChainConfig,
	/// Balance reported for every address, in the smallest denomination.
	balance: String,
	connected: AtomicBool,
	nonce: AtomicU64,
}

impl SimulatedAdapter {
	/// Creates an adapter reporting one whole native unit as every balance.
	pub fn new(family: ChainFamily, config: ChainConfig) -> Self {
		let balance = format!("1{}", "0".repeat(config.native_currency.decimals as usize));
		Self {
			family,
			config,
			balance,
			connected: AtomicBool::new(false),
			nonce: AtomicU64::new(0),
		}
	}

	pub fn with_balance(mut self, balance: impl Into<String>) -> Self {
		self.balance = balance.into();
		self
	}

	pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
		self.config.rpc_url = rpc_url.into();
		self
	}

	pub fn with_explorer_url(mut self, explorer_url: impl Into<String>) -> Self {
		self.config.explorer_url = explorer_url.into();
		self
	}

	pub fn family(&self) -> ChainFamily {
		self.family
	}

	pub fn is_connected(&self) -> bool {
		self.connected.load(Ordering::SeqCst)
	}

	fn ensure_connected(&self) -> ChainResult<()> {
		if self.is_connected() {
			Ok(())
		} else {
			Err(ChainError::NotConnected)
		}
	}

	/// Derives a fresh 32-byte digest from the chain, the inputs and a
	/// per-adapter nonce.
	fn next_digest(&self, parts: &[&str]) -> [u8; 32] {
		let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
		let mut hasher = Keccak256::new();
		hasher.update(self.config.name.as_bytes());
		for part in parts {
			hasher.update(part.as_bytes());
		}
		hasher.update(nonce.to_be_bytes());
		hasher.update(uuid::Uuid::new_v4().as_bytes());

		let mut digest = [0u8; 32];
		digest.copy_from_slice(&hasher.finalize());
		digest
	}

	fn encode(&self, bytes: &[u8]) -> String {
		if self.family.hex_prefixed() {
			format!("0x{}", hex::encode(bytes))
		} else {
			hex::encode(bytes)
		}
	}
}

#[async_trait]
impl ChainAdapter for SimulatedAdapter {
	async fn connect(&self) -> ChainResult<()> {
		if !self.connected.swap(true, Ordering::SeqCst) {
			debug!("Connected to {}", self.config.name);
		}
		Ok(())
	}

	async fn disconnect(&self) -> ChainResult<()> {
		if self.connected.swap(false, Ordering::SeqCst) {
			debug!("Disconnected from {}", self.config.name);
		}
		Ok(())
	}

	async fn get_balance(&self, _address: &str) -> ChainResult<String> {
		self.ensure_connected()?;
		Ok(self.balance.clone())
	}

	async fn send_transaction(&self, to: &str, amount: &str) -> ChainResult<TransactionResult> {
		self.ensure_connected()?;

		let digest = self.next_digest(&[to, amount]);
		let mut block_bytes = [0u8; 8];
		block_bytes.copy_from_slice(&digest[..8]);
		let block_number = u64::from_be_bytes(block_bytes) % BLOCK_NUMBER_RANGE;

		Ok(TransactionResult {
			hash: self.encode(&digest),
			block_number: Some(block_number),
			gas_used: Some(self.family.transfer_gas().to_string()),
			status: TransactionStatus::Success,
		})
	}

	async fn call_contract(&self, _call: &SmartContractCall) -> ChainResult<serde_json::Value> {
		self.ensure_connected()?;
		Ok(json!({ "result": self.family.call_result() }))
	}

	async fn deploy_contract(
		&self,
		bytecode: &str,
		_abi: &[serde_json::Value],
		_constructor_args: &[serde_json::Value],
	) -> ChainResult<String> {
		self.ensure_connected()?;

		let digest = self.next_digest(&[bytecode]);
		// Addresses take the low 20 bytes, as EVM contract addresses do
		Ok(self.encode(&digest[12..]))
	}

	fn chain_config(&self) -> ChainConfig {
		self.config.clone()
	}
}
