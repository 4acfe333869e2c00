//! Transaction, contract call and cross-chain transfer descriptors.

use crate::ChainId;
use serde::{Deserialize, Serialize};

/// Submission outcome of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
	Pending,
	Success,
	Failed,
}

/// Result of a send or transfer, as returned by an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
	/// Opaque transaction identifier.
	pub hash: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub block_number: Option<u64>,
	/// Gas or fee used, as a decimal string.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_used: Option<String>,
	pub status: TransactionStatus,
}

impl TransactionResult {
	pub fn pending(hash: impl Into<String>) -> Self {
		Self {
			hash: hash.into(),
			block_number: None,
			gas_used: None,
			status: TransactionStatus::Pending,
		}
	}

	pub fn is_success(&self) -> bool {
		self.status == TransactionStatus::Success
	}
}

/// A contract method invocation, passed through to the adapter unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartContractCall {
	pub contract_address: String,
	pub method: String,
	#[serde(default)]
	pub parameters: Vec<serde_json::Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_limit: Option<u64>,
}

impl SmartContractCall {
	pub fn new(contract_address: impl Into<String>, method: impl Into<String>) -> Self {
		Self {
			contract_address: contract_address.into(),
			method: method.into(),
			parameters: Vec::new(),
			value: None,
			gas_limit: None,
		}
	}

	pub fn with_parameters(mut self, parameters: Vec<serde_json::Value>) -> Self {
		self.parameters = parameters;
		self
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
		self.gas_limit = Some(gas_limit);
		self
	}
}

/// Caller-constructed description of a transfer between two chains.
///
/// No amount or address format check is applied by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainTransfer {
	pub from_chain: ChainId,
	pub to_chain: ChainId,
	pub token_address: String,
	/// Amount in the smallest denomination, as a decimal string.
	pub amount: String,
	pub recipient: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bridge_protocol: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_transaction_result_omits_absent_fields() {
		let result = TransactionResult::pending("0xabc");
		let json = serde_json::to_value(&result).unwrap();
		assert_eq!(json, json!({ "hash": "0xabc", "status": "pending" }));
		assert!(!result.is_success());
	}

	#[test]
	fn test_contract_call_builder() {
		let call = SmartContractCall::new("0x742d35cc6634c0532925a3b8d4c9db96c4b4d8b6", "balanceOf")
			.with_parameters(vec![json!("0x742d35cc6634c0532925a3b8d4c9db96c4b4d8b6")])
			.with_gas_limit(100_000);

		assert_eq!(call.method, "balanceOf");
		assert_eq!(call.parameters.len(), 1);
		assert_eq!(call.gas_limit, Some(100_000));
		assert!(call.value.is_none());
	}

	#[test]
	fn test_cross_chain_transfer_from_wire() {
		let transfer: CrossChainTransfer = serde_json::from_value(json!({
			"fromChain": "ethereum",
			"toChain": "polygon",
			"tokenAddress": "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6",
			"amount": "1000000000000000000",
			"recipient": "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6",
			"bridgeProtocol": "polygon-bridge"
		}))
		.unwrap();

		assert_eq!(transfer.from_chain, "ethereum");
		assert_eq!(transfer.to_chain, "polygon");
		assert_eq!(transfer.bridge_protocol.as_deref(), Some("polygon-bridge"));
	}
}
