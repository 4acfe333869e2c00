//! Event names and payloads published on the event bus.

use crate::{ChainId, CrossChainTransfer, ErrorKind, TransactionResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name under which listeners subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
	#[serde(rename = "crossChainTransfer")]
	CrossChainTransfer,
	#[serde(rename = "transactionConfirmed")]
	TransactionConfirmed,
	#[serde(rename = "error")]
	Error,
}

impl EventName {
	pub fn as_str(&self) -> &'static str {
		match self {
			EventName::CrossChainTransfer => "crossChainTransfer",
			EventName::TransactionConfirmed => "transactionConfirmed",
			EventName::Error => "error",
		}
	}
}

impl fmt::Display for EventName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for EventName {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"crossChainTransfer" => Ok(EventName::CrossChainTransfer),
			"transactionConfirmed" => Ok(EventName::TransactionConfirmed),
			"error" => Ok(EventName::Error),
			other => Err(format!("Unknown event name: {}", other)),
		}
	}
}

/// Payload of a completed cross-chain transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainTransferEvent {
	#[serde(flatten)]
	pub transfer: CrossChainTransfer,
	pub transaction_hash: String,
}

/// Payload of a transaction that was reported successful by its adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionConfirmedEvent {
	pub chain: ChainId,
	pub result: TransactionResult,
}

/// Payload of a failed blockchain operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
	pub operation: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub chain: Option<ChainId>,
	pub kind: ErrorKind,
	pub message: String,
}

/// Events published by the client. Each variant has exactly one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum Web3Event {
	#[serde(rename = "crossChainTransfer")]
	CrossChainTransfer(CrossChainTransferEvent),
	#[serde(rename = "transactionConfirmed")]
	TransactionConfirmed(TransactionConfirmedEvent),
	#[serde(rename = "error")]
	Error(ErrorEvent),
}

impl Web3Event {
	pub fn name(&self) -> EventName {
		match self {
			Web3Event::CrossChainTransfer(_) => EventName::CrossChainTransfer,
			Web3Event::TransactionConfirmed(_) => EventName::TransactionConfirmed,
			Web3Event::Error(_) => EventName::Error,
		}
	}
}
