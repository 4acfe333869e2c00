//! Error types for the multi-chain client.
//!
//! Two layers are distinguished. `ChainError` is what an adapter reports;
//! `Web3Error` is what the multi-chain manager surfaces, always scoped to
//! the chain the operation ran against and preserving the adapter error as
//! its source.

use crate::ChainId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type ChainResult<T> = std::result::Result<T, ChainError>;

pub type Result<T> = std::result::Result<T, Web3Error>;

/// Code-like discriminant shared by every error in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
	NotConnected,
	ProviderNotFound,
	NetworkError,
	BalanceError,
	TransactionError,
	ContractError,
	CrossChainError,
	AuthenticationError,
	RateLimitError,
	ValidationError,
}

impl ErrorKind {
	pub fn code(&self) -> &'static str {
		match self {
			ErrorKind::NotConnected => "NOT_CONNECTED",
			ErrorKind::ProviderNotFound => "PROVIDER_NOT_FOUND",
			ErrorKind::NetworkError => "NETWORK_ERROR",
			ErrorKind::BalanceError => "BALANCE_ERROR",
			ErrorKind::TransactionError => "TRANSACTION_ERROR",
			ErrorKind::ContractError => "CONTRACT_ERROR",
			ErrorKind::CrossChainError => "CROSS_CHAIN_ERROR",
			ErrorKind::AuthenticationError => "AUTHENTICATION_ERROR",
			ErrorKind::RateLimitError => "RATE_LIMIT_ERROR",
			ErrorKind::ValidationError => "VALIDATION_ERROR",
		}
	}
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

/// Errors reported by a chain adapter.
#[derive(Debug, Error)]
pub enum ChainError {
	#[error("Provider not connected")]
	NotConnected,

	#[error("Network error: {0}")]
	Network(String),

	#[error("Balance error: {0}")]
	Balance(String),

	#[error("Transaction error: {0}")]
	Transaction(String),

	#[error("Contract error: {0}")]
	Contract(String),
}

impl ChainError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			ChainError::NotConnected => ErrorKind::NotConnected,
			ChainError::Network(_) => ErrorKind::NetworkError,
			ChainError::Balance(_) => ErrorKind::BalanceError,
			ChainError::Transaction(_) => ErrorKind::TransactionError,
			ChainError::Contract(_) => ErrorKind::ContractError,
		}
	}
}

/// Contract operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractOperation {
	Call,
	Deploy,
}

impl fmt::Display for ContractOperation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ContractOperation::Call => f.write_str("call"),
			ContractOperation::Deploy => f.write_str("deploy"),
		}
	}
}

/// Errors surfaced by the multi-chain manager.
#[derive(Debug, Error)]
pub enum Web3Error {
	#[error("Provider for chain '{chain}' not found")]
	ProviderNotFound { chain: ChainId },

	#[error("Failed to connect to {chain}: {source}")]
	Network {
		chain: ChainId,
		#[source]
		source: ChainError,
	},

	#[error("Failed to get balance on {chain}: {source}")]
	Balance {
		chain: ChainId,
		#[source]
		source: ChainError,
	},

	#[error("Failed to send transaction on {chain}: {source}")]
	Transaction {
		chain: ChainId,
		#[source]
		source: ChainError,
	},

	#[error("Failed to {operation} contract on {chain}: {source}")]
	Contract {
		chain: ChainId,
		operation: ContractOperation,
		#[source]
		source: ChainError,
	},

	#[error("Failed to transfer cross-chain from {from} to {to}: {source}")]
	CrossChainTransfer {
		from: ChainId,
		to: ChainId,
		#[source]
		source: Box<Web3Error>,
	},
}

impl Web3Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Web3Error::ProviderNotFound { .. } => ErrorKind::ProviderNotFound,
			Web3Error::Network { .. } => ErrorKind::NetworkError,
			Web3Error::Balance { .. } => ErrorKind::BalanceError,
			Web3Error::Transaction { .. } => ErrorKind::TransactionError,
			Web3Error::Contract { .. } => ErrorKind::ContractError,
			Web3Error::CrossChainTransfer { .. } => ErrorKind::CrossChainError,
		}
	}

	/// Kind of the innermost error in the chain.
	pub fn root_kind(&self) -> ErrorKind {
		match self {
			Web3Error::ProviderNotFound { .. } => ErrorKind::ProviderNotFound,
			Web3Error::Network { source, .. }
			| Web3Error::Balance { source, .. }
			| Web3Error::Transaction { source, .. }
			| Web3Error::Contract { source, .. } => source.kind(),
			Web3Error::CrossChainTransfer { source, .. } => source.root_kind(),
		}
	}

	/// Chain the failing operation ran against.
	///
	/// For a cross-chain failure this is the chain of the wrapped error.
	pub fn chain(&self) -> &ChainId {
		match self {
			Web3Error::ProviderNotFound { chain }
			| Web3Error::Network { chain, .. }
			| Web3Error::Balance { chain, .. }
			| Web3Error::Transaction { chain, .. }
			| Web3Error::Contract { chain, .. } => chain,
			Web3Error::CrossChainTransfer { source, .. } => source.chain(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error as _;

	#[test]
	fn test_error_kind_codes() {
		assert_eq!(ErrorKind::ProviderNotFound.code(), "PROVIDER_NOT_FOUND");
		assert_eq!(ErrorKind::CrossChainError.to_string(), "CROSS_CHAIN_ERROR");
		assert_eq!(
			serde_json::to_value(ErrorKind::NotConnected).unwrap(),
			"NOT_CONNECTED"
		);
	}

	#[test]
	fn test_chain_scoped_error_preserves_source() {
		let err = Web3Error::Balance {
			chain: ChainId::new("solana"),
			source: ChainError::NotConnected,
		};

		assert_eq!(err.kind(), ErrorKind::BalanceError);
		assert_eq!(err.root_kind(), ErrorKind::NotConnected);
		assert_eq!(err.chain(), "solana");
		assert_eq!(
			err.source().map(|s| s.to_string()),
			Some("Provider not connected".to_string())
		);
	}

	#[test]
	fn test_cross_chain_error_walks_to_root() {
		let err = Web3Error::CrossChainTransfer {
			from: ChainId::new("ethereum"),
			to: ChainId::new("polygon"),
			source: Box::new(Web3Error::Network {
				chain: ChainId::new("polygon"),
				source: ChainError::Network("connection refused".to_string()),
			}),
		};

		assert_eq!(err.kind(), ErrorKind::CrossChainError);
		assert_eq!(err.root_kind(), ErrorKind::NetworkError);
		assert_eq!(err.chain(), "polygon");
		assert!(err.to_string().contains("connection refused"));
	}
}
