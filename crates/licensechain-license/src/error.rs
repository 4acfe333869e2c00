use licensechain_types::ErrorKind;
use thiserror::Error;

/// Errors returned by the license API client.
#[derive(Debug, Error)]
pub enum LicenseError {
	#[error("Network request failed: {0}")]
	Network(String),

	#[error("Request timed out after {0} ms")]
	Timeout(u64),

	#[error("Authentication failed (HTTP {status}): {message}")]
	Authentication { status: u16, message: String },

	#[error("Rate limited: {0}")]
	RateLimited(String),

	#[error("Request rejected (HTTP {status}): {message}")]
	Validation { status: u16, message: String },

	#[error("HTTP {status}: {message}")]
	Http { status: u16, message: String },

	#[error("Invalid response: {0}")]
	InvalidResponse(String),

	#[error("Configuration error: {0}")]
	Configuration(String),
}

impl LicenseError {
	/// Maps an unsuccessful HTTP status to an error.
	pub fn from_status(status: u16, message: impl Into<String>) -> Self {
		let message = message.into();
		match status {
			401 | 403 => LicenseError::Authentication { status, message },
			429 => LicenseError::RateLimited(message),
			400 | 422 => LicenseError::Validation { status, message },
			_ => LicenseError::Http { status, message },
		}
	}

	/// Whether the request may succeed if sent again.
	pub fn is_retryable(&self) -> bool {
		match self {
			LicenseError::Network(_) | LicenseError::Timeout(_) | LicenseError::RateLimited(_) => {
				true
			}
			LicenseError::Http { status, .. } => *status >= 500,
			_ => false,
		}
	}

	pub fn kind(&self) -> ErrorKind {
		match self {
			LicenseError::Authentication { .. } => ErrorKind::AuthenticationError,
			LicenseError::RateLimited(_) => ErrorKind::RateLimitError,
			LicenseError::Validation { .. } | LicenseError::Configuration(_) => {
				ErrorKind::ValidationError
			}
			LicenseError::Network(_)
			| LicenseError::Timeout(_)
			| LicenseError::Http { .. }
			| LicenseError::InvalidResponse(_) => ErrorKind::NetworkError,
		}
	}
}
