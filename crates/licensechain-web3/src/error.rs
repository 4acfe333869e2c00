use licensechain_config::ConfigError;
use licensechain_license::LicenseError;
use licensechain_types::{ErrorKind, Web3Error};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Any failure surfaced by `LicenseChainWeb3`.
#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Web3(#[from] Web3Error),

	#[error(transparent)]
	License(#[from] LicenseError),

	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl Error {
	/// Error code, when the failure has one.
	pub fn kind(&self) -> Option<ErrorKind> {
		match self {
			Error::Web3(e) => Some(e.kind()),
			Error::License(e) => Some(e.kind()),
			Error::Config(_) => None,
		}
	}
}
