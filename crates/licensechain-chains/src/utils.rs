//! Utility functions for addresses, units and gas figures.
//!
//! Amounts are handled as decimal strings throughout so that 18-decimal
//! token values never pass through floating point.

use licensechain_types::ChainId;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UtilsError {
	#[error("Invalid address format: {0}")]
	InvalidAddress(String),

	#[error("Invalid amount: {0}")]
	InvalidAmount(String),

	#[error("Invalid multiplier: {0}")]
	InvalidMultiplier(String),
}

/// Checks whether `address` looks like an EVM address (`0x` + 40 hex
/// digits) or a base58 account key of 32 to 44 characters.
pub fn validate_address(address: &str) -> bool {
	if let Some(hex_part) = address.strip_prefix("0x") {
		if address.len() == 42 {
			return hex_part.chars().all(|c| c.is_ascii_hexdigit());
		}
	}

	(32..=44).contains(&address.len()) && address.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// Checks whether `key` is 32 bytes of hex, with or without a `0x` prefix.
pub fn validate_private_key(key: &str) -> bool {
	let digits = key.strip_prefix("0x").unwrap_or(key);
	digits.len() == 64 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalizes an address for display on `chain`.
///
/// EVM chains use lowercase hex; other chains keep the address as given.
pub fn format_address(address: &str, chain: &str) -> Result<String, UtilsError> {
	if !validate_address(address) {
		return Err(UtilsError::InvalidAddress(address.to_string()));
	}

	match chain.to_ascii_lowercase().as_str() {
		ChainId::ETHEREUM
		| ChainId::POLYGON
		| ChainId::BSC
		| ChainId::AVALANCHE
		| ChainId::ARBITRUM
		| ChainId::OPTIMISM => Ok(address.to_lowercase()),
		_ => Ok(address.to_string()),
	}
}

/// Converts a display amount such as `"1.5"` into the smallest
/// denomination. Fraction digits beyond `decimals` are truncated.
pub fn parse_units(value: &str, decimals: u32) -> Result<String, UtilsError> {
	let (integer, fraction) = value.split_once('.').unwrap_or((value, ""));

	let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
	if (integer.is_empty() && fraction.is_empty()) || !is_digits(integer) || !is_digits(fraction) {
		return Err(UtilsError::InvalidAmount(value.to_string()));
	}

	let decimals = decimals as usize;
	let mut fraction: String = fraction.chars().take(decimals).collect();
	while fraction.len() < decimals {
		fraction.push('0');
	}

	let combined = format!("{}{}", integer, fraction);
	let trimmed = combined.trim_start_matches('0');
	Ok(if trimmed.is_empty() {
		"0".to_string()
	} else {
		trimmed.to_string()
	})
}

/// Converts an amount in the smallest denomination into its display form,
/// dropping trailing fraction zeros.
pub fn format_units(value: &str, decimals: u32) -> Result<String, UtilsError> {
	if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
		return Err(UtilsError::InvalidAmount(value.to_string()));
	}

	let decimals = decimals as usize;
	let padded = format!("{:0>width$}", value, width = decimals + 1);
	let (integer, fraction) = padded.split_at(padded.len() - decimals);

	let integer = match integer.trim_start_matches('0') {
		"" => "0",
		digits => digits,
	};
	let fraction = fraction.trim_end_matches('0');

	Ok(if fraction.is_empty() {
		integer.to_string()
	} else {
		format!("{}.{}", integer, fraction)
	})
}

/// Scales a base gas price by `multiplier`, truncated to three decimal
/// places of the multiplier.
pub fn calculate_gas_price(base_gas_price: &str, multiplier: Decimal) -> Result<String, UtilsError> {
	let price: u128 = base_gas_price
		.parse()
		.map_err(|_| UtilsError::InvalidAmount(base_gas_price.to_string()))?;

	let per_mille = multiplier
		.checked_mul(Decimal::from(1000))
		.ok_or_else(|| UtilsError::InvalidMultiplier(multiplier.to_string()))?
		.floor()
		.to_u128()
		.ok_or_else(|| UtilsError::InvalidMultiplier(multiplier.to_string()))?;

	let adjusted = price
		.checked_mul(per_mille)
		.ok_or_else(|| UtilsError::InvalidAmount(base_gas_price.to_string()))?
		/ 1000;

	Ok(adjusted.to_string())
}

/// Default gas multiplier applied by `calculate_gas_price` callers.
pub fn default_gas_multiplier() -> Decimal {
	Decimal::new(11, 1)
}

/// Rough gas limit for a class of operation, scaled by `complexity`.
///
/// Known operations: `transfer`, `contract_call`, `contract_deploy`,
/// `complex_operation`. Anything else uses the contract call figure.
pub fn estimate_gas_limit(operation: &str, complexity: f64) -> u64 {
	let base: u64 = match operation {
		"transfer" => 21_000,
		"contract_call" => 100_000,
		"contract_deploy" => 500_000,
		"complex_operation" => 200_000,
		_ => 100_000,
	};

	(base as f64 * complexity).floor() as u64
}
