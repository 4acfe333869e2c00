//! License records exchanged with the license API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
	Active,
	Inactive,
	Expired,
	Suspended,
}

/// A license as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseData {
	pub id: String,
	pub user_id: String,
	pub product_id: String,
	pub license_key: String,
	pub status: LicenseStatus,
	pub created_at: DateTime<Utc>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_at: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl LicenseData {
	/// Whether the license is active and not past its expiry at `now`.
	pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
		self.status == LicenseStatus::Active && self.expires_at.map_or(true, |at| at > now)
	}
}

/// Partial update of a license. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseUpdate {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<LicenseStatus>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_at: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<HashMap<String, serde_json::Value>>,
}
