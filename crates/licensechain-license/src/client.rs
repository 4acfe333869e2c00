//! HTTP client for the license API.
//!
//! All endpoints live under the `/v1` prefix and answer with a
//! `{ "data": ... }` envelope. Transient failures (transport errors,
//! timeouts, 429 and 5xx responses) are retried with exponential backoff up
//! to the configured number of retries.

use crate::error::LicenseError;
use backoff::{backoff::Backoff, ExponentialBackoff};
use licensechain_types::{LicenseData, LicenseUpdate, Web3Config};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

const API_VERSION: &str = "1.0";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
	data: T,
}

#[derive(Debug, Deserialize)]
struct Validity {
	valid: bool,
}

#[derive(Debug, Deserialize)]
struct Outcome {
	success: bool,
}

/// Prefixes `endpoint` with `/v1` unless it already carries it.
pub fn normalize_endpoint(endpoint: &str) -> String {
	if endpoint.starts_with("/v1/") {
		endpoint.to_string()
	} else if endpoint.starts_with('/') {
		format!("/v1{}", endpoint)
	} else {
		format!("/v1/{}", endpoint)
	}
}

/// Client for license management requests.
#[derive(Debug, Clone)]
pub struct LicenseClient {
	http: reqwest::Client,
	config: Web3Config,
	backoff: ExponentialBackoff,
}

impl LicenseClient {
	/// Creates a client whose requests time out after `config.timeout()`.
	///
	/// Retries back off exponentially with a maximum elapsed time of 30
	/// seconds per request.
	pub fn new(config: Web3Config) -> Result<Self, LicenseError> {
		let http = reqwest::Client::builder()
			.timeout(config.timeout())
			.build()
			.map_err(|e| LicenseError::Configuration(e.to_string()))?;

		let backoff = ExponentialBackoff {
			max_elapsed_time: Some(Duration::from_secs(30)),
			..Default::default()
		};

		Ok(Self {
			http,
			config,
			backoff,
		})
	}

	/// Sets the delay before the first retry.
	pub fn with_initial_backoff(mut self, interval: Duration) -> Self {
		self.backoff.initial_interval = interval;
		self.backoff.current_interval = interval;
		self.backoff.max_interval = self.backoff.max_interval.max(interval);
		self
	}

	pub fn config(&self) -> &Web3Config {
		&self.config
	}

	pub async fn create_license(
		&self,
		user_id: &str,
		product_id: &str,
		metadata: Option<HashMap<String, Value>>,
	) -> Result<LicenseData, LicenseError> {
		let mut body = json!({ "userId": user_id, "productId": product_id });
		if let Some(metadata) = metadata {
			body["metadata"] = json!(metadata);
		}
		self.request(Method::POST, "/licenses", Some(body)).await
	}

	pub async fn get_license(&self, license_id: &str) -> Result<LicenseData, LicenseError> {
		self.request(Method::GET, &format!("/licenses/{}", license_id), None)
			.await
	}

	pub async fn validate_license(&self, license_key: &str) -> Result<bool, LicenseError> {
		let body = json!({ "licenseKey": license_key });
		let validity: Validity = self
			.request(Method::POST, "/licenses/validate", Some(body))
			.await?;
		Ok(validity.valid)
	}

	pub async fn update_license(
		&self,
		license_id: &str,
		updates: &LicenseUpdate,
	) -> Result<LicenseData, LicenseError> {
		let body = serde_json::to_value(updates)
			.map_err(|e| LicenseError::InvalidResponse(e.to_string()))?;
		self.request(
			Method::PUT,
			&format!("/licenses/{}", license_id),
			Some(body),
		)
		.await
	}

	pub async fn revoke_license(&self, license_id: &str) -> Result<bool, LicenseError> {
		let outcome: Outcome = self
			.request(Method::DELETE, &format!("/licenses/{}", license_id), None)
			.await?;
		Ok(outcome.success)
	}

	/// Sends a request, retrying transient failures, and unwraps the
	/// `data` envelope.
	async fn request<T: DeserializeOwned>(
		&self,
		method: Method,
		endpoint: &str,
		body: Option<Value>,
	) -> Result<T, LicenseError> {
		let url = format!(
			"{}{}",
			self.config.base_url.trim_end_matches('/'),
			normalize_endpoint(endpoint)
		);

		let mut backoff = self.backoff.clone();
		backoff.reset();
		let mut attempts = 0;

		loop {
			match self.send_once(method.clone(), &url, body.as_ref()).await {
				Ok(envelope) => {
					let envelope: Envelope<T> = serde_json::from_value(envelope)
						.map_err(|e| LicenseError::InvalidResponse(e.to_string()))?;
					return Ok(envelope.data);
				}
				Err(e) if e.is_retryable() && attempts < self.config.retries => {
					attempts += 1;

					match backoff.next_backoff() {
						Some(delay) => {
							warn!(
								"{} {} failed, attempt {}/{}, retrying in {:?}: {}",
								method, url, attempts, self.config.retries, delay, e
							);
							tokio::time::sleep(delay).await;
						}
						None => {
							warn!(
								"{} {} failed, backoff exhausted after {} attempts: {}",
								method, url, attempts, e
							);
							return Err(e);
						}
					}
				}
				Err(e) => return Err(e),
			}
		}
	}

	async fn send_once(
		&self,
		method: Method,
		url: &str,
		body: Option<&Value>,
	) -> Result<Value, LicenseError> {
		debug!("{} {}", method, url);

		let mut request = self
			.http
			.request(method, url)
			.bearer_auth(&self.config.api_key)
			.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
			.header("X-API-Version", API_VERSION);
		if let Some(body) = body {
			request = request.json(body);
		}

		let response = request.send().await.map_err(|e| self.transport_error(e))?;

		let status = response.status();
		if !status.is_success() {
			let message = response
				.text()
				.await
				.ok()
				.filter(|text| !text.is_empty())
				.unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
			return Err(LicenseError::from_status(status.as_u16(), message));
		}

		response
			.json::<Value>()
			.await
			.map_err(|e| LicenseError::InvalidResponse(e.to_string()))
	}

	fn transport_error(&self, error: reqwest::Error) -> LicenseError {
		if error.is_timeout() {
			LicenseError::Timeout(self.config.timeout_ms)
		} else {
			LicenseError::Network(error.to_string())
		}
	}
}
