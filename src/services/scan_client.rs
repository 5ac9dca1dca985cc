use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use crate::config::constants::VULNERABILITIES_ENDPOINT;
use crate::errors::{SecureAiError, SecureAiResult};
use crate::structs::config::backend_config::BackendConfig;

/// Boundary to the analysis backend. The detection work behind it is
/// opaque; this client only submits the repository URL and validates the
/// shape of what comes back.
#[async_trait]
pub trait ScanBackend: Send + Sync {
    async fn scan_repository(&self, repository_url: &str) -> SecureAiResult<Value>;
}

pub struct HttpScanBackend {
    client: Client,
    base_url: String,
}

impl HttpScanBackend {
    pub fn new(config: &BackendConfig) -> SecureAiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SecureAiError::system_error("HTTP client setup", &e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ScanBackend for HttpScanBackend {
    async fn scan_repository(&self, repository_url: &str) -> SecureAiResult<Value> {
        let url = format!("{}/{}", self.base_url, VULNERABILITIES_ENDPOINT);

        let response = match self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&json!({ "url": repository_url }))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("Network error during vulnerability scan request: {}", e);
                return Err(SecureAiError::network_error(
                    "vulnerability scan",
                    Some(&url),
                    None,
                    "Failed to connect to the analysis backend",
                ));
            }
        };

        let payload: Value = match response.status() {
            status if status.is_success() => match response.json().await {
                Ok(data) => data,
                Err(e) => {
                    log::error!("Failed to parse scan response JSON: {}", e);
                    return Err(SecureAiError::parse_error(
                        "scan response",
                        "Invalid JSON returned by the analysis backend",
                        Some(&e.to_string()),
                    ));
                }
            },
            StatusCode::REQUEST_TIMEOUT => {
                log::error!("Vulnerability scan request timed out (408)");
                return Err(SecureAiError::network_error(
                    "vulnerability scan",
                    Some(&url),
                    Some(408),
                    "Analysis backend timed out",
                ));
            }
            status => {
                let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
                log::error!("Vulnerability scan request failed with status {}: {}", status, error_text);
                return Err(SecureAiError::network_error(
                    "vulnerability scan",
                    Some(&url),
                    Some(status.as_u16()),
                    &error_text,
                ));
            }
        };

        // A response without an issues array is a failure at this boundary;
        // defaulting only applies to fields nested inside a valid payload.
        if !payload.get("issues").map(Value::is_array).unwrap_or(false) {
            log::error!("Scan response is missing the 'issues' array");
            return Err(SecureAiError::parse_error(
                "scan response",
                "Response is missing the 'issues' array",
                None,
            ));
        }

        Ok(payload)
    }
}
