//! HTTP client for the batted-ball query endpoint.

use super::{BattedBall, BattedBallSource, FilterParams};
use crate::error::{Result, VizError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Path of the query endpoint relative to the API base URL.
const DATA_PATH: &str = "api/data";

/// Error body returned by the endpoint on failure.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Fetches records from `GET {base}/api/data`.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    endpoint: Url,
    client: Client,
}

impl HttpDataSource {
    /// Creates a client for the endpoint under `base_url`.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let endpoint = Self::endpoint_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| VizError::connection(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { endpoint, client })
    }

    /// Resolves the data endpoint against a base URL.
    pub fn endpoint_url(base_url: &str) -> Result<Url> {
        let mut base = Url::parse(base_url)
            .map_err(|e| VizError::config(format!("Invalid API URL '{base_url}': {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(DATA_PATH)
            .map_err(|e| VizError::config(format!("Invalid API URL '{base_url}': {e}")))
    }

    /// Returns the endpoint this source queries.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn parse_error(status: reqwest::StatusCode, body: &str) -> VizError {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(response) => VizError::query(response.error),
            Err(_) if body.trim().is_empty() => {
                VizError::query(format!("Data endpoint returned {status}"))
            }
            Err(_) => VizError::query(format!("Data endpoint returned {status}: {}", body.trim())),
        }
    }
}

#[async_trait]
impl BattedBallSource for HttpDataSource {
    async fn fetch(&self, params: &FilterParams) -> Result<Vec<BattedBall>> {
        debug!(endpoint = %self.endpoint, ?params, "Fetching batted balls");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params.query_pairs())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VizError::connection("Data request timed out")
                } else if e.is_connect() {
                    VizError::connection(format!("Cannot reach {}: {e}", self.endpoint))
                } else {
                    VizError::connection(format!("Data request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VizError::query(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            warn!(%status, "Data endpoint returned an error");
            return Err(Self::parse_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| VizError::query(format!("Malformed data response: {e}")))
    }

    fn describe(&self) -> String {
        format!("api {}", self.endpoint.host_str().unwrap_or("?"))
    }
}
