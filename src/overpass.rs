//! Async client for the Overpass API interpreter endpoint.

use std::time::Duration;

use crate::models::OsmBatch;
use crate::script::generate_osm_script;
use crate::settings::{Settings, SettingsError};

pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid query settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("overpass request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response body of {got} bytes exceeds the configured limit of {limit} bytes")]
    ResponseTooLarge { got: u64, limit: u64 },
    #[error("could not parse overpass response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Generates the script for `settings` and runs it in one call.
    pub async fn fetch(&self, settings: &Settings) -> Result<OsmBatch, FetchError> {
        let script = generate_osm_script(settings)?;
        self.run_query(&script, settings).await
    }

    /// Posts an already-rendered Overpass QL script and decodes the batch.
    ///
    /// Responses larger than `settings.max_content_length` are rejected
    /// before parsing. No retries; a failed query surfaces to the caller.
    pub async fn run_query(&self, script: &str, settings: &Settings) -> Result<OsmBatch, FetchError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(Duration::from_millis(settings.timeout_ms))
            .body(script.to_owned())
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        enforce_content_limit(body.len() as u64, settings.max_content_length)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

fn enforce_content_limit(got: u64, limit: u64) -> Result<(), FetchError> {
    if got > limit {
        return Err(FetchError::ResponseTooLarge { got, limit });
    }
    Ok(())
}
