//! HTTP client for the ProPublica Congress bill lookup.
//!
//! Wraps the single call the platform needs -- fetch one bill record by its
//! externally assigned identifier -- behind [`BillDataSource`] so the API
//! layer and tests can swap in other sources.

use std::time::Duration;

use agora_core::bill::BillDataSource;
use agora_core::error::CoreError;
use serde_json::Value;

/// Client for the ProPublica Congress API.
///
/// Every lookup is a live, uncached fetch. Requests carry a bounded
/// timeout so a stalled upstream cannot block a request indefinitely.
pub struct ProPublicaApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ProPublicaApi {
    /// Create a client for the given API base URL and key.
    ///
    /// * `base_url` - e.g. `https://api.propublica.org/congress/v1`.
    /// * `timeout` - per-request timeout applied to every lookup.
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url,
            api_key,
        }
    }

    async fn fetch(&self, bill_id: &str) -> Result<Value, CoreError> {
        let url = format!("{}/bills/{}.json", self.base_url, bill_id);
        tracing::debug!(%url, "Fetching bill record");

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| CoreError::ExternalLookup(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::ExternalLookup(format!(
                "bill lookup for '{bill_id}' returned {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CoreError::ExternalLookup(format!("undecodable response body: {e}")))?;

        // The API wraps the record in a `results` array; the first entry is
        // the bill itself.
        body.get("results")
            .and_then(|r| r.get(0))
            .cloned()
            .ok_or_else(|| {
                CoreError::ExternalLookup(format!("bill lookup for '{bill_id}' returned no results"))
            })
    }
}

#[async_trait::async_trait]
impl BillDataSource for ProPublicaApi {
    async fn get_by_id(&self, bill_id: &str) -> Result<Value, CoreError> {
        self.fetch(bill_id).await
    }
}
