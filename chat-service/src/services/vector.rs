//! Vector record editor gateway.
//!
//! Pure pass-through to the external vector-search service: search returns
//! the ranked matches verbatim, update forwards the upstream ack unchanged.

use crate::dtos::records::RecordSearchResults;
use crate::services::inference::ProviderError;
use reqwest::Client;
use serde::Serialize;

#[derive(Clone)]
pub struct VectorEditorClient {
    base_url: String,
    client: Client,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct UpdateRequest<'a> {
    id: &'a str,
    new_text: &'a str,
}

impl VectorEditorClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub async fn search(&self, query: &str) -> Result<RecordSearchResults, ProviderError> {
        let url = format!("{}/get-to-edit", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&SearchRequest { query })
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!("{}: {}", status, body)));
        }

        response
            .json::<RecordSearchResults>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    pub async fn update(
        &self,
        id: &str,
        new_text: &str,
    ) -> Result<serde_json::Value, ProviderError> {
        let url = format!("{}/update-record", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&UpdateRequest { id, new_text })
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!("{}: {}", status, body)));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}
