//! HTTP inference gateway.
//!
//! Single synchronous calls to the external inference service: no retry, no
//! caching, client-default timeout only.

use super::{InferenceProvider, ProviderError};
use crate::models::Turn;
use crate::services::history::HistoryEntry;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// HTTP-backed inference provider.
pub struct HttpInferenceProvider {
    base_url: String,
    client: Client,
}

#[derive(Serialize)]
struct AnswerRequest<'a> {
    question: &'a str,
    history: &'a [HistoryEntry],
}

#[derive(Deserialize)]
struct AnswerResponse {
    reply: String,
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    messages: &'a [Turn],
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
}

impl HttpInferenceProvider {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn post_json<Req: Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp, ProviderError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!("{}: {}", status, body)));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl InferenceProvider for HttpInferenceProvider {
    async fn answer(
        &self,
        question: &str,
        history: &[HistoryEntry],
    ) -> Result<String, ProviderError> {
        tracing::debug!(
            question_len = question.len(),
            history_len = history.len(),
            "Sending question to inference service"
        );

        let response: AnswerResponse = self
            .post_json("/chat", &AnswerRequest { question, history })
            .await?;

        Ok(response.reply)
    }

    async fn summarize(&self, turns: &[Turn]) -> Result<String, ProviderError> {
        tracing::debug!(turn_count = turns.len(), "Requesting conversation summary");

        let response: SummarizeResponse = self
            .post_json("/summarize", &SummarizeRequest { messages: turns })
            .await?;

        Ok(response.summary)
    }
}
