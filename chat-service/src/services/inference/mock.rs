//! Mock inference provider for testing.

use super::{InferenceProvider, ProviderError};
use crate::models::Turn;
use crate::services::history::HistoryEntry;
use async_trait::async_trait;

/// Mock provider returning canned replies, or failing on demand.
pub struct MockInferenceProvider {
    reply: String,
    summary: String,
    enabled: bool,
}

impl MockInferenceProvider {
    pub fn new(reply: &str, summary: &str) -> Self {
        Self {
            reply: reply.to_string(),
            summary: summary.to_string(),
            enabled: true,
        }
    }

    /// A provider whose every call fails, for exercising error paths.
    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            summary: String::new(),
            enabled: false,
        }
    }
}

#[async_trait]
impl InferenceProvider for MockInferenceProvider {
    async fn answer(
        &self,
        _question: &str,
        _history: &[HistoryEntry],
    ) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NetworkError(
                "Mock inference provider disabled".to_string(),
            ));
        }
        Ok(self.reply.clone())
    }

    async fn summarize(&self, _turns: &[Turn]) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NetworkError(
                "Mock inference provider disabled".to_string(),
            ));
        }
        Ok(self.summary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn mock_answers_with_canned_reply() {
        let provider = MockInferenceProvider::new("Hi there", "a summary");
        let reply = provider.answer("Hello", &[]).await.expect("answer failed");
        assert_eq!(reply, "Hi there");
    }

    #[tokio::test]
    async fn mock_summarizes_with_canned_summary() {
        let provider = MockInferenceProvider::new("Hi there", "a summary");
        let summary = provider.summarize(&[]).await.expect("summarize failed");
        assert_eq!(summary, "a summary");
    }

    #[tokio::test]
    async fn failing_mock_errors_on_every_call() {
        let provider = MockInferenceProvider::failing();
        assert!(provider.answer("Hello", &[]).await.is_err());
        assert!(provider.summarize(&[]).await.is_err());
    }

    #[tokio::test]
    async fn mock_is_usable_as_trait_object() {
        let provider: Arc<dyn InferenceProvider> =
            Arc::new(MockInferenceProvider::new("Hi there", "a summary"));
        let reply = provider.answer("Hello", &[]).await.expect("answer failed");
        assert_eq!(reply, "Hi there");
    }
}
