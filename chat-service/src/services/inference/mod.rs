//! Inference gateway abstraction and implementations.
//!
//! This module provides a trait-based seam in front of the external
//! question-answering service, allowing the HTTP backend to be swapped for a
//! mock in tests.

pub mod http;
pub mod mock;

use crate::models::Turn;
use crate::services::history::HistoryEntry;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for gateway operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for the external question-answering and summarization endpoint.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Answer a question given the bounded request history.
    async fn answer(
        &self,
        question: &str,
        history: &[HistoryEntry],
    ) -> Result<String, ProviderError>;

    /// Summarize a full conversation into replacement summary text.
    async fn summarize(&self, turns: &[Turn]) -> Result<String, ProviderError>;
}
