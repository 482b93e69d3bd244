pub mod auth;
pub mod chat;
pub mod records;

use serde::Serialize;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use chat::{ChatRequest, ChatResponse, SessionResponse, SessionSummaryResponse, TurnDto};
pub use records::{RecordSearchRequest, RecordSearchResults, RecordUpdateRequest};

/// Generic error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
