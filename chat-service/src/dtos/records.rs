use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/get-records`.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordSearchRequest {
    #[validate(length(min = 1, message = "query is required"))]
    pub query: String,
}

/// One ranked match from the vector-search service, forwarded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMatch {
    pub id: String,
    pub current_text: String,
    pub score: Option<f64>,
}

/// Ranked matches as returned by the vector-search service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSearchResults {
    pub results: Vec<RecordMatch>,
}

/// Body of `POST /api/update-record`.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordUpdateRequest {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,

    #[validate(length(min = 1, message = "new_text is required"))]
    pub new_text: String,
}
