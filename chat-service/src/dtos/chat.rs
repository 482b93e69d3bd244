use crate::models::{ChatRole, ChatSession, SessionSummary, Turn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "question is required"))]
    pub question: String,

    /// Existing session to continue; a missing or malformed id starts a new
    /// conversation.
    #[serde(rename = "chatId")]
    pub chat_id: Option<String>,
}

/// One turn as exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnDto {
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Turn> for TurnDto {
    fn from(turn: Turn) -> Self {
        Self {
            role: turn.role,
            content: turn.content,
            created_at: turn.created_at,
        }
    }
}

/// Response of `POST /api/chat`: the reply, the session id (freshly assigned
/// for new conversations), and the full updated turn list.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(rename = "chatId")]
    pub chat_id: String,
    pub history: Vec<TurnDto>,
}

/// Full session document as returned by `GET /api/chat/:id`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub summary: String,
    pub messages: Vec<TurnDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChatSession> for SessionResponse {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id,
            owner_id: session.owner_id,
            summary: session.summary,
            messages: session.messages.into_iter().map(TurnDto::from).collect(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// One entry of the `GET /api/get-all-chats` listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub messages: Vec<TurnDto>,
    pub updated_at: DateTime<Utc>,
}

impl From<SessionSummary> for SessionSummaryResponse {
    fn from(summary: SessionSummary) -> Self {
        Self {
            id: summary.id,
            messages: summary.messages.into_iter().map(TurnDto::from).collect(),
            updated_at: summary.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_serializes_spec_keys() {
        let mut session = ChatSession::new(None);
        session.push_turn(ChatRole::User, "Hello".to_string());
        session.push_turn(ChatRole::Assistant, "Hi there".to_string());

        let response = ChatResponse {
            reply: "Hi there".to_string(),
            chat_id: session.id.clone(),
            history: session.messages.into_iter().map(TurnDto::from).collect(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["reply"], "Hi there");
        assert_eq!(value["chatId"], response.chat_id);
        assert_eq!(value["history"][0]["role"], "user");
        assert_eq!(value["history"][0]["content"], "Hello");
        assert_eq!(value["history"][1]["role"], "assistant");
        assert_eq!(value["history"][1]["content"], "Hi there");
    }

    #[test]
    fn summary_listing_serializes_id_and_updated_at() {
        let mut session = ChatSession::new(None);
        session.push_turn(ChatRole::User, "first".to_string());

        let entry = SessionSummaryResponse {
            id: session.id.clone(),
            messages: session.messages.into_iter().map(TurnDto::from).collect(),
            updated_at: session.updated_at,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["_id"], session.id);
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn chat_request_requires_a_question() {
        let request = ChatRequest {
            question: String::new(),
            chat_id: None,
        };
        assert!(request.validate().is_err());

        let request = ChatRequest {
            question: "Hello".to_string(),
            chat_id: Some("abc".to_string()),
        };
        assert!(request.validate().is_ok());
    }
}
