//! Chat session model for conversation persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A session's summary is refreshed every time the turn count reaches a
/// multiple of this interval.
pub const SUMMARY_INTERVAL: usize = 10;

/// Role of a message. Only `user` and `assistant` are persisted; `system`
/// appears transiently in the history payload sent to inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// A single message within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: ChatRole,

    pub content: String,

    /// When the turn was appended.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// A conversation session holding ordered turns and a rolling summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier (UUID v4).
    #[serde(rename = "_id")]
    pub id: String,

    /// User who created this session, absent for anonymous sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    /// Rolling summary, empty until the first summarization; replaced
    /// wholesale on each refresh.
    #[serde(default)]
    pub summary: String,

    /// Messages in this session, insertion order = chronological order.
    pub messages: Vec<Turn>,

    /// Optimistic concurrency counter, incremented on every persisted append.
    #[serde(default)]
    pub version: i64,

    /// When the session was created.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    /// When the session was last updated.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create a new empty session.
    pub fn new(owner_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id,
            summary: String::new(),
            messages: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a turn, timestamped at append time.
    pub fn push_turn(&mut self, role: ChatRole, content: String) {
        self.messages.push(Turn {
            role,
            content,
            created_at: Utc::now(),
        });
        self.updated_at = Utc::now();
    }

    /// Whether the rolling summary is due for a refresh.
    pub fn needs_summary(&self) -> bool {
        !self.messages.is_empty() && self.messages.len() % SUMMARY_INTERVAL == 0
    }
}

/// Projected view of a session for the conversation list: id, first turn,
/// last-updated timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSummary {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub messages: Vec<Turn>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_empty() {
        let session = ChatSession::new(None);
        assert!(session.messages.is_empty());
        assert!(session.summary.is_empty());
        assert_eq!(session.version, 0);
        assert!(session.owner_id.is_none());
        assert!(!session.id.is_empty());
    }

    #[test]
    fn push_turn_appends_in_order() {
        let mut session = ChatSession::new(Some("user-1".to_string()));
        session.push_turn(ChatRole::User, "Hello".to_string());
        session.push_turn(ChatRole::Assistant, "Hi there".to_string());

        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].role, ChatRole::User);
        assert_eq!(session.messages[0].content, "Hello");
        assert_eq!(session.messages[1].role, ChatRole::Assistant);
        assert_eq!(session.messages[1].content, "Hi there");
    }

    #[test]
    fn push_turn_refreshes_updated_at() {
        let mut session = ChatSession::new(None);
        let before = session.updated_at;
        session.push_turn(ChatRole::User, "Hello".to_string());
        assert!(session.updated_at >= before);
    }

    #[test]
    fn summary_due_only_on_interval_boundaries() {
        let mut session = ChatSession::new(None);
        assert!(!session.needs_summary());

        for i in 0..SUMMARY_INTERVAL {
            let role = if i % 2 == 0 {
                ChatRole::User
            } else {
                ChatRole::Assistant
            };
            session.push_turn(role, format!("turn {}", i));
        }
        assert!(session.needs_summary());

        session.push_turn(ChatRole::User, "one more".to_string());
        assert!(!session.needs_summary());

        for i in 0..(SUMMARY_INTERVAL - 1) {
            session.push_turn(ChatRole::Assistant, format!("extra {}", i));
        }
        assert_eq!(session.messages.len(), 2 * SUMMARY_INTERVAL);
        assert!(session.needs_summary());
    }

    #[test]
    fn roles_serialize_lowercase() {
        let turn = Turn {
            role: ChatRole::Assistant,
            content: "ok".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["role"], "assistant");
    }
}
