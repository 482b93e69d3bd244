//! Derivation of the bounded context window sent to the inference service.

use crate::models::{ChatRole, ChatSession};
use serde::Serialize;

/// How many stored turns are carried into the request history.
pub const RECENT_TURNS: usize = 6;

/// Prefix for the synthetic summary entry.
pub const SUMMARY_PREFIX: &str = "Previous summary: ";

/// One entry of the request history: role plus content, timestamps stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub content: String,
}

/// Build the request history from a session's pre-update state: an optional
/// system entry carrying the rolling summary, followed by the last
/// [`RECENT_TURNS`] stored turns in chronological order. Never longer than
/// `RECENT_TURNS + 1` entries.
pub fn build_history(session: &ChatSession) -> Vec<HistoryEntry> {
    let mut history = Vec::new();

    if !session.summary.is_empty() {
        history.push(HistoryEntry {
            role: ChatRole::System,
            content: format!("{}{}", SUMMARY_PREFIX, session.summary),
        });
    }

    let start = session.messages.len().saturating_sub(RECENT_TURNS);
    history.extend(session.messages[start..].iter().map(|turn| HistoryEntry {
        role: turn.role,
        content: turn.content.clone(),
    }));

    history
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_turns(count: usize) -> ChatSession {
        let mut session = ChatSession::new(None);
        for i in 0..count {
            let role = if i % 2 == 0 {
                ChatRole::User
            } else {
                ChatRole::Assistant
            };
            session.push_turn(role, format!("turn {}", i));
        }
        session
    }

    #[test]
    fn empty_session_yields_empty_history() {
        let session = ChatSession::new(None);
        assert!(build_history(&session).is_empty());
    }

    #[test]
    fn summary_prepends_system_entry() {
        let mut session = session_with_turns(6);
        session.summary = "user asked about X".to_string();

        let history = build_history(&session);
        assert_eq!(history.len(), 7);
        assert_eq!(history[0].role, ChatRole::System);
        assert_eq!(history[0].content, "Previous summary: user asked about X");
    }

    #[test]
    fn no_summary_means_no_system_entry() {
        let session = session_with_turns(4);
        let history = build_history(&session);
        assert_eq!(history.len(), 4);
        assert!(history.iter().all(|e| e.role != ChatRole::System));
    }

    #[test]
    fn long_sessions_keep_only_the_most_recent_turns() {
        let session = session_with_turns(20);
        let history = build_history(&session);

        assert_eq!(history.len(), RECENT_TURNS);
        assert_eq!(history[0].content, "turn 14");
        assert_eq!(history[RECENT_TURNS - 1].content, "turn 19");
    }

    #[test]
    fn never_more_than_seven_entries() {
        let mut session = session_with_turns(50);
        session.summary = "a long running conversation".to_string();
        assert_eq!(build_history(&session).len(), RECENT_TURNS + 1);
    }

    #[test]
    fn short_sessions_keep_all_turns_in_order() {
        let session = session_with_turns(3);
        let history = build_history(&session);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, "turn 0");
        assert_eq!(history[2].content, "turn 2");
    }
}
