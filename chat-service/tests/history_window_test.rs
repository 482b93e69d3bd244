//! Conversation window and exchange behavior, exercised through the crate's
//! public API with the mock inference provider.

use chat_service::models::{ChatRole, ChatSession};
use chat_service::services::inference::mock::MockInferenceProvider;
use chat_service::services::{build_history, InferenceProvider};
use std::sync::Arc;

#[test]
fn summary_plus_six_turns_caps_the_window_at_seven() {
    let mut session = ChatSession::new(None);
    session.summary = "user asked about X".to_string();
    for i in 0..6 {
        let role = if i % 2 == 0 {
            ChatRole::User
        } else {
            ChatRole::Assistant
        };
        session.push_turn(role, format!("turn {}", i));
    }

    let history = build_history(&session);

    assert_eq!(history.len(), 7);
    assert_eq!(history[0].role, ChatRole::System);
    assert_eq!(history[0].content, "Previous summary: user asked about X");
    assert_eq!(history[1].content, "turn 0");
    assert_eq!(history[6].content, "turn 5");
}

#[test]
fn window_drops_oldest_turns_but_keeps_order() {
    let mut session = ChatSession::new(None);
    for i in 0..30 {
        session.push_turn(ChatRole::User, format!("q{}", i));
        session.push_turn(ChatRole::Assistant, format!("a{}", i));
    }

    let history = build_history(&session);

    assert_eq!(history.len(), 6);
    assert_eq!(history[0].content, "q27");
    assert_eq!(history[5].content, "a29");
}

#[tokio::test]
async fn an_exchange_appends_exactly_one_user_and_one_assistant_turn() {
    let provider: Arc<dyn InferenceProvider> =
        Arc::new(MockInferenceProvider::new("Hi there", "summary"));

    let mut session = ChatSession::new(None);
    let history = build_history(&session);
    let reply = provider.answer("Hello", &history).await.unwrap();

    session.push_turn(ChatRole::User, "Hello".to_string());
    session.push_turn(ChatRole::Assistant, reply.clone());

    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[0].role, ChatRole::User);
    assert_eq!(session.messages[0].content, "Hello");
    assert_eq!(session.messages[1].role, ChatRole::Assistant);
    assert_eq!(session.messages[1].content, "Hi there");
    assert!(!session.needs_summary());
}

#[tokio::test]
async fn summarization_failure_leaves_summary_unchanged() {
    let failing: Arc<dyn InferenceProvider> = Arc::new(MockInferenceProvider::failing());

    let mut session = ChatSession::new(None);
    session.summary = "earlier summary".to_string();
    for i in 0..10 {
        let role = if i % 2 == 0 {
            ChatRole::User
        } else {
            ChatRole::Assistant
        };
        session.push_turn(role, format!("turn {}", i));
    }
    assert!(session.needs_summary());

    // The orchestrator swallows this error and keeps the previous summary
    if let Ok(summary) = failing.summarize(&session.messages).await {
        session.summary = summary;
    }

    assert_eq!(session.summary, "earlier summary");
}
