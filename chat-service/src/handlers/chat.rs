//! Chat session orchestration: resolve-or-create, assemble history, call
//! inference, append the exchange, conditionally summarize, persist, respond.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::dtos::{ChatRequest, ChatResponse, SessionResponse, SessionSummaryResponse, TurnDto};
use crate::middleware::OptionalAuthUser;
use crate::models::{ChatRole, ChatSession};
use crate::services::build_history;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use service_core::error::AppError;

pub async fn chat(
    State(state): State<AppState>,
    user: OptionalAuthUser,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    // A malformed or unknown id falls through to a fresh conversation
    let existing = match req.chat_id.as_deref() {
        Some(id) if Uuid::parse_str(id).is_ok() => state.db.find_session(id).await?,
        _ => None,
    };

    let is_new = existing.is_none();
    let mut session =
        existing.unwrap_or_else(|| ChatSession::new(user.0.map(|claims| claims.sub)));

    // History is derived from the pre-update state
    let history = build_history(&session);

    let reply = state
        .inference
        .answer(&req.question, &history)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, session_id = %session.id, "Inference call failed");
            AppError::UpstreamError("AI Service is down".to_string())
        })?;

    let expected_version = session.version;
    session.push_turn(ChatRole::User, req.question.clone());
    session.push_turn(ChatRole::Assistant, reply.clone());

    let mut refreshed_summary = None;
    if session.needs_summary() {
        match state.inference.summarize(&session.messages).await {
            Ok(summary) => {
                session.summary = summary.clone();
                refreshed_summary = Some(summary);
            }
            // Summarization failure must never fail the user-visible request
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    session_id = %session.id,
                    "Summarization failed, keeping previous summary"
                );
            }
        }
    }

    if is_new {
        state.db.insert_session(&session).await?;
    } else {
        let appended = &session.messages[session.messages.len() - 2..];
        state
            .db
            .append_turns(
                &session.id,
                expected_version,
                appended,
                refreshed_summary.as_deref(),
                session.updated_at,
            )
            .await?;
    }

    tracing::info!(
        session_id = %session.id,
        turn_count = session.messages.len(),
        new_session = is_new,
        "Chat exchange completed"
    );

    Ok(Json(ChatResponse {
        reply,
        chat_id: session.id.clone(),
        history: session.messages.into_iter().map(TurnDto::from).collect(),
    }))
}

pub async fn get_all_chats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let summaries = state.db.list_session_summaries().await?;

    Ok(Json(
        summaries
            .into_iter()
            .map(SessionSummaryResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .db
        .find_session(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Chat not found")))?;

    Ok(Json(SessionResponse::from(session)))
}
