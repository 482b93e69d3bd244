//! Vector record editor: pass-throughs to the external vector-search service.

use axum::{extract::State, response::IntoResponse, Json};

use crate::dtos::{RecordSearchRequest, RecordUpdateRequest};
use crate::middleware::AuthUser;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use service_core::error::AppError;

pub async fn get_records(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RecordSearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let results = state.vector.search(&req.query).await.map_err(|e| {
        tracing::error!(error = %e, "Vector search failed");
        AppError::UpstreamError("Search service is unavailable".to_string())
    })?;

    Ok(Json(results))
}

pub async fn update_record(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidatedJson(req): ValidatedJson<RecordUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ack = state
        .vector
        .update(&req.id, &req.new_text)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, record_id = %req.id, "Record update failed");
            AppError::UpstreamError("Record update failed".to_string())
        })?;

    tracing::info!(record_id = %req.id, username = %claims.username, "Record updated");

    Ok(Json(ack))
}
