//! Registration and login against the users collection.

use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::dtos::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::middleware::auth_cookie;
use crate::models::User;
use crate::startup::AppState;
use crate::utils::{hash_password, verify_password, Password, PasswordHashString, ValidatedJson};
use service_core::error::AppError;

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Nothing is written and no credential issued when the account exists
    let email_taken = state.db.find_user_by_email(&req.email).await?.is_some();
    let username_taken = state
        .db
        .find_user_by_username(&req.username)
        .await?
        .is_some();

    if email_taken || username_taken {
        return Err(AppError::BadRequest(anyhow::anyhow!("User already exists")));
    }

    let password_hash = hash_password(&Password::new(req.password))?;
    let user = User::new(req.name, req.email, req.username, password_hash.into_string());

    state.db.insert_user(&user).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    let token = state.jwt.sign_token(&user.id, &user.username)?;
    let jar = jar.add(auth_cookie(token));

    Ok((
        jar,
        Json(RegisterResponse {
            success: true,
            user_id: user.id,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .db
        .find_user_by_username(&req.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("User not found")))?;

    verify_password(
        &Password::new(req.password),
        &PasswordHashString::new(user.password_hash.clone()),
    )
    .map_err(|_| AppError::Unauthorized(anyhow::anyhow!("Invalid credentials")))?;

    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

    let token = state.jwt.sign_token(&user.id, &user.username)?;
    let jar = jar.add(auth_cookie(token));

    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            username: user.username,
        }),
    ))
}
