use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::services::AuthClaims;
use crate::startup::AppState;
use service_core::error::AppError;

/// Name of the cookie carrying the signed credential.
pub const TOKEN_COOKIE: &str = "token";

/// Build the credential cookie set on register/login.
pub fn auth_cookie(token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

/// Middleware to require a valid credential cookie on protected routes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(req.headers());

    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Please login")))?;

    let claims = state
        .jwt
        .verify_token(&token)
        .map_err(|_| AppError::Unauthorized(anyhow::anyhow!("Invalid token")))?;

    // Store claims in request extensions so handlers can access them
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extractor for claims behind [`auth_middleware`].
pub struct AuthUser(pub AuthClaims);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<AuthClaims>().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("Auth claims missing from request extensions"))
                .into_response()
        })?;

        Ok(AuthUser(claims.clone()))
    }
}

/// Extractor for routes where identity is attached opportunistically: yields
/// the verified claims when a valid cookie is present, `None` otherwise,
/// and never rejects the request.
pub struct OptionalAuthUser(pub Option<AuthClaims>);

#[axum::async_trait]
impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let claims = jar
            .get(TOKEN_COOKIE)
            .and_then(|cookie| state.jwt.verify_token(cookie.value()).ok());

        Ok(OptionalAuthUser(claims))
    }
}
