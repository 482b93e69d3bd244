use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use service_core::error::AppError;

/// JWT service for token generation and validation.
///
/// HS256 with a secret injected from configuration at process start.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_days: i64,
}

/// Canonical claim set, identical for register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Login name
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiry_days: config.expiry_days,
        }
    }

    /// Sign a token for a user.
    pub fn sign_token(&self, user_id: &str, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + Duration::days(self.expiry_days);

        let claims = AuthClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to encode token: {}", e)))
    }

    /// Validate and decode a token.
    pub fn verify_token(&self, token: &str) -> Result<AuthClaims, AppError> {
        let data = decode::<AuthClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiry_days: 7,
        }
    }

    #[test]
    fn sign_then_verify_round_trips_claims() {
        let jwt = JwtService::new(&test_config("test-secret"));
        let token = jwt.sign_token("user-42", "alice").expect("sign failed");

        let claims = jwt.verify_token(&token).expect("verify failed");
        assert_eq!(claims.sub, "user-42");
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_token_signed_with_other_secret() {
        let signer = JwtService::new(&test_config("secret-a"));
        let verifier = JwtService::new(&test_config("secret-b"));

        let token = signer.sign_token("user-42", "alice").expect("sign failed");
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let jwt = JwtService::new(&test_config("test-secret"));
        assert!(jwt.verify_token("not-a-token").is_err());
    }
}
