//! User model - registered accounts for the chat frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unique email address.
    pub email: String,

    /// Unique login name.
    pub username: String,

    /// Argon2 PHC hash, never the plaintext.
    pub password_hash: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
