//! Database operations for the chat service.
//!
//! Handles session and user persistence via MongoDB.

use crate::models::{ChatSession, SessionSummary, Turn, User};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct ChatDb {
    client: MongoClient,
    db: Database,
}

impl ChatDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for chat-service");

        self.create_session_indexes().await?;
        self.create_user_indexes().await?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    async fn create_session_indexes(&self) -> Result<(), AppError> {
        let sessions = self.sessions();

        // Index on updated_at for the most-recent-first conversation list
        let updated_at_index = IndexModel::builder()
            .keys(doc! { "updated_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("updated_at_idx".to_string())
                    .build(),
            )
            .build();

        sessions
            .create_index(updated_at_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create updated_at index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        // Index on owner_id for user-specific queries
        let owner_id_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("owner_id_idx".to_string())
                    .build(),
            )
            .build();

        sessions
            .create_index(owner_id_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create owner_id index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        Ok(())
    }

    async fn create_user_indexes(&self) -> Result<(), AppError> {
        let users = self.users();

        // Unique index on username
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .name("username_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        users.create_index(username_index, None).await.map_err(|e| {
            tracing::error!("Failed to create username index: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        // Unique index on email
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name("email_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        users.create_index(email_index, None).await.map_err(|e| {
            tracing::error!("Failed to create email index: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    // Collection accessors

    pub fn sessions(&self) -> Collection<ChatSession> {
        self.db.collection("sessions")
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    // Session operations

    pub async fn insert_session(&self, session: &ChatSession) -> Result<(), AppError> {
        self.sessions()
            .insert_one(session, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert session: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    pub async fn find_session(&self, session_id: &str) -> Result<Option<ChatSession>, AppError> {
        self.sessions()
            .find_one(doc! { "_id": session_id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find session: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }

    /// Append an exchange to an existing session in one atomic update keyed
    /// on `{_id, version}`. A version mismatch means another writer got in
    /// between the read and this write and surfaces as a conflict.
    pub async fn append_turns(
        &self,
        session_id: &str,
        expected_version: i64,
        turns: &[Turn],
        summary: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let turn_docs = turns
            .iter()
            .map(mongodb::bson::to_document)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                tracing::error!("Failed to serialize turns: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        let mut set = doc! { "updated_at": updated_at.timestamp_millis() };
        if let Some(summary) = summary {
            set.insert("summary", summary);
        }

        let result = self
            .sessions()
            .update_one(
                doc! { "_id": session_id, "version": expected_version },
                doc! {
                    "$push": { "messages": { "$each": turn_docs } },
                    "$set": set,
                    "$inc": { "version": 1i64 }
                },
                None,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to append turns to session: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        if result.matched_count == 0 {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Chat was modified concurrently"
            )));
        }

        Ok(())
    }

    /// All sessions projected to `{_id, first turn, updated_at}`, most
    /// recently updated first.
    pub async fn list_session_summaries(&self) -> Result<Vec<SessionSummary>, AppError> {
        let options = FindOptions::builder()
            .projection(doc! { "_id": 1, "messages": { "$slice": 1 }, "updated_at": 1 })
            .sort(doc! { "updated_at": -1 })
            .build();

        let cursor = self
            .db
            .collection::<SessionSummary>("sessions")
            .find(doc! {}, options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to query sessions: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        let summaries: Vec<SessionSummary> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect session summaries: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        Ok(summaries)
    }

    // User operations

    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.users().insert_one(user, None).await.map_err(|e| {
            tracing::error!("Failed to insert user: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        Ok(())
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.users()
            .find_one(doc! { "username": username }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find user by username: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.users()
            .find_one(doc! { "email": email }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to find user by email: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })
    }
}
