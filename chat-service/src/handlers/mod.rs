//! HTTP handlers for the chat service.

pub mod auth;
pub mod chat;
pub mod health;
pub mod records;

pub use auth::{login, register};
pub use chat::{chat, get_all_chats, get_chat};
pub use health::{health_check, readiness_check};
pub use records::{get_records, update_record};
