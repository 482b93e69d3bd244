pub mod chat;
pub mod user;

pub use chat::{ChatRole, ChatSession, SessionSummary, Turn, SUMMARY_INTERVAL};
pub use user::User;
