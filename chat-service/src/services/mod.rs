pub mod database;
pub mod history;
pub mod inference;
pub mod jwt;
pub mod vector;

pub use database::ChatDb;
pub use history::{build_history, HistoryEntry};
pub use inference::{InferenceProvider, ProviderError};
pub use jwt::{AuthClaims, JwtService};
pub use vector::VectorEditorClient;
