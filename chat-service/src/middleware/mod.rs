pub mod auth;

pub use auth::{auth_cookie, auth_middleware, AuthUser, OptionalAuthUser, TOKEN_COOKIE};
