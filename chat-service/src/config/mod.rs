use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default credential lifetime.
const DEFAULT_JWT_EXPIRY_DAYS: i64 = 7;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub inference: InferenceConfig,
    pub cors: CorsConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the external inference/vector-search service.
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// The single browser origin allowed to call this service.
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_days: i64,
}

impl ChatConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(ChatConfig {
            common: common_config,
            mongodb: MongoConfig {
                // No default: a missing store connection string is fatal
                uri: get_env("MONGODB_URI", None, is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("chat_db"), is_prod)?,
            },
            inference: InferenceConfig {
                base_url: get_env("INFERENCE_API_URL", Some("http://127.0.0.1:8000"), is_prod)?,
            },
            cors: CorsConfig {
                allowed_origin: get_env("FRONTEND_ORIGIN", Some("http://localhost:5173"), is_prod)?,
            },
            jwt: JwtConfig {
                secret: get_env("JWT_SECRET", Some("dev-only-insecure-secret"), is_prod)?,
                expiry_days: get_env(
                    "JWT_EXPIRY_DAYS",
                    Some(&DEFAULT_JWT_EXPIRY_DAYS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_JWT_EXPIRY_DAYS),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
