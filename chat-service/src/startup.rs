//! Application startup and lifecycle management.

use crate::config::ChatConfig;
use crate::handlers;
use crate::middleware;
use crate::services::inference::http::HttpInferenceProvider;
use crate::services::{ChatDb, InferenceProvider, JwtService, VectorEditorClient};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ChatConfig,
    pub db: ChatDb,
    pub inference: Arc<dyn InferenceProvider>,
    pub vector: VectorEditorClient,
    pub jwt: JwtService,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ChatConfig) -> Result<Self, AppError> {
        let db = ChatDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;

        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let inference: Arc<dyn InferenceProvider> =
            Arc::new(HttpInferenceProvider::new(&config.inference.base_url));
        tracing::info!(
            endpoint = %config.inference.base_url,
            "Initialized inference provider"
        );

        let vector = VectorEditorClient::new(&config.inference.base_url);
        let jwt = JwtService::new(&config.jwt);

        let state = AppState {
            config: config.clone(),
            db,
            inference,
            vector,
            jwt,
        };

        let allowed_origin = config
            .cors
            .allowed_origin
            .parse::<HeaderValue>()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "Invalid allowed origin {}: {}",
                    config.cors.allowed_origin,
                    e
                ))
            })?;

        let cors = CorsLayer::new()
            .allow_origin(allowed_origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true);

        // Record-editor routes sit behind the credential guard; chat routes
        // are intentionally public.
        let protected = Router::new()
            .route("/api/get-records", post(handlers::get_records))
            .route("/api/update-record", post(handlers::update_record))
            .route_layer(from_fn_with_state(
                state.clone(),
                middleware::auth_middleware,
            ));

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/api/chat", post(handlers::chat))
            .route("/api/chat/:id", get(handlers::get_chat))
            .route("/api/get-all-chats", get(handlers::get_all_chats))
            .route("/register", post(handlers::register))
            .route("/login", post(handlers::login))
            .merge(protected)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn db(&self) -> &ChatDb {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
