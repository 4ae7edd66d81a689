use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::extract::extract_video_id;
use crate::provider::{ProviderError, TranscriptProvider};
use crate::transcript::format_transcript;

/// Transcript request payload
#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub url: String,
}

/// Transcript response payload
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub transcript: String,
}

/// Errors surfaced at the HTTP boundary.
///
/// The Display strings double as the client-visible detail messages.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Invalid YouTube URL")]
    InvalidUrl,

    #[error("Error fetching transcript: {0}")]
    Provider(#[from] ProviderError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl => StatusCode::BAD_REQUEST,
            Self::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body shape shared with the original service
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Shared handler state; one provider reused across requests
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn TranscriptProvider>,
}

/// Build the application router with CORS and tracing layers applied
pub fn router(provider: Arc<dyn TranscriptProvider>) -> Router {
    let state = AppState { provider };

    Router::new()
        .route("/yt-transcript", post(get_transcript))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // All origins, methods, and headers are permitted
        .layer(CorsLayer::permissive())
}

/// Handle transcript requests
async fn get_transcript(
    State(state): State<AppState>,
    Json(request): Json<TranscriptRequest>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let video_id = extract_video_id(&request.url).ok_or(ApiError::InvalidUrl)?;

    tracing::info!("Fetching transcript for video: {}", video_id);

    let entries = state.provider.fetch_transcript(&video_id).await?;
    let transcript = format_transcript(&entries);

    Ok(Json(TranscriptResponse { transcript }))
}

/// Health check handler
async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Assembled server with routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    pub fn new(config: &Config, provider: Arc<dyn TranscriptProvider>) -> Result<Self> {
        let listen_address = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .context("Invalid server host/port")?;

        Ok(Self {
            router: router(provider),
            listen_address,
        })
    }

    /// Get the configured listen address
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests until interrupted
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", local_addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
