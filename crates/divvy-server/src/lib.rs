//! Divvy Web Server
//!
//! Axum-based REST API for the Divvy bill splitter.
//!
//! Endpoints:
//! - `GET  /health`        liveness check
//! - `POST /api/validate`  validate line items (and optionally item splits)
//! - `POST /api/split`     validate and allocate line items + item splits
//! - `POST /api/process`   receipt image + free-text rules through the configured backend
//!
//! Every `/api` response uses the `{status, message, data}` envelope.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use divvy_core::{SplitBackend, SplitConfig};

mod handlers;

/// Maximum request body size (7 MB, enough for a phone photo of a receipt)
pub const MAX_BODY_SIZE: usize = 7 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Tolerances used when validating bills
    pub split: SplitConfig,
}

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
    /// Extraction/interpretation backend for `/api/process` (None = disabled)
    pub backend: Option<Arc<dyn SplitBackend>>,
}

/// Response envelope for all API endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: &str, data: Option<T>) -> Json<Self> {
        Json(Self {
            status: "success",
            message: message.to_string(),
            data,
        })
    }
}

/// Parse a comma-separated origin list (e.g. from `DIVVY_ALLOWED_ORIGINS`)
pub fn parse_allowed_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Create the application router
pub fn create_router(config: ServerConfig, backend: Option<Arc<dyn SplitBackend>>) -> Router {
    match &backend {
        Some(b) => info!("Split backend configured: {}", b.name()),
        None => info!("ℹ️  No split backend configured, /api/process is disabled"),
    }

    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let state = Arc::new(AppState { config, backend });

    let api_routes = Router::new()
        .route("/validate", post(handlers::validate_bill))
        .route("/split", post(handlers::split_bill))
        .route("/process", post(handlers::process_bill));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

/// Start the server
pub async fn serve(
    host: &str,
    port: u16,
    config: ServerConfig,
    backend: Option<Arc<dyn SplitBackend>>,
) -> anyhow::Result<()> {
    if config.allowed_origins.is_empty() {
        info!("CORS: same-origin only");
    } else {
        warn!(origins = ?config.allowed_origins, "CORS: allowing cross-origin requests");
    }

    let app = create_router(config, backend);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    kind: Option<&'static str>,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            kind: None,
            internal: None,
        }
    }

    pub fn unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            kind: None,
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let mut body = serde_json::json!({
            "status": "error",
            "message": self.message,
        });
        if let Some(kind) = self.kind {
            body["kind"] = serde_json::Value::from(kind);
        }

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Bad bill data is the caller's problem: say exactly what is wrong
        if let Some(core) = err.downcast_ref::<divvy_core::Error>() {
            let kind = core.kind();
            if core.is_validation() {
                info!(kind, error = %core, "Rejected bill");
                return Self {
                    status: StatusCode::BAD_REQUEST,
                    message: core.to_string(),
                    kind: Some(kind),
                    internal: None,
                };
            }
            if matches!(core, divvy_core::Error::Backend(_)) {
                return Self {
                    status: StatusCode::BAD_GATEWAY,
                    message: "Split backend failed".to_string(),
                    kind: Some(kind),
                    internal: Some(err),
                };
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            kind: None,
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
