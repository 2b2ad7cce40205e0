//! Pocketwise Web Server
//!
//! Axum-based REST API serving tracker summaries and budget insights from a
//! ledger file.
//!
//! Security features:
//! - Restrictive CORS policy (allowed origins come from configuration)
//! - Security headers on every response
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use pocketwise_core::{InsightEngine, Ledger};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub ledger: Ledger,
    pub config: ServerConfig,
    /// Single-tracker engine, reused across requests
    pub engine: InsightEngine,
}

/// Create the application router
pub fn create_router(ledger: Ledger, config: ServerConfig) -> Router {
    let cors = build_cors(&config);

    let state = Arc::new(AppState {
        ledger,
        config,
        engine: InsightEngine::for_tracker(),
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Trackers
        .route("/trackers", get(handlers::list_trackers))
        .route("/trackers/:id/summary", get(handlers::get_tracker_summary))
        .route("/trackers/:id/categories", get(handlers::get_tracker_categories))
        .route(
            "/trackers/:id/transactions",
            get(handlers::list_tracker_transactions),
        )
        .route("/trackers/:id/insights", get(handlers::get_tracker_insights))
        // Insights
        .route("/insights", get(handlers::get_dashboard_insights))
        .route("/insights/analyze", post(handlers::analyze_tracker))
        .route("/dashboard", get(handlers::get_dashboard));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        return cors;
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Start the server
pub async fn serve(ledger: Ledger, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    let app = create_router(ledger, config);
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
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map library errors onto client-facing statuses
    pub fn from_core(err: pocketwise_core::Error) -> Self {
        let message = err.to_string();
        match err {
            pocketwise_core::Error::NotFound(_) => Self::not_found(&message),
            pocketwise_core::Error::InvalidData(_) => Self::bad_request(&message),
            other => Self::from(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
