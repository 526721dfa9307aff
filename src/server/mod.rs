//! HTTP boundary: multipart in, JSON out.

mod form;

pub use form::AnalyzeForm;

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{debug, error, info, warn};
use serde_json::json;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::error::{PipelineError, SetupError};
use crate::generator::SeoGenerator;

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const HEALTH_PATH: &str = "/health";

/// Room for form fields and multipart framing on top of the image itself
const FORM_OVERHEAD_BYTES: usize = 256 * 1024;

#[derive(Clone)]
struct AppState {
    generator: Arc<SeoGenerator>,
}

/// Build the API router around a shared generator
pub fn build_router(generator: Arc<SeoGenerator>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(ANALYZE_PATH, post(analyze))
        .layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ))
        .with_state(AppState { generator })
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &AppConfig, generator: Arc<SeoGenerator>) -> Result<(), SetupError> {
    let address = config.server.listen_addr.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| SetupError::Bind {
            address: address.clone(),
            source,
        })?;

    match listener.local_addr() {
        Ok(local) => info!("Listening on {}", local),
        Err(_) => info!("Listening on {}", address),
    }

    let app = build_router(generator, config.limits.max_image_bytes);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(SetupError::Serve)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    // Credential first: the form is not read without one
    if let Err(e) = state.generator.ensure_ready() {
        return error_response(&e);
    }

    let input = match multipart {
        Ok(multipart) => AnalyzeForm::read(multipart)
            .await
            .and_then(AnalyzeForm::into_input),
        Err(rejection) => {
            warn!("Rejected non-multipart request: {}", rejection);
            Err(PipelineError::InvalidInput(
                "フォームデータを送信してください。".to_string(),
            ))
        }
    };

    let result = match input {
        Ok(input) => {
            info!("Analyzing {} input", input.kind().as_str());
            state.generator.generate(&input).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Status code for a failure kind
pub fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::InvalidInput(_) | PipelineError::InsufficientContent { .. } => {
            StatusCode::BAD_REQUEST
        }
        PipelineError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Failures are already logged where they are classified
fn error_response(err: &PipelineError) -> Response {
    let status = status_for(err);
    debug!("Responding {} for {}", status, err.kind());
    (status, Json(json!({"error": err.to_string()}))).into_response()
}
