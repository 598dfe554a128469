use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use lethe_core::command::ForgottenEngine;
use lethe_core::error::Error as CoreError;

type AppState = Arc<ForgottenEngine>;

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Maps core errors onto transport status codes. Validation outcomes never
/// reach this path — the dispatcher answers them in-band with `error: 1` —
/// so anything arriving here is a storage or internal fault.
pub struct AppError(CoreError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self.0 {
            CoreError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
            CoreError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            other => {
                tracing::error!("internal error: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError(e)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /command -- dispatch a forgotten-files command.
///
/// Error codes are in-band: a malformed key field or unknown command name
/// still answers HTTP 200 with `{"error": 1}`.
pub async fn command_handler(
    State(engine): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let response = engine.dispatch(&body).await?;
    Ok(Json(response))
}

/// GET /health
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
