use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Returns a simple status object with service version and session backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "interview-prep-api",
        "version": env!("CARGO_PKG_VERSION"),
        "session_backend": state.config.session_backend.as_str()
    }))
}
