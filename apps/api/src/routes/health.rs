use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports the loaded vocabulary and entity labels alongside the version, so a
/// probe can tell which skill set this instance matches against.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "vocabulary_size": state.skills.vocabulary().len(),
        "entity_labels": state.config.entity_labels,
    }))
}
