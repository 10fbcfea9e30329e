//! Request handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::error;

use crate::domain::{ChatRequest, ChatResponse};

use super::AppState;

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    match state.planner.handle_chat(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!(error = %e, "chat: turn failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tripdaemon",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
