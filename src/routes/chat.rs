use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::{error::AppError, message::ChatRequest, state::SharedState};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "rejected chat request body");
        AppError::InvalidRequest("Request body must be JSON with a \"message\" string".to_string())
    })?;

    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidRequest("Message cannot be empty".to_string()));
    }

    match state.flow.run(&payload.message).await {
        Ok(data) => Ok(Json(data)),
        Err(err) => {
            tracing::error!(error = %err, "proxy error");
            Err(err.into())
        }
    }
}
