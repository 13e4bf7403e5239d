use axum::{Json, body::Bytes, extract::State};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

pub const NO_MESSAGE: &str = "No message provided";
pub const INVALID_JSON: &str = "Invalid JSON body";

/// Pull a non-empty, trimmed message out of a raw request body.
pub fn parse_message(body: &[u8]) -> AppResult<String> {
    let request: ChatRequest = serde_json::from_slice(body)
        .map_err(|_| AppError::BadRequest(INVALID_JSON.to_string()))?;

    let trimmed = request.message.as_deref().unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(NO_MESSAGE.to_string()));
    }
    Ok(trimmed.to_string())
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> AppResult<Json<ChatResponse>> {
    let span = tracing::info_span!(
        "chat",
        request_id = %Uuid::new_v4(),
        message_len = tracing::field::Empty
    );

    relay_chat(state, body).instrument(span).await
}

async fn relay_chat(state: SharedState, body: Bytes) -> AppResult<Json<ChatResponse>> {
    let message = parse_message(&body)?;
    tracing::Span::current().record("message_len", message.len());

    let Some(relay) = state.relay.as_ref() else {
        tracing::error!("chat request rejected: relay is not configured");
        return Err(AppError::NotConfigured);
    };

    match relay.reply_for(&message).await {
        Ok(reply) => {
            tracing::info!(reply_len = reply.len(), "reply generated");
            Ok(Json(ChatResponse { reply }))
        }
        Err(err) => {
            tracing::error!(error = %err, detail = ?err, "generation API call failed");
            Err(AppError::from(err))
        }
    }
}
