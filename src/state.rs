// src/state.rs
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::error::UpstreamError;
use crate::services::responses::ResponsesClient;

pub type SharedState = Arc<AppState>;

/// Read-only state shared by every request.
#[derive(Debug)]
pub struct AppState {
    /// `None` when the API key or prompt id is missing; `/chat` then fails.
    pub relay: Option<ResponsesClient>,
}

impl AppState {
    pub fn new(relay: Option<ResponsesClient>) -> Self {
        Self { relay }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, UpstreamError> {
        let relay = match config.openai() {
            Some(settings) => Some(ResponsesClient::new(settings.clone())?),
            None => {
                tracing::warn!(
                    "OPENAI_API_KEY or CUBHOUSE_PROMPT_ID not set; /chat will answer with an error"
                );
                None
            }
        };
        Ok(Self::new(relay))
    }
}
