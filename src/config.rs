// src/config.rs
//! Process configuration, read once at startup from the environment (and `.env`).

use std::{
    fmt,
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_PROMPT_VARIABLE: &str = "user_input";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_FILTER: &str = "prompt_relay=info,tower_http=debug";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Everything needed to talk to the Responses API.
#[derive(Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub prompt_id: String,
    pub prompt_version: Option<String>,
    pub model: String,
    pub base_url: String,
    pub variable: String,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &"<redacted>")
            .field("prompt_id", &self.prompt_id)
            .field("prompt_version", &self.prompt_version)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("variable", &self.variable)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: IpAddr,
    pub port: u16,
    log_filter: String,
    openai: Option<OpenAiSettings>,
}

impl RelayConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = match get("HOST") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key: "HOST", value: v })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let port = match get("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key: "PORT", value: v })?,
            None => DEFAULT_PORT,
        };

        let timeout = match get("OPENAI_TIMEOUT_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "OPENAI_TIMEOUT_SECS",
                        value: v,
                    });
                }
            },
            None => None,
        };

        let openai = match (get("OPENAI_API_KEY"), get("CUBHOUSE_PROMPT_ID")) {
            (Some(api_key), Some(prompt_id)) => Some(OpenAiSettings {
                api_key,
                prompt_id,
                prompt_version: get("OPENAI_PROMPT_VERSION"),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: get("OPENAI_BASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                variable: get("PROMPT_VARIABLE")
                    .unwrap_or_else(|| DEFAULT_PROMPT_VARIABLE.to_string()),
                timeout,
            }),
            _ => None,
        };

        let log_filter = get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            host,
            port,
            log_filter,
            openai,
        })
    }

    /// `None` when the API key or prompt id is missing.
    pub fn openai(&self) -> Option<&OpenAiSettings> {
        self.openai.as_ref()
    }

    /// `RUST_LOG` directives, or [`DEFAULT_LOG_FILTER`].
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
