//! Log output for the relay.
//!
//! The filter comes from [`RelayConfig::log_filter`], which honors `RUST_LOG`
//! from the environment or `.env`. Request and response lines from
//! `tower_http` show up at `debug`.

use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_LOG_FILTER, RelayConfig};

/// Parse `directives`, falling back to [`DEFAULT_LOG_FILTER`] when they are malformed.
pub fn build_filter(directives: &str) -> (EnvFilter, bool) {
    match EnvFilter::try_new(directives) {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_LOG_FILTER), false),
    }
}

/// Install the global fmt subscriber. A second call is a no-op.
pub fn init(config: &RelayConfig) {
    let (filter, valid) = build_filter(config.log_filter());

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        return;
    }

    if !valid {
        tracing::warn!(
            directives = config.log_filter(),
            "ignoring malformed log filter, using {}",
            DEFAULT_LOG_FILTER
        );
    }
}
