use anyhow::Context;
use std::sync::Arc;

use prompt_relay::{config::RelayConfig, routes, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RelayConfig::from_env().context("invalid configuration")?;
    telemetry::init(&config);

    let state = Arc::new(AppState::from_config(&config).context("failed to build HTTP client")?);

    let app = routes::app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("prompt relay listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
