mod config;
mod error;
mod routes;

use anyhow::{Context, Result};
use std::sync::Arc;
use synth::{ComponentSynthesizer, OpenAiClient};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Missing credentials stop the process before it binds.
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let client = OpenAiClient::new(config.llm.api_base.clone(), config.llm.api_key.clone());
    tracing::info!(api_base = client.base_url(), model = %config.llm.model, "Completion client ready");

    let synthesizer = ComponentSynthesizer::new(Arc::new(client), config.llm.model.clone());

    let app = routes::router(&config.server, synthesizer)?;

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    tracing::info!(
        "{} listening on http://{}{}",
        config.server.project_name,
        config.server.bind_addr,
        config.server.api_prefix
    );

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
