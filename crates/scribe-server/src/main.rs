use anyhow::Context;
use clap::Parser;
use scribe_gemini::{GeminiClient, GeminiConfig};
use scribe_server::{app, AppState};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// CodeScribe analysis service
#[derive(Debug, Parser)]
#[command(name = "scribe-server", version, about = "AI code documentation and audit service")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Fail fast: no credential, no service.
    let config = GeminiConfig::from_env()
        .context("refusing to start without a model service credential")?;
    tracing::info!(model = %config.model, "configuration loaded");

    let client = GeminiClient::new(Arc::new(config)).context("failed to build model client")?;
    let state = AppState::new(client);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app(state))
        .await
        .context("server terminated")?;
    Ok(())
}
