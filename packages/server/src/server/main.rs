// Main entry point for the fulfillment webhook server

use anyhow::{Context, Result};
use fulfillment_core::{kernel::ServerDeps, server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fulfillment_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting subscription fulfillment processor");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        marketplace_api_url = %config.marketplace_api_url,
        allow_downsize = config.allow_downsize,
        webhook_auth = config.webhook_secret.is_some(),
        "Configuration loaded"
    );

    let server_deps = ServerDeps::from_config(&config).context("Failed to build dependencies")?;

    // Build application
    let app = build_app(server_deps, config.policy(), config.webhook_secret.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Webhook: http://localhost:{}/webhooks/fulfillment", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
