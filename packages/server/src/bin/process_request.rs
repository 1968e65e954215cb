//! CLI for processing a single fulfillment request from a JSON file
//!
//! Useful for replaying a request the webhook skipped. Dispatching talks to
//! the vendor and writes fulfillment parameters; the approve / fail /
//! inquire report is only sent with `--report`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fulfillment_core::config::Config;
use fulfillment_core::domains::fulfillment::models::LifecycleRequest;
use fulfillment_core::domains::fulfillment::{report_outcome, Dispatcher, Disposition};
use fulfillment_core::kernel::ServerDeps;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "process_request")]
#[command(about = "Dispatch one marketplace fulfillment request")]
struct Cli {
    /// Path to the request JSON as delivered by the marketplace
    file: PathBuf,

    /// Report the outcome (approve / fail / inquire) to the marketplace
    #[arg(long)]
    report: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fulfillment_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let req: LifecycleRequest =
        serde_json::from_str(&raw).context("Request file is not a valid fulfillment request")?;

    let config = Config::from_env().context("Failed to load configuration")?;
    let deps = ServerDeps::from_config(&config).context("Failed to build dependencies")?;
    let marketplace = deps.marketplace.clone();
    let dispatcher = Dispatcher::new(deps, config.policy());

    let disposition = if req.is_pending() {
        let result = dispatcher.dispatch(&req).await;
        if cli.report {
            report_outcome(marketplace.as_ref(), &req.id, &result)
                .await
                .context("Failed to report outcome to marketplace")?;
        }
        Disposition::from_result(&req.id, &result)
    } else {
        Disposition::Ignored {
            request_id: req.id.clone(),
        }
    };

    println!("{}", serde_json::to_string_pretty(&disposition)?);
    Ok(())
}
