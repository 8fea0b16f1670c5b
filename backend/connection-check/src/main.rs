use anyhow::{Context, Result};
use connection_check::config::Config;
use connection_check::{report, LiveChecks};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Variables already exported win over .env
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries only the diagnostic lines
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "connection_check=warn,dependency_health=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(timeout = ?config.timeout, "starting dependency checks");

    let status = connection_check::run(config, &LiveChecks, std::io::stdout().lock())
        .await
        .context("Failed to write check results")?;

    info!(?status, "dependency checks finished");
    Ok(ExitCode::from(report::exit_status(status)))
}
