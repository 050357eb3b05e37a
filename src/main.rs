mod adapters;
mod application;
mod config;
mod domain;
mod ports;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::{SlackMessenger, StatvfsDiskSource};
use application::{DiskSpaceService, RunError};
use config::{Args, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging; stdout is kept for delivery confirmations
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("diskspace2slack={}", config::log_level()).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_args(args)?;

    info!("Starting diskspace2slack v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    if config.slack_token.is_none() {
        warn!("SLACK_SECRET_KEY is not set, alerts will be rejected by Slack");
    }

    let messenger = SlackMessenger::with_api_url(
        config.slack_token.clone().unwrap_or_default(),
        config.slack_api_url.clone(),
    );
    let service = DiskSpaceService::new(Arc::new(StatvfsDiskSource::new()), Arc::new(messenger))
        .with_timeout(config.timeout);

    let result = service.run(&config.spec, &config.target).await;

    let delivered = match &result {
        Ok(report) => report.delivered.as_slice(),
        Err(RunError::Dispatch { delivered, .. }) => delivered.as_slice(),
        Err(_) => &[],
    };
    for alert in delivered {
        info!("Alert for {} landed in {}", alert.mount, alert.delivery.destination);
        println!(
            "{} - Message sent to {}",
            alert.delivery.timestamp, alert.delivery.destination
        );
    }

    let report = result?;
    info!(
        "✓ Checked {} mount(s), sent {} alert(s)",
        report.inspected,
        report.delivered.len()
    );

    Ok(())
}
