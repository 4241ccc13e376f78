use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lab_report_server::config::{Args, Config};
use lab_report_server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from(args);

    tracing::info!("Starting lab-report-server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Binding to {}:{}", config.host, config.port);

    server::run(config).await
}
