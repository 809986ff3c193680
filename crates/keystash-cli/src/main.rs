//! keystash CLI entry point.

use clap::Parser;
use keystash_cli::{load_config, run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Initialize logging; RUST_LOG overrides the configured level
    let level = config.logging.level.raised(cli.verbose);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("keystash={}", level.as_str()).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Run the command
    run(cli, config).await
}
