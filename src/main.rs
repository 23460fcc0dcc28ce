//! Main entry point for the gtrans-batch CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gtrans_batch::cli::commands::{self, Commands};
use gtrans_batch::TranslatorConfig;

/// Batch translator for tabular text datasets
#[derive(Parser, Debug)]
#[command(name = "gtrans-batch", version, about, long_about = None)]
struct Args {
    /// Translation service base URL (optional, defaults to TRANSLATE_HOST env var)
    #[arg(long)]
    service_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    let default_filter = format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Override config with CLI args if provided
    let mut config = TranslatorConfig::from_env()?;
    if let Some(service_url) = args.service_url {
        config.service_url = service_url;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    // Execute command
    match args.command {
        Some(Commands::Languages) => {
            commands::handle_languages(&config)?;
        }
        Some(Commands::Detect { text }) => {
            commands::handle_detect(&config, text).await?;
        }
        Some(Commands::Translate { text, src, dest }) => {
            commands::handle_translate(&config, text, src, dest).await?;
        }
        Some(Commands::Dataset(dataset)) => {
            commands::handle_dataset(&config, dataset).await?;
        }
        Some(Commands::Demo) => {
            commands::handle_demo(&config).await?;
        }
        Some(Commands::Server { host, port }) => {
            commands::handle_server(&config, host, port).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
