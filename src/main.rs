// src/main.rs

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use comment_sentiment::config::ServiceConfig;
use comment_sentiment::server;

#[derive(Parser)]
#[command(name = "comment-sentiment")]
#[command(about = "Rate the sentiment of comments through a schema-constrained LLM call")]
#[command(version)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "SENTIMENT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "SENTIMENT_PORT", default_value = "8000")]
    port: u16,

    /// Maximum log level (error, warn, info, debug, trace)
    #[arg(long, env = "SENTIMENT_LOG_LEVEL", default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Validate configuration and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from current directory
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ServiceConfig::from_env();
    let validation = config.validate();

    match cli.command {
        Some(Commands::CheckConfig) => {
            println!("{}", validation.report());
            if !validation.is_valid() {
                bail!("configuration has {} error(s)", validation.errors.len());
            }
            Ok(())
        }
        None | Some(Commands::Serve) => {
            for warning in &validation.warnings {
                warn!("{}", warning);
            }
            if !validation.is_valid() {
                bail!("invalid configuration:\n{}", validation.report());
            }

            info!("Starting comment sentiment service (model: {})", config.provider.model);
            server::run(config, &cli.host, cli.port).await
        }
    }
}
