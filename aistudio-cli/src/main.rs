//! AI Studio CLI
//!
//! Command-line interface for the AI Studio extraction apps.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aistudio_client::CancellationToken;
use aistudio_client::config::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, REQUEST_TIMEOUT_ENV};

#[derive(Parser)]
#[command(name = "aistudio")]
#[command(about = "AI Studio web extraction CLI", long_about = None)]
struct Cli {
    /// API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: String,

    /// API base URL
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = REQUEST_TIMEOUT_ENV, default_value_t = 30)]
    timeout: u64,

    /// Run jobs through the blocking client
    #[arg(long, global = true)]
    blocking: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pipeable JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aistudio=info,aistudio_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_key: cli.api_key,
        base_url: cli.base_url,
        request_timeout_secs: cli.timeout,
        blocking: cli.blocking,
    };

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling job");
            trigger.cancel();
        }
    });

    handle_command(cli.command, &config, cancel).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "aistudio",
            "--api-key",
            "key",
            "search",
            "weather today",
            "--instant",
            "--blocking",
        ])
        .unwrap();

        assert!(cli.blocking);
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query, "weather today");
                assert_eq!(args.limit, 10);
                assert!(args.instant);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_schema_task() {
        let cli = Cli::try_parse_from([
            "aistudio",
            "--api-key",
            "key",
            "schema",
            "browse",
            "prices",
        ])
        .unwrap();
        match cli.command {
            Commands::Schema(args) => {
                assert_eq!(args.task, aistudio_client::TaskKind::BrowserAgent)
            }
            _ => panic!("expected schema command"),
        }
    }
}
