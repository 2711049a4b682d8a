//! Chatvault - terminal chat client with saved sessions
//!
#![doc = "Chatvault - terminal chat client with saved sessions"]
#![doc = "Main entry point for the chatvault binary."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatvault::cli::{Cli, Commands};
use chatvault::commands;
use chatvault::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Chat { resume, .. } => {
            if let Some(id) = &resume {
                tracing::debug!("Resuming session: {}", id);
            }
            commands::chat::run_chat(config, resume).await?;
            Ok(())
        }
        Commands::History { command } => {
            tracing::info!("Starting history command");
            commands::history::handle_history(command, &config)?;
            Ok(())
        }
        Commands::Summarize { id, kind } => {
            tracing::info!("Summarizing session {}", id);
            commands::history::run_summarize(&config, &id, &kind).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with the transcript on stdout.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "chatvault=debug"
    } else {
        "chatvault=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
