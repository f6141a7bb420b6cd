//! ytdata CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytdata::cli::{commands, Cli, Commands};
use ytdata::config::{ApiConfig, Settings, API_KEY_ENV};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = match &cli.config {
        Some(path) => Settings::expand_path(path),
        None => Settings::default_config_path(),
    };
    let settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging; stdout belongs to the stdio transport
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ytdata={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match &cli.command {
        Commands::Serve { host, port } => {
            let config = resolve_credentials(&cli, &settings)?;
            commands::run_serve(host.clone(), *port, config, settings).await?;
        }

        Commands::Mcp => {
            let config = resolve_credentials(&cli, &settings)?;
            commands::run_mcp(config, settings).await?;
        }

        Commands::Call { tool, args } => {
            let config = resolve_credentials(&cli, &settings)?;
            commands::run_call(tool, args.as_deref(), config, settings).await?;
        }

        Commands::Tools => {
            commands::run_tools(&settings);
        }

        Commands::Config { action } => {
            commands::run_config(action, &config_path, settings)?;
        }
    }

    Ok(())
}

/// Resolve the API key once, before anything talks to YouTube.
fn resolve_credentials(cli: &Cli, settings: &Settings) -> Result<ApiConfig> {
    let env_key = std::env::var(API_KEY_ENV).ok();
    let config = ApiConfig::resolve(cli.yt_key.as_deref(), env_key.as_deref(), &settings.youtube)?;
    Ok(config)
}
