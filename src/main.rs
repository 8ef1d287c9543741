//! nagbot server: monitoring chat commands over a line-oriented host.
//!
//! Main entry point that wires all crates together, activates the plugin and
//! serves `/command arg...` lines read from stdin until EOF or a shutdown
//! signal.

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt};

use nagbot_core::config::AppConfig;
use nagbot_core::error::AppError;
use nagbot_monitor::HttpMonitoringClient;
use nagbot_plugin::registry::help_text;
use nagbot_plugin::{MonitoringPlugin, Plugin, poster};
use nagbot_store::{Settings, StoreManager};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "nagbot-server", version, about = "Nagios monitoring chat commands")]
struct Cli {
    /// Configuration overlay to load from `config/<env>.toml`
    #[arg(long, default_value = "development")]
    env: String,

    /// Channel the commands typed on stdin are issued in
    #[arg(long, default_value = "town-square")]
    channel: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, cli.channel).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    // Replies go to stdout, so logs stay on stderr.
    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Wire the plugin and serve commands until stdin closes or a signal arrives
async fn run(config: AppConfig, channel_id: String) -> Result<(), AppError> {
    tracing::info!("Starting nagbot v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Settings store ───────────────────────────────────
    tracing::info!(
        "Initializing settings store (provider: {})...",
        config.store.provider
    );
    let store = StoreManager::new(&config.store).await?;
    let settings = Settings::new(Arc::new(store));

    // ── Step 2: Monitoring backend ───────────────────────────────
    tracing::info!(url = %config.monitoring.url, "Initializing monitoring client...");
    let client = Arc::new(HttpMonitoringClient::new(&config.monitoring)?);

    // ── Step 3: Report sink ──────────────────────────────────────
    let poster = poster::from_config(&config.poster)?;

    // ── Step 4: Plugin activation ────────────────────────────────
    let plugin = MonitoringPlugin::new(settings, client, poster, config.defaults.clone());
    plugin.on_activate().await?;

    tracing::info!(channel_id = %channel_id, "Ready for commands, type /help for a list");

    // ── Step 5: Command loop ─────────────────────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                break;
            }
            line = lines.next_line() => line,
        };

        match line {
            Ok(Some(line)) => {
                if let Some(reply) = handle_line(&plugin, &channel_id, &line).await {
                    println!("{reply}");
                }
            }
            Ok(None) => {
                tracing::info!("Input closed");
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read command input");
                break;
            }
        }
    }

    // ── Step 6: Graceful shutdown ────────────────────────────────
    plugin.on_deactivate().await?;
    tracing::info!("nagbot shut down gracefully");
    Ok(())
}

/// Turn one input line into a reply. Blank lines are ignored.
async fn handle_line(plugin: &MonitoringPlugin, channel_id: &str, line: &str) -> Option<String> {
    let mut words = line.split_whitespace();
    let name = words.next()?;
    let name = name.strip_prefix('/').unwrap_or(name);
    let parameters: Vec<String> = words.map(str::to_string).collect();

    if name == "help" {
        return Some(help_text());
    }

    Some(plugin.execute_command(name, channel_id, &parameters).await)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
