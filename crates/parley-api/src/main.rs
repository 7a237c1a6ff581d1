//! Parley server entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, loads configuration, initializes the database and
//! services, spawns the inactivity sweeper, then serves the HTTP API until
//! Ctrl+C or SIGTERM.

mod http;
mod state;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use parley_core::sweep::Sweeper;
use parley_infra::config::{load_config, resolve_data_dir};
use parley_infra::sqlite::pool::default_database_url;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "parley", version, about = "Minimal chat room backend")]
struct Cli {
    /// Bind address (overrides config.toml)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config.toml)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database URL (overrides the data-dir default)
    #[arg(long, env = "PARLEY_DATABASE_URL")]
    database_url: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,parley=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let data_dir = resolve_data_dir();
    tokio::fs::create_dir_all(&data_dir).await?;

    let mut config = load_config(&data_dir).await;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let database_url = cli.database_url.unwrap_or_else(default_database_url);
    let app_state = AppState::init(&database_url).await?;

    // Background inactivity sweep, cancelled on shutdown.
    let cancel = CancellationToken::new();
    let sweeper = Sweeper::new(app_state.presence.clone(), config.sweep.clone());
    let sweep_task = tokio::spawn(sweeper.run(cancel.clone()));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Parley listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel.cancel();
    let _ = sweep_task.await;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
