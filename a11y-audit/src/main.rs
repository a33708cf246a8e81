//! Accessibility audit service (a11y-audit) - Main entry point
//!
//! Accepts a website URL, runs an automated WCAG scan through the scanner
//! service, and returns a prioritized, validated report with optional AI
//! explanations.

use std::net::SocketAddr;
use std::path::PathBuf;

use a11y_audit::config::{AuditConfig, MODULE_NAME};
use a11y_audit::{build_router, AppState};
use a11y_common::config::resolve_config_location;
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for a11y-audit
#[derive(Parser, Debug)]
#[command(name = "a11y-audit")]
#[command(about = "Accessibility audit service")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level when RUST_LOG is unset (overrides config)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let location = resolve_config_location(args.config.as_deref(), MODULE_NAME);
    let mut config = AuditConfig::load(&location).context("Failed to load configuration")?;

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("a11y_audit={0},a11y_common={0},tower_http=info", config.logging.level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting a11y-audit v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!(?location, "Configuration resolved");
    info!(
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        scanner = %config.scanner.endpoint,
        "Audit settings"
    );

    let state = AppState::from_config(&config).context("Failed to initialize services")?;
    let sweeper = state.admission.spawn_sweeper(config.sweep_interval());

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("Invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("a11y-audit listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    sweeper.abort();
    served.context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
