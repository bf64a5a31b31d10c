// Main entrypoint for the activities sign-up service.

use activities::app;
use activities::config::{Config, ConfigTrait};
use activities::liveness;
use activities::shutdown::GracefulShutdown;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const CONFIG_PATH: &str = "cfg/activities.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/activities.cfg.local.yaml";

/// Activities - Mergington High School extracurricular sign-up service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,
}

/// Loads the configuration struct from YAML file.
/// Tries local config first, then falls back to default config.
fn load_cfg(path: Option<PathBuf>) -> Result<Config> {
    if let Some(custom_path) = path {
        return Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path));
    }

    // Try local config first
    match Config::load(PathBuf::from(CONFIG_PATH_LOCAL)) {
        Ok(cfg) => Ok(cfg),
        Err(_) => Config::load(PathBuf::from(CONFIG_PATH))
            .with_context(|| format!("failed to load config from {}", CONFIG_PATH)),
    }
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_ref())
        .map(|s| s.as_str())
        .unwrap_or("debug");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

/// Builds the tokio runtime with the configured number of worker threads.
/// Zero means all available cores.
fn build_runtime(cfg: &Config) -> Result<tokio::runtime::Runtime> {
    let configured = cfg.runtime().num_cpus;
    let cores = if configured == 0 {
        num_cpus::get()
    } else {
        configured
    };

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cores)
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Config is loaded before the runtime since it sizes the runtime
    let path = args.cfg.clone();
    let cfg = load_cfg(path)?;

    // Configure logger (must be done after config is loaded)
    configure_logger(&cfg);

    if cfg.runtime().num_cpus == 0 {
        info!(
            component = "main",
            event = "num_cpus_configured",
            num_cpus = num_cpus::get(),
            "Available cores value configured (using all available cores)"
        );
    } else {
        warn!(
            component = "main",
            event = "num_cpus_configured",
            num_cpus = cfg.runtime().num_cpus,
            "Available cores value configured"
        );
    }

    build_runtime(&cfg)?.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<()> {
    // Create cancellation token for graceful shutdown
    let shutdown_token = CancellationToken::new();

    // Setup graceful shutdown handler
    let graceful_shutdown = GracefulShutdown::new(shutdown_token.clone());
    graceful_shutdown
        .set_graceful_timeout(cfg.shutdown_timeout())
        .await;

    // Initialize liveness probe for health checks
    let probe = Arc::new(liveness::Probe::new());

    // Initialize the application
    let app = app::App::new(shutdown_token.clone(), cfg, probe).await?;

    // Register app for graceful shutdown
    graceful_shutdown.add(1);

    // Start the app; it reports done once the server has stopped and closed
    if let Err(e) = app.serve(Arc::new(graceful_shutdown.clone())).await {
        error!(
            component = "main",
            scope = "app",
            event = "start_failed",
            error = %e,
            "failed to start app"
        );
        graceful_shutdown.done();
    }

    // Listen for OS signals or cancellation and wait for graceful shutdown
    if let Err(e) = graceful_shutdown.await_shutdown().await {
        error!(
            component = "main",
            scope = "service",
            event = "graceful_shutdown_failed",
            error = %e,
            "failed to gracefully shut down service"
        );
        return Err(e);
    }

    Ok(())
}
