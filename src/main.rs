//! Condo management backend (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!   .env ──────────┐
//!   environment ───┼──▶ ConfigResolver ──▶ ResolvedConfig ──┬──▶ logging
//!   configs/app.yaml ┘                                       │
//!                                                            ▼
//!   SIGINT/SIGTERM/SIGHUP ──▶ Shutdown ──────────────▶ HttpServer (placeholder)
//! ```
//!
//! Configuration is resolved once, before the server starts. A decode failure
//! aborts startup; a missing `.env` or config file only degrades it.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use condo_backend::config::loader::{DEFAULT_CONFIG_NAME, DEFAULT_ENV_FILE};
use condo_backend::lifecycle::{wait_for_signal, Shutdown};
use condo_backend::observability::logging;
use condo_backend::{ConfigResolver, HttpServer};

#[derive(Parser)]
#[command(name = "condo-backend")]
#[command(about = "Condo management backend service", long_about = None)]
struct Cli {
    /// Directory containing the YAML config file
    #[arg(long, default_value = "configs")]
    config_dir: PathBuf,

    /// Base name of the YAML config file (without extension)
    #[arg(long, default_value = DEFAULT_CONFIG_NAME)]
    config_name: String,

    /// Override file with KEY=VALUE lines
    #[arg(long, default_value = DEFAULT_ENV_FILE, conflicts_with = "no_env_file")]
    env_file: PathBuf,

    /// Do not read an override file
    #[arg(long)]
    no_env_file: bool,

    /// Resolve the configuration, print it (secrets redacted) and exit
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn override_file(&self) -> Option<PathBuf> {
        (!self.no_env_file).then(|| self.env_file.clone())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let override_file = cli.override_file();
    let resolver = ConfigResolver::new(cli.config_dir)
        .config_name(cli.config_name)
        .env_file(override_file);

    // The final subscriber depends on the resolved config, so resolution logs
    // go to a scoped bootstrap subscriber.
    let resolved = tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
        let resolved = resolver.resolve();
        if let Err(e) = &resolved {
            tracing::error!(error = %e, "Configuration rejected, not starting");
        }
        resolved
    });
    let config = Arc::new(resolved?);

    if cli.check {
        println!("{:#?}", config);
        return Ok(());
    }

    logging::init(&config.logging)?;

    let version = if config.app.version.is_empty() { "unknown" } else { config.app.version.as_str() };
    tracing::info!(
        name = %config.app.name,
        version = %version,
        address = %config.app.address(),
        shutdown_timeout = ?config.app.shutdown_timeout(),
        rate_limit = %config.api.rate_limit,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.app.address()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "{} started", config.app.name);

    let shutdown = Shutdown::new();
    let server = HttpServer::new(Arc::clone(&config));
    let mut server_task = tokio::spawn(server.run(listener, shutdown.clone()));

    tokio::select! {
        signal = wait_for_signal() => {
            tracing::info!(%signal, "Shutdown signal received");
            shutdown.trigger();
            server_task.await??;
        }
        result = &mut server_task => {
            result??;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
