//! Gradebook server entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Initialize core logging before any store access.
//! - Run the HTTP server until Ctrl-C.

use anyhow::{anyhow, Context};
use clap::Parser;
use gradebook_api::ServerConfig;
use gradebook_core::{default_log_level, init_logging, init_stderr_logging};
use log::{info, warn};
use std::net::SocketAddr;
use std::path::PathBuf;

/// In-memory academic records service.
#[derive(Debug, Parser)]
#[command(name = "gradebook", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "GRADEBOOK_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "GRADEBOOK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "GRADEBOOK_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Start with an empty store instead of the bootstrap records.
    #[arg(long)]
    no_seed: bool,
}

impl Args {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind: self.bind,
            seed: !self.no_seed,
        }
    }

    fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}

fn init_logger(args: &Args) -> anyhow::Result<()> {
    match &args.log_dir {
        Some(dir) => {
            let dir = dir
                .to_str()
                .ok_or_else(|| anyhow!("log dir is not valid UTF-8: {}", dir.display()))?;
            init_logging(args.log_level(), dir).map_err(anyhow::Error::msg)
        }
        None => init_stderr_logging(args.log_level()).map_err(anyhow::Error::msg),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=signal_listen module=cli status=error error={err}");
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    info!("event=shutdown_requested module=cli status=ok");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(&args)?;

    let config = args.server_config();
    gradebook_api::serve(&config, shutdown_signal())
        .await
        .with_context(|| format!("server on {} failed", config.bind))
}
