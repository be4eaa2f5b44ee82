//! launchgate daemon binary entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use launchgate_core::config::GateConfig;
use launchgate_daemon::Daemon;

/// launchgate - an Endpoint Security agent that blocks one guarded
/// application launch and allows everything else.
#[derive(Parser, Debug)]
#[command(name = "launchgate", version, about)]
struct Args {
    /// Path to an optional TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Override the guarded application path.
    #[arg(long)]
    guarded_app: Option<String>,

    /// Override the relaunch helper path.
    #[arg(long)]
    relaunch_helper: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.as_deref().map(expand_tilde);
    let mut config = GateConfig::load_or_default(config_path.as_deref())
        .context("loading configuration")?;

    if let Some(guarded_app) = args.guarded_app {
        config.guarded_app_path = guarded_app;
    }
    if let Some(relaunch_helper) = args.relaunch_helper {
        config.relaunch_helper_path = relaunch_helper;
    }

    // LAUNCHGATE_LOG wins over the config file's log level.
    let env_filter = EnvFilter::try_from_env("LAUNCHGATE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        config = ?config_path,
        guarded_app = %config.guarded_app_path,
        "launchgate starting"
    );

    Daemon::new(config).run().await
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}
