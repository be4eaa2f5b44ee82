//! launchgate daemon orchestration logic.
//!
//! The [`Daemon`] struct wires the decision engine into the privileged
//! session and runs until a shutdown signal arrives. Everything that can go
//! wrong here is startup-shaped: once the session is up, the agent does no
//! work of its own -- the OS drives the engine through the handler.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use launchgate_core::config::GateConfig;
use launchgate_core::ExecPolicy;
use launchgate_sensor::{ClientError, EsSession};

/// The launchgate daemon.
pub struct Daemon {
    config: GateConfig,
}

impl Daemon {
    /// Create a daemon from the given configuration.
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// Establish the session, wait for SIGINT/SIGTERM, tear down.
    ///
    /// Any error out of here reaches `main` and exits the process non-zero:
    /// an agent that cannot establish its security hook has no safe degraded
    /// mode, so there is deliberately no retry or fallback path.
    pub async fn run(self) -> Result<()> {
        let policy = Arc::new(ExecPolicy::new(
            self.config.relaunch_helper_path.clone(),
            self.config.guarded_app_path.clone(),
        ));
        info!(
            relaunch_helper = %policy.relaunch_helper(),
            guarded_app = %policy.guarded_app(),
            "starting exec authorization agent"
        );

        let session = match EsSession::open(policy) {
            Ok(session) => session,
            Err(err) => {
                if let Some(hint) = err
                    .downcast_ref::<ClientError>()
                    .and_then(ClientError::remediation)
                {
                    warn!("{hint}");
                }
                return Err(err).context("establishing Endpoint Security session");
            }
        };

        wait_for_shutdown().await?;

        // All in-flight deliveries are done once the OS sees the unsubscribe
        // implied by deletion; we only get here on process shutdown.
        session.close();
        info!("launchgate stopped");
        Ok(())
    }
}

/// Block until SIGINT or SIGTERM.
async fn wait_for_shutdown() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm =
        signal(SignalKind::terminate()).context("installing SIGTERM handler")?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("waiting for SIGINT")?;
            info!("received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("received SIGTERM, shutting down");
        }
    }
    Ok(())
}
