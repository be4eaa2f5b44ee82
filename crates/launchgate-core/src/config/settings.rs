//! Application settings and TOML configuration parsing.
//!
//! Every field defaults to the built-in policy constants, so a missing config
//! file yields exactly the fixed-constant behavior. The subscription set and
//! policy are fixed for the process lifetime; there is no runtime reload.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Path of the OS relaunch helper every guarded launch is routed through.
pub const DEFAULT_RELAUNCH_HELPER: &str = "/usr/libexec/xpcproxy";

/// Canonical install path of the guarded application.
pub const DEFAULT_GUARDED_APP: &str = "/System/Applications/Music.app/Contents/MacOS/Music";

/// Top-level launchgate configuration, loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Relaunch helper path whose exec events are inspected.
    #[serde(default = "default_relaunch_helper")]
    pub relaunch_helper_path: String,

    /// Application path whose launch is denied.
    #[serde(default = "default_guarded_app")]
    pub guarded_app_path: String,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter when `LAUNCHGATE_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_relaunch_helper() -> String {
    DEFAULT_RELAUNCH_HELPER.to_string()
}

fn default_guarded_app() -> String {
    DEFAULT_GUARDED_APP.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            relaunch_helper_path: default_relaunch_helper(),
            guarded_app_path: default_guarded_app(),
            log: LogConfig::default(),
        }
    }
}

impl GateConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load from `path` when given and present; defaults otherwise.
    ///
    /// An explicitly named file that exists but fails to parse is an error --
    /// silently falling back to defaults would mask a misconfigured agent.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            _ => Ok(Self::default()),
        }
    }
}
