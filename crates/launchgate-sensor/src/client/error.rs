//! Session-establishment error taxonomy.
//!
//! Every failure here is startup-fatal by design: an agent that cannot
//! establish its security hook has no safe degraded mode, so the daemon
//! surfaces the diagnostic and exits non-zero. No error type exists for the
//! per-event path at all -- ambiguity there resolves fail-open instead.

use thiserror::Error;

/// Raw `es_new_client_result_t` success code.
pub const ES_NEW_CLIENT_RESULT_SUCCESS: u32 = 0;

/// Failures establishing or subscribing the Endpoint Security session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("too many Endpoint Security clients are already connected (the system limit is 50)")]
    TooManyClients,

    #[error("executable is missing the com.apple.developer.endpoint-security.client entitlement")]
    NotEntitled,

    #[error("the parent process has not been granted Full Disk Access")]
    NotPermitted,

    #[error("the daemon is not running as root")]
    NotPrivileged,

    #[error("internal Endpoint Security error")]
    Internal,

    #[error("invalid arguments passed when creating the Endpoint Security client")]
    InvalidArgument,

    #[error("unknown Endpoint Security client creation failure (code {0})")]
    Unknown(u32),

    #[error("failed to subscribe the client to the AUTH_EXEC event")]
    SubscriptionFailed,
}

impl ClientError {
    /// Map a raw `es_new_client_result_t` code to an error.
    ///
    /// Returns `None` for the success code; every other code maps to exactly
    /// one variant with a non-empty diagnostic.
    pub fn from_create_code(code: u32) -> Option<Self> {
        match code {
            ES_NEW_CLIENT_RESULT_SUCCESS => None,
            1 => Some(Self::InvalidArgument),
            2 => Some(Self::Internal),
            3 => Some(Self::NotEntitled),
            4 => Some(Self::NotPermitted),
            5 => Some(Self::NotPrivileged),
            6 => Some(Self::TooManyClients),
            other => Some(Self::Unknown(other)),
        }
    }

    /// Operator-facing remediation hint for permission-shaped failures.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::NotPermitted => Some(
                "Grant Full Disk Access: System Settings > Privacy & Security > \
                 Full Disk Access, add the launchgate daemon, then restart it.",
            ),
            Self::NotPrivileged => Some("Run the daemon as root (e.g. via a LaunchDaemon)."),
            Self::NotEntitled => Some(
                "Sign the binary with the endpoint-security.client entitlement \
                 before installing it.",
            ),
            _ => None,
        }
    }
}
