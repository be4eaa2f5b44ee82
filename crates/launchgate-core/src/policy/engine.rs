//! The exec-authorization decision engine.
//!
//! [`ExecPolicy`] encodes exactly one rule: an execution routed through the
//! OS relaunch helper whose `argv[0]` is the guarded application's install
//! path is denied; every other execution is allowed. The engine is fail-open
//! by design -- a hook this narrow must never block unrelated executions,
//! since a broad false-positive denial could make the machine unusable.

use tracing::{trace, warn};

use super::Authorizer;
use crate::decode::decode;
use crate::event::{AuthEvent, EventKind};
use crate::verdict::AuthResponse;

/// End state of one evaluation. Each delivered event resolves to exactly one
/// of these; only [`Outcome::Ignored`] produces no reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Event kind we did not subscribe to: no verdict at all.
    Ignored,
    /// Subject is not the relaunch helper: allow without inspecting argv.
    HelperBypassAllow,
    /// Relaunch helper with an empty argv: nothing to classify, allow.
    EmptyArgsAllow,
    /// `argv[0]` is not the guarded application: allow.
    ArgMismatchAllow,
    /// `argv[0]` is exactly the guarded application: deny.
    GuardedTargetDeny,
}

impl Outcome {
    /// The reply owed to the OS for this outcome, if any.
    pub fn response(self) -> Option<AuthResponse> {
        match self {
            Outcome::Ignored => None,
            Outcome::GuardedTargetDeny => Some(AuthResponse::deny_cached()),
            Outcome::HelperBypassAllow
            | Outcome::EmptyArgsAllow
            | Outcome::ArgMismatchAllow => Some(AuthResponse::allow_cached()),
        }
    }
}

/// The one-rule exec policy: deny the guarded application's launch through
/// the relaunch helper, allow everything else.
///
/// Holds only the two fixed path constants; evaluation reads event data and
/// nothing else, so the same `(path, argv)` pair always yields the same
/// verdict and concurrent invocations are safe.
#[derive(Debug, Clone)]
pub struct ExecPolicy {
    /// The OS-owned relaunch helper every interesting launch goes through.
    relaunch_helper: String,
    /// Canonical install path of the application whose launch is blocked.
    guarded_app: String,
}

impl ExecPolicy {
    /// A policy with explicit paths.
    pub fn new(relaunch_helper: impl Into<String>, guarded_app: impl Into<String>) -> Self {
        Self {
            relaunch_helper: relaunch_helper.into(),
            guarded_app: guarded_app.into(),
        }
    }

    /// The guarded application path this policy denies.
    pub fn guarded_app(&self) -> &str {
        &self.guarded_app
    }

    /// The relaunch helper path this policy inspects.
    pub fn relaunch_helper(&self) -> &str {
        &self.relaunch_helper
    }

    /// Walk the decision chain for one event.
    ///
    /// Synchronous end to end: two string comparisons and no I/O, so the ES
    /// response deadline is honored with a wide margin.
    pub fn evaluate(&self, event: &AuthEvent<'_>) -> Outcome {
        if event.kind != EventKind::AuthExec {
            return Outcome::Ignored;
        }

        // Fast path: only launches routed through the relaunch helper are
        // worth inspecting. The guarded app's real launch goes through it.
        if decode(event.executable_path) != self.relaunch_helper {
            return Outcome::HelperBypassAllow;
        }

        let Some(first) = event.args.first() else {
            return Outcome::EmptyArgsAllow;
        };

        if decode(first) != self.guarded_app {
            return Outcome::ArgMismatchAllow;
        }

        Outcome::GuardedTargetDeny
    }

    /// The human-readable notice emitted when a guarded launch is blocked.
    pub fn deny_notice(&self) -> String {
        format!(
            "launch of {} detected, rejecting authorization",
            self.guarded_app
        )
    }
}

impl Default for ExecPolicy {
    fn default() -> Self {
        use crate::config::settings::{DEFAULT_GUARDED_APP, DEFAULT_RELAUNCH_HELPER};
        Self::new(DEFAULT_RELAUNCH_HELPER, DEFAULT_GUARDED_APP)
    }
}

impl Authorizer for ExecPolicy {
    fn authorize(&self, event: &AuthEvent<'_>) -> Option<AuthResponse> {
        let outcome = self.evaluate(event);
        match outcome {
            Outcome::GuardedTargetDeny => {
                warn!(guarded_app = %self.guarded_app, "{}", self.deny_notice());
            }
            other => trace!(outcome = ?other, "exec authorization resolved"),
        }
        outcome.response()
    }
}
