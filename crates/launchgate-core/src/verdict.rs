//! Authorization verdicts returned to the OS gatekeeper.

use serde::Serialize;

/// The binding allow/deny decision for a pending execution.
///
/// Discriminants match `es_auth_result_t` so the FFI adapter can pass them
/// through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u32)]
pub enum AuthResult {
    /// Permit the execution.
    Allow = 0,
    /// Block the execution.
    Deny = 1,
}

/// A verdict paired with the cache flag: when `cacheable` is set the OS may
/// reuse this decision for identical future requests without re-invoking the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthResponse {
    /// The verdict.
    pub result: AuthResult,
    /// Whether the OS may cache this decision.
    pub cacheable: bool,
}

impl AuthResponse {
    /// A cacheable allow. Every fail-open branch of the engine resolves here.
    pub fn allow_cached() -> Self {
        Self {
            result: AuthResult::Allow,
            cacheable: true,
        }
    }

    /// A cacheable deny, produced only for the exact guarded-target match.
    pub fn deny_cached() -> Self {
        Self {
            result: AuthResult::Deny,
            cacheable: true,
        }
    }
}
