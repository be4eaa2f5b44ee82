//! Exec-authorization policy.
//!
//! The [`Authorizer`] trait is the single seam between the pure decision
//! engine and the FFI adapter in `launchgate-sensor`: one method, one event
//! in, at most one response out. [`ExecPolicy`] is the only implementation.

mod engine;

pub use engine::{ExecPolicy, Outcome};

use crate::event::AuthEvent;
use crate::verdict::AuthResponse;

/// Decides the fate of delivered events.
///
/// Invoked once per delivered event, on whatever thread the OS chooses, with
/// possibly several invocations in flight at once. Implementations must hold
/// no mutable state and must not block: the OS enforces a response deadline,
/// and a late reply forfeits the decision to the platform's own fail-safe.
pub trait Authorizer: Send + Sync {
    /// Evaluate one event.
    ///
    /// Returns `Some` with the verdict for `AUTH_EXEC` events, `None` for
    /// kinds we did not subscribe to (the adapter must not reply for those).
    fn authorize(&self, event: &AuthEvent<'_>) -> Option<AuthResponse>;
}
