//! Borrowed view of a single Endpoint Security occurrence.
//!
//! The OS delivers each event to the handler exactly once; every buffer in an
//! [`AuthEvent`] is only valid for that single invocation, which the lifetime
//! parameter enforces. Nothing here is retained past the verdict reply.

/// Kind tag for a delivered event.
///
/// Only [`EventKind::AuthExec`] carries a decision. The subscription set makes
/// any other kind unreachable in practice, but the engine still treats it as a
/// safe no-op rather than asserting unreachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// An `AUTH_EXEC` authorization request: a process is about to replace
    /// its image and the OS is waiting on our verdict.
    AuthExec,
    /// Any event kind we did not subscribe to.
    Other,
}

/// One delivered event, borrowed from the platform message for the duration
/// of a single handler invocation.
#[derive(Debug, Clone, Copy)]
pub struct AuthEvent<'a> {
    /// Classified kind of the event.
    pub kind: EventKind,
    /// Executable path of the subject process, as the raw NUL-terminated
    /// bytes the kernel handed us. Decoded lazily by the engine.
    pub executable_path: &'a [u8],
    /// Invocation arguments of the pending image, in order. Empty for
    /// non-exec kinds.
    pub args: &'a [&'a [u8]],
}

impl<'a> AuthEvent<'a> {
    /// An `AUTH_EXEC` event with the given subject path and argv buffers.
    pub fn auth_exec(executable_path: &'a [u8], args: &'a [&'a [u8]]) -> Self {
        Self {
            kind: EventKind::AuthExec,
            executable_path,
            args,
        }
    }

    /// An event of a kind we did not subscribe to. Carries the subject path
    /// (valid on every message) and no arguments.
    pub fn other(executable_path: &'a [u8]) -> Self {
        Self {
            kind: EventKind::Other,
            executable_path,
            args: &[],
        }
    }
}
