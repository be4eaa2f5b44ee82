//! # launchgate-sensor
//!
//! The privileged side of launchgate: owns the Endpoint Security client
//! session, subscribes it to `AUTH_EXEC`, and marshals each delivered
//! message into the core's borrowed event view so the decision engine never
//! touches FFI.
//!
//! The real implementation exists only on macOS; elsewhere the session
//! fails to open with a clear error, mirroring how the rest of the tree
//! handles platform-only subsystems.

pub mod client;

pub use client::error::ClientError;
pub use client::EsSession;
