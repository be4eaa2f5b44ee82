//! # launchgate-core
//!
//! Core type system for launchgate -- a macOS Endpoint Security agent that
//! authorizes process executions.
//!
//! This crate holds everything that does not touch the platform: the borrowed
//! event view delivered by the sensor, the allow/deny verdict model, argument
//! decoding, the decision engine, and configuration. The privileged session
//! and FFI marshalling live in `launchgate-sensor`.

pub mod config;
pub mod decode;
pub mod event;
pub mod policy;
pub mod verdict;

pub use event::{AuthEvent, EventKind};
pub use policy::{Authorizer, ExecPolicy, Outcome};
pub use verdict::{AuthResponse, AuthResult};
