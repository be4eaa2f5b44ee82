//! Configuration for launchgate.

pub mod settings;

pub use settings::GateConfig;
