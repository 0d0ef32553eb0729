//! Shared runtime infrastructure for Stratus.
//!
//! - [`telemetry`] - `tracing` subscriber configuration

pub mod telemetry;

pub use telemetry::{TracingConfig, TracingFormat};
