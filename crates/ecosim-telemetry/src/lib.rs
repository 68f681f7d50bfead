//! Telemetry recorders for the Ecosim simulation.
//!
//! # Modules
//!
//! - [`error`] -- [`TelemetryError`].
//! - [`recorder`] -- [`TelemetryRecorder`] writing the per-run episode
//!   CSV and agent-death JSONL files.
//!
//! [`TelemetryError`]: error::TelemetryError
//! [`TelemetryRecorder`]: recorder::TelemetryRecorder

pub mod error;
pub mod recorder;

pub use error::TelemetryError;
pub use recorder::{AgentDeathRecord, TelemetryRecorder};
