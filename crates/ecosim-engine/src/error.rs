//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and the run loop.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ecosim_core::ConfigError,
    },

    /// Telemetry recording failed.
    #[error("telemetry error: {source}")]
    Telemetry {
        /// The underlying telemetry error.
        #[from]
        source: ecosim_telemetry::TelemetryError,
    },
}
