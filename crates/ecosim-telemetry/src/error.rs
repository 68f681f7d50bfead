//! Error types for the telemetry recorders.

/// Errors that can occur while recording telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to create or write a telemetry file.
    #[error("telemetry I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to encode a death record as JSON.
    #[error("failed to encode death record: {source}")]
    Encode {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
