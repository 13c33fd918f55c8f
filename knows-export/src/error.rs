use thiserror::Error;

use crate::format::OutputFormat;

/// Errors raised while selecting or rendering an output format.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ExportError {
    /// The requested format name is not supported.
    #[error("unknown output format '{name}'. Available formats: {available}")]
    UnknownFormat {
        /// Format name as supplied.
        name: String,
        /// Comma-separated list of supported format names.
        available: String,
    },
    /// A property name cannot be written as a GML key.
    #[error("property '{key}' is not a valid GML key")]
    InvalidGmlKey {
        /// Offending property name.
        key: String,
    },
    /// A drawing could not be converted to an image or PDF.
    #[error("failed to render {format} drawing: {message}")]
    Render {
        /// Format being produced.
        format: OutputFormat,
        /// Description of the underlying failure.
        message: String,
    },
}
