//! Benchmark setup error type.
//!
//! Lets setup code propagate failures with `?` instead of `.expect()`.

use knows_core::GenerationError;
use knows_export::ExportError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Generator configuration was rejected.
    #[error("generator configuration failed: {0}")]
    Generation(#[from] GenerationError),
    /// Rendering a fixture graph failed.
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}
