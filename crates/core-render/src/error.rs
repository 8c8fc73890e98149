//! Renderer-level error types.

use std::io;

/// Errors the renderer can raise while driving sinks. Primary-sink failures
/// are fatal to the pipeline; auxiliary-sink failures are logged and that
/// sink is dropped from the fan-out by the caller.
#[derive(Debug, thiserror::Error)]
pub enum PteeError {
    #[error("primary output failed: {0}")]
    PrimarySink(#[source] io::Error),
    #[error("auxiliary sink {label} failed: {source}")]
    AuxiliarySink {
        label: String,
        #[source]
        source: io::Error,
    },
}
