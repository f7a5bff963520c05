//! Error types for reading and writing manifests.
//!
//! Compilation itself never fails; malformed edges surface as runtime
//! prefetch misses, not as errors here.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    /// Manifest text is not valid JSON or does not match the manifest shape
    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
