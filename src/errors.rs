//! Crate-level error type and process exit codes.

use std::path::PathBuf;

use thiserror::Error;

use crate::walker::WalkError;

/// Any failure surfaced by the library or the CLI.
#[derive(Debug, Error)]
pub enum MarrowError {
    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error("failed to write output to {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Map an error to a process exit code.
///
/// Missing or invalid roots get distinct codes so callers can tell a typo
/// from an I/O failure.
pub fn exit_code(error: &MarrowError) -> i32 {
    match error {
        MarrowError::Walk(WalkError::NotFound { .. }) => 2,
        MarrowError::Walk(WalkError::NotADirectory { .. }) => 3,
        _ => 1,
    }
}
