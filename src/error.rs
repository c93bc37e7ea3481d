//! Conversion error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion. Per-line processing never fails.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input missing, unreadable, or not UTF-8. Raised before any stage runs.
    #[error("cannot read input file `{}`", .path.display())]
    FileNotAccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output could not be created or written; its contents are undefined.
    #[error("cannot write output file `{}`", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConvertError::FileNotAccessible { path, .. } | ConvertError::WriteFailure { path, .. } => path,
        }
    }
}
