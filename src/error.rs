use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures at the metadata I/O boundary.
///
/// The editing engine itself never fails; only reading and writing files can.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read metadata from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("failed to write metadata to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("unsupported file type: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("malformed metadata in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl MetadataError {
    pub fn read(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        MetadataError::Read {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        MetadataError::Write {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Whether this failure happened while writing.
    pub fn is_write(&self) -> bool {
        matches!(self, MetadataError::Write { .. })
    }
}
