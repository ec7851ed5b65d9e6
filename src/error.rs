//! Pipeline error types.
//!
//! Every fallible step of the compose pipeline returns [`ComposeError`],
//! which can be matched to determine the underlying cause (bad parameter,
//! missing file, unparseable document).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while validating parameters or composing documents.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Parameter has the wrong shape (e.g. a non-integer interval).
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// Parameter is well-shaped but outside the allowed domain.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// A required template, custom document, or catalog entry is unreadable.
    #[error("missing resource '{}': {source}", .path.display())]
    MissingResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document failed to parse as YAML.
    #[error("failed to parse '{}': {source}", .path.display())]
    ParseFailure {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A document write (temp file or rename) failed.
    #[error("failed to write '{}': {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ComposeError {
    /// Attach a path to an I/O error from a read, mapping `NotFound` and
    /// friends onto the missing-resource arm of the taxonomy.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MissingResource {
            path: path.into(),
            source,
        }
    }

    /// Attach a path to a YAML parse error.
    pub fn parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::ParseFailure {
            path: path.into(),
            source,
        }
    }

    /// Attach a path to an I/O error from a write.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }
}
