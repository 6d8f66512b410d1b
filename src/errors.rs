//! Error types for loading coverage data and configuration.
//!
//! Rendering a report is infallible on well-formed input, so every variant
//! here originates at an I/O boundary: reading a tracefile, decoding a result
//! set, or parsing a config file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CovReportError {
    /// File system errors while reading an input
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed LCOV record
    #[error("invalid LCOV data in {}: {message}", path.display())]
    Lcov { path: PathBuf, message: String },

    /// Malformed JSON result set
    #[error("invalid coverage result set {}: {source}", path.display())]
    Resultset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed configuration file
    #[error("invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Input whose format could not be determined
    #[error("cannot determine coverage format of {}", .0.display())]
    UnknownFormat(PathBuf),
}

impl CovReportError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error means the input simply is not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, CovReportError>;
