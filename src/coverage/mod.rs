//! Coverage data: the contract the report consumes and the bundled backends.
//!
//! # Module Structure
//!
//! - [`types`] - Line states, the [`FileCoverage`]/[`CoverageResult`] traits
//!   and the concrete [`CoverageData`] model
//! - [`lcov`] - LCOV tracefile loader
//! - [`resultset`] - SimpleCov JSON result set loader
//! - [`nocov`] - Exclusion of `:nocov:` blocks using the source files

pub mod lcov;
pub mod nocov;
pub mod resultset;
pub mod types;

use std::path::Path;

use clap::ValueEnum;

pub use self::lcov::{parse_lcov_file, parse_lcov_str};
pub use nocov::{apply_nocov, DEFAULT_NOCOV_TOKEN};
pub use resultset::{parse_resultset, parse_resultset_file};
pub use types::{CoverageData, CoverageResult, FileCoverage, LineRecord, LineState, SourceFile};

use crate::errors::{CovReportError, Result};

/// On-disk coverage formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CoverageFormat {
    /// Pick by file extension: `.json` is a result set, anything else LCOV
    Auto,
    /// LCOV tracefile (`lcov.info`)
    Lcov,
    /// SimpleCov `.resultset.json`
    Resultset,
}

impl CoverageFormat {
    /// Resolve `Auto` against a concrete path.
    pub fn resolve(self, path: &Path) -> Result<Self> {
        match self {
            CoverageFormat::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some("json") => Ok(CoverageFormat::Resultset),
                Some("info" | "lcov") => Ok(CoverageFormat::Lcov),
                Some(_) => Err(CovReportError::UnknownFormat(path.to_path_buf())),
                None => Ok(CoverageFormat::Lcov),
            },
            other => Ok(other),
        }
    }
}

/// Load a coverage file in the given format.
pub fn load_coverage(path: &Path, format: CoverageFormat, root: &Path) -> Result<CoverageData> {
    match format.resolve(path)? {
        CoverageFormat::Resultset => parse_resultset_file(path, root),
        CoverageFormat::Lcov | CoverageFormat::Auto => parse_lcov_file(path, root),
    }
}
