use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::coverage::CoverageFormat;

pub const DEFAULT_MAX_COLS: usize = 80;

/// Settings for one report. Immutable once the reporter is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Total table width to fit into; `0` disables width negotiation
    pub max_cols: usize,
    /// Omit rows that have no eligible lines
    pub skip_empty: bool,
    /// Omit rows at exactly 100% (the summary row is always kept)
    pub skip_full: bool,
    /// Wrap cells in ANSI color escapes
    pub use_color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_cols: DEFAULT_MAX_COLS,
            skip_empty: false,
            skip_full: false,
            use_color: true,
        }
    }
}

impl ReportConfig {
    /// Fill unset values from a config file section.
    pub fn with_file_settings(mut self, section: &ReportSection) -> Self {
        if let Some(max_cols) = section.max_cols {
            self.max_cols = max_cols;
        }
        if let Some(skip_empty) = section.skip_empty {
            self.skip_empty = skip_empty;
        }
        if let Some(skip_full) = section.skip_full {
            self.skip_full = skip_full;
        }
        self
    }
}

/// Root structure of `.covreport.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CovReportConfig {
    /// Project root used to shorten file names
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Coverage file format, overridden by `--format`
    #[serde(default)]
    pub format: Option<FileFormat>,

    /// Token marking excluded blocks (`# :nocov:`)
    #[serde(default)]
    pub nocov_token: Option<String>,

    /// Table settings
    #[serde(default)]
    pub report: ReportSection,
}

/// `[report]` table of the config file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ReportSection {
    #[serde(default)]
    pub max_cols: Option<usize>,
    #[serde(default)]
    pub skip_empty: Option<bool>,
    #[serde(default)]
    pub skip_full: Option<bool>,
}

/// Serialized form of [`CoverageFormat`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Auto,
    Lcov,
    Resultset,
}

impl From<FileFormat> for CoverageFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Auto => CoverageFormat::Auto,
            FileFormat::Lcov => CoverageFormat::Lcov,
            FileFormat::Resultset => CoverageFormat::Resultset,
        }
    }
}
