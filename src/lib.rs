// Export modules for library usage
pub mod cli;
pub mod config;
pub mod coverage;
pub mod errors;
pub mod formatting;
pub mod report;

// Re-export commonly used types
pub use crate::config::ReportConfig;
pub use crate::coverage::{
    load_coverage, CoverageData, CoverageFormat, CoverageResult, FileCoverage, LineRecord,
    LineState, SourceFile,
};
pub use crate::errors::{CovReportError, Result};
pub use crate::formatting::{ColorMode, FormattingConfig};
pub use crate::report::CoverageReporter;
