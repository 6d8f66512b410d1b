use clap::Parser;
use std::path::PathBuf;

use crate::config::{CovReportConfig, ReportConfig};
use crate::coverage::CoverageFormat;
use crate::formatting::{ColorMode, FormattingConfig};

#[derive(Parser, Debug)]
#[command(name = "covreport")]
#[command(about = "Print a per-file and per-directory coverage table", long_about = None)]
#[command(version)]
pub struct Cli {
    /// LCOV tracefile or SimpleCov .resultset.json
    pub coverage_file: PathBuf,

    /// Coverage file format
    #[arg(short, long, value_enum)]
    pub format: Option<CoverageFormat>,

    /// Project root used to shorten file names (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Maximum table width in columns (0 disables width fitting)
    #[arg(long = "max-cols", env = "COVREPORT_MAX_COLS")]
    pub max_cols: Option<usize>,

    /// Omit files and directories without relevant lines
    #[arg(long = "skip-empty")]
    pub skip_empty: bool,

    /// Omit fully covered files and directories
    #[arg(long = "skip-full")]
    pub skip_full: bool,

    /// Color output: auto, always, never
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Marker of excluded blocks in source files
    #[arg(long = "nocov-token")]
    pub nocov_token: Option<String>,

    /// Configuration file (defaults to the nearest .covreport.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Resolve report settings: flags, then the config file, then defaults.
    pub fn report_config(&self, file: &CovReportConfig, formatting: FormattingConfig) -> ReportConfig {
        let mut config = ReportConfig::default().with_file_settings(&file.report);
        if let Some(max_cols) = self.max_cols {
            config.max_cols = max_cols;
        }
        config.skip_empty |= self.skip_empty;
        config.skip_full |= self.skip_full;
        config.use_color = formatting.with_override(self.color).color.should_use_color();
        config
    }

    pub fn coverage_format(&self, file: &CovReportConfig) -> CoverageFormat {
        self.format
            .or(file.format.map(CoverageFormat::from))
            .unwrap_or(CoverageFormat::Auto)
    }

    pub fn nocov_token<'a>(&'a self, file: &'a CovReportConfig) -> &'a str {
        self.nocov_token
            .as_deref()
            .or(file.nocov_token.as_deref())
            .unwrap_or(crate::coverage::DEFAULT_NOCOV_TOKEN)
    }

    /// Default log level for the given number of `-v` flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
