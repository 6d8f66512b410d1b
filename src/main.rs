use anyhow::{Context, Result};
use clap::Parser;
use covreport::cli::Cli;
use covreport::config::{self, CovReportConfig};
use covreport::coverage::{apply_nocov, load_coverage};
use covreport::formatting::FormattingConfig;
use covreport::{CoverageReporter, CoverageResult};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "COVREPORT_LOG";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let file_config = load_file_config(&cli)?;
    let report_config = cli.report_config(&file_config, FormattingConfig::from_env());

    let root = resolve_root(&cli, &file_config)?;

    let format = cli.coverage_format(&file_config);
    let mut coverage = match load_coverage(&cli.coverage_file, format, &root) {
        Ok(coverage) => coverage,
        Err(e) if e.is_not_found() => {
            info!("{}. Nothing to report.", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if coverage.is_empty() {
        info!("No files in {}. Nothing to report.", cli.coverage_file.display());
        return Ok(());
    }
    info!(
        "Loaded {} files from {}",
        coverage.files().len(),
        cli.coverage_file.display()
    );

    apply_nocov(&mut coverage, cli.nocov_token(&file_config));

    CoverageReporter::new(report_config)
        .with_result(coverage)
        .report_to_stdout()
        .context("Failed to write coverage report")
}

fn load_file_config(cli: &Cli) -> Result<CovReportConfig> {
    match &cli.config {
        Some(path) => Ok(config::load_config_file(path)?),
        None => Ok(config::load_config()),
    }
}

/// Project root as an absolute path, so it prefixes the absolute file names
/// found in coverage data.
fn resolve_root(cli: &Cli, file_config: &CovReportConfig) -> Result<PathBuf> {
    match cli.root.as_ref().or(file_config.root.as_ref()) {
        Some(root) => std::path::absolute(root)
            .with_context(|| format!("Failed to resolve root {}", root.display())),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
