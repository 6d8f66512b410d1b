// Core configuration types
mod core;
mod loader;

pub use core::{CovReportConfig, FileFormat, ReportConfig, ReportSection, DEFAULT_MAX_COLS};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_file, parse_config,
    CONFIG_FILE_NAME,
};
