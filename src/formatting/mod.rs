use colored::Color;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }

    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if var("NO_COLOR").is_some() {
            config.color = ColorMode::Never;
        }

        if var("CLICOLOR").as_deref() == Some("0") {
            config.color = ColorMode::Never;
        }

        if var("CLICOLOR_FORCE").as_deref() == Some("1") {
            config.color = ColorMode::Always;
        }

        config
    }

    /// An explicit mode from the command line wins over the environment.
    pub fn with_override(self, mode: Option<ColorMode>) -> Self {
        match mode {
            Some(color) => Self { color },
            None => self,
        }
    }
}

/// Coverage bucket used for color coding percentage cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageBucket {
    /// 80% and above
    High,
    /// 50% up to but excluding 80%
    Medium,
    /// Below 50%
    Low,
}

impl CoverageBucket {
    pub fn from_percent(pct: f64) -> Self {
        if pct >= 80.0 {
            Self::High
        } else if pct >= 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::High => Color::Green,
            Self::Medium => Color::Yellow,
            Self::Low => Color::Red,
        }
    }
}

/// Wrap text in the foreground escape of `color`.
///
/// Built from the color code rather than `colored::Colorize` so the result
/// does not depend on the process-wide `colored` override.
pub fn paint(text: &str, color: Color) -> String {
    format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text)
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check if stdout is a TTY
    std::io::stdout().is_terminal()
}
