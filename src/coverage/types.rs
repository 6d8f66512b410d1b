//! Core data types for per-line coverage data.
//!
//! These are plain data definitions with no I/O. The report generator only
//! talks to coverage through the [`FileCoverage`] and [`CoverageResult`]
//! traits, so any measurement backend that can describe its lines in terms of
//! [`LineState`] can be rendered.

use std::path::{Path, PathBuf};

/// Classification of a single source line by the measurement tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineState {
    /// Executed at least once
    Covered,
    /// Executable but never executed
    Uncovered,
    /// Excluded from coverage (e.g. inside a nocov block)
    Skipped,
    /// Not executable (comments, blank lines, `end`)
    Never,
}

impl LineState {
    /// Whether the line counts against the file in the uncovered list.
    pub fn is_miss(self) -> bool {
        matches!(self, LineState::Uncovered)
    }
}

/// One line of a source file together with its coverage state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord {
    pub number: u32,
    pub state: LineState,
}

impl LineRecord {
    pub fn new(number: u32, state: LineState) -> Self {
        Self { number, state }
    }
}

/// Coverage of a single source file as seen by the report generator.
pub trait FileCoverage {
    /// Absolute path of the measured file.
    fn filename(&self) -> &Path;

    /// Lines ordered by line number.
    fn line_states(&self) -> &[LineRecord];

    /// Line coverage percentage precomputed by the backend (0.0 to 100.0).
    fn covered_percent(&self) -> f64;

    /// Number of lines that are not skipped.
    fn eligible_lines(&self) -> usize {
        self.line_states()
            .iter()
            .filter(|line| line.state != LineState::Skipped)
            .count()
    }

    /// Number of lines executed at least once.
    fn covered_lines(&self) -> usize {
        self.line_states()
            .iter()
            .filter(|line| line.state == LineState::Covered)
            .count()
    }
}

/// A complete, immutable coverage result for one run.
pub trait CoverageResult {
    type File: FileCoverage;

    fn files(&self) -> &[Self::File];

    /// Overall line coverage percentage across every file.
    fn covered_percent(&self) -> f64;

    /// Project root used to shorten displayed file names.
    fn root(&self) -> &Path;
}

/// Line coverage for one file, as loaded by the bundled backends.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    path: PathBuf,
    lines: Vec<LineRecord>,
    covered_percent: f64,
}

impl SourceFile {
    /// Build a file from its lines. Lines are sorted by number and the
    /// percentage is derived from them.
    pub fn new(path: impl Into<PathBuf>, mut lines: Vec<LineRecord>) -> Self {
        lines.sort_by_key(|line| line.number);
        let covered_percent = relevant_percent(&lines);
        Self {
            path: path.into(),
            lines,
            covered_percent,
        }
    }

    /// Build a file from a dense list of states, where index `i` is line `i + 1`.
    pub fn from_states(path: impl Into<PathBuf>, states: &[LineState]) -> Self {
        let lines = states
            .iter()
            .zip(1u32..)
            .map(|(state, number)| LineRecord::new(number, *state))
            .collect();
        Self::new(path, lines)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mark the given line numbers as skipped and recompute the percentage.
    pub fn skip_lines(&mut self, skipped: impl Fn(u32) -> bool) {
        for line in &mut self.lines {
            if skipped(line.number) {
                line.state = LineState::Skipped;
            }
        }
        self.covered_percent = relevant_percent(&self.lines);
    }

    /// Count of covered and uncovered lines (the relevant lines).
    pub fn relevant_counts(&self) -> (usize, usize) {
        relevant_counts(&self.lines)
    }
}

impl FileCoverage for SourceFile {
    fn filename(&self) -> &Path {
        &self.path
    }

    fn line_states(&self) -> &[LineRecord] {
        &self.lines
    }

    fn covered_percent(&self) -> f64 {
        self.covered_percent
    }
}

/// Coverage for a whole run: every measured file plus the project root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageData {
    root: PathBuf,
    files: Vec<SourceFile>,
}

impl CoverageData {
    pub fn new(root: impl Into<PathBuf>, files: Vec<SourceFile>) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    pub fn files_mut(&mut self) -> &mut [SourceFile] {
        &mut self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl CoverageResult for CoverageData {
    type File = SourceFile;

    fn files(&self) -> &[SourceFile] {
        &self.files
    }

    fn covered_percent(&self) -> f64 {
        let (covered, missed) = self
            .files
            .iter()
            .map(SourceFile::relevant_counts)
            .fold((0, 0), |(c, m), (fc, fm)| (c + fc, m + fm));
        percent(covered, covered + missed)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

fn relevant_counts(lines: &[LineRecord]) -> (usize, usize) {
    lines.iter().fold((0, 0), |(covered, missed), line| match line.state {
        LineState::Covered => (covered + 1, missed),
        LineState::Uncovered => (covered, missed + 1),
        LineState::Skipped | LineState::Never => (covered, missed),
    })
}

fn relevant_percent(lines: &[LineRecord]) -> f64 {
    let (covered, missed) = relevant_counts(lines);
    percent(covered, covered + missed)
}

// Files without relevant lines count as fully covered.
fn percent(covered: usize, relevant: usize) -> f64 {
    if relevant == 0 {
        100.0
    } else {
        covered as f64 / relevant as f64 * 100.0
    }
}
