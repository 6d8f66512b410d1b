//! Hierarchical coverage table.
//!
//! The reporter turns a [`CoverageResult`] into a column-aligned text table
//! with one row per directory and file, followed by an "All files" summary:
//!
//! ```text
//! ----------|---------|----------|---------|---------|-------------------
//! File      | % Stmts | % Branch | % Funcs | % Lines | Uncovered Line #s
//! ----------|---------|----------|---------|---------|-------------------
//! lib       |    75.0 |      100 |     100 |    75.0 |
//!  order.rb |    50.0 |      100 |     100 |    50.0 | 2
//!  user.rb  |   100.0 |      100 |     100 |   100.0 |
//! ----------|---------|----------|---------|---------|-------------------
//! All files |    75.0 |      100 |     100 |    75.0 |
//! ----------|---------|----------|---------|---------|-------------------
//! ```
//!
//! # Module Structure
//!
//! - [`ranges`] - Uncovered line numbers compressed into `a-b` ranges
//! - [`tree`] - Directory tree built from file paths
//! - [`layout`] - Column width negotiation
//! - [`cell`] - Padding, truncation and coloring of single cells
//! - [`row`] - Rendering of header, separator and data rows

pub mod cell;
pub mod layout;
pub mod ranges;
pub mod row;
pub mod tree;

use std::io::{self, Write};

use tracing::debug;

use crate::config::ReportConfig;
use crate::coverage::{CoverageResult, FileCoverage};

pub use cell::{fill, format_percent, round2, Align};
pub use layout::{compute_layout, ColumnLayout, DELIM, MISSING_COL, NAME_COL, PCT_COLS};
pub use ranges::{compress_ranges, uncovered_lines};
pub use row::RowRenderer;
pub use tree::{build_tree, Children, TreeNode};

/// Prints the coverage table for one result.
///
/// A reporter without a result is a no-op, as is a result without files.
#[derive(Debug)]
pub struct CoverageReporter<R> {
    config: ReportConfig,
    result: Option<R>,
}

impl<R: CoverageResult> CoverageReporter<R> {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            result: None,
        }
    }

    pub fn with_result(mut self, result: R) -> Self {
        self.result = Some(result);
        self
    }

    /// All lines of the report, without line terminators. Empty when there
    /// is nothing to report.
    pub fn render(&self) -> Vec<String> {
        let Some(result) = &self.result else {
            debug!("No coverage result attached, skipping report");
            return Vec::new();
        };
        let files = result.files();
        if files.is_empty() {
            debug!("Coverage result has no files, skipping report");
            return Vec::new();
        }

        let tree = build_tree(files, result.root());
        let layout = compute_layout(&tree, files, self.config.max_cols);
        debug!(
            "Rendering {} files with name width {} and uncovered width {}",
            files.len(),
            layout.name_width,
            layout.missing_width
        );

        let renderer = RowRenderer::new(layout, &self.config);
        let separator = renderer.separator();

        let mut lines = vec![
            String::new(),
            separator.clone(),
            renderer.header(),
            separator.clone(),
        ];
        walk(&renderer, &tree, 0, &mut lines);
        lines.push(separator.clone());
        lines.push(renderer.summary_row(result.covered_percent()));
        lines.push(separator);
        lines
    }

    /// Write the report to `out` in a single write.
    pub fn report(&self, out: &mut impl Write) -> io::Result<()> {
        let lines = self.render();
        if lines.is_empty() {
            return Ok(());
        }

        let mut text = lines.join("\n");
        text.push('\n');
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    pub fn report_to_stdout(&self) -> io::Result<()> {
        self.report(&mut io::stdout().lock())
    }
}

/// Depth-first rows in sorted order. Children of a filtered directory are
/// still visited.
fn walk<F: FileCoverage>(
    renderer: &RowRenderer<'_>,
    children: &Children<'_, F>,
    depth: usize,
    lines: &mut Vec<String>,
) {
    for (name, node) in children {
        match node {
            TreeNode::File(file) => lines.extend(renderer.file_row(name, *file, depth)),
            TreeNode::Directory(grandchildren) => {
                lines.extend(renderer.dir_row(name, node, depth));
                walk(renderer, grandchildren, depth + 1, lines);
            }
        }
    }
}
