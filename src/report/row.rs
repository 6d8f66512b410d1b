//! Rendering of individual table rows.

use crate::config::ReportConfig;
use crate::coverage::FileCoverage;

use super::cell::{fill, format_percent, round2, Align, Painter};
use super::layout::{ColumnLayout, DELIM};
use super::ranges::uncovered_lines;
use super::tree::TreeNode;

const FULL: f64 = 100.0;

/// Renders header, separator, file, directory and summary rows for one
/// computed layout.
#[derive(Debug, Clone, Copy)]
pub struct RowRenderer<'c> {
    layout: ColumnLayout,
    config: &'c ReportConfig,
    painter: Painter,
}

impl<'c> RowRenderer<'c> {
    pub fn new(layout: ColumnLayout, config: &'c ReportConfig) -> Self {
        Self {
            layout,
            config,
            painter: Painter::new(config.use_color),
        }
    }

    /// Dashes under every column, delimiters included.
    pub fn separator(&self) -> String {
        let columns = [
            self.layout.name_width,
            ColumnLayout::PCT_WIDTH,
            ColumnLayout::BRANCH_WIDTH,
            ColumnLayout::FUNCS_WIDTH,
            ColumnLayout::LINES_WIDTH,
            self.layout.missing_width,
        ];
        let dashes: Vec<String> = columns.iter().map(|&width| "-".repeat(width)).collect();
        format!("{}-", dashes.join(&DELIM.replace(' ', "-")))
    }

    pub fn header(&self) -> String {
        join_row(&[
            fill("File", self.layout.name_width, Align::Left, 0),
            fill("% Stmts", ColumnLayout::PCT_WIDTH, Align::Right, 0),
            fill("% Branch", ColumnLayout::BRANCH_WIDTH, Align::Right, 0),
            fill("% Funcs", ColumnLayout::FUNCS_WIDTH, Align::Right, 0),
            fill("% Lines", ColumnLayout::LINES_WIDTH, Align::Right, 0),
            fill("Uncovered Line #s", self.layout.missing_width, Align::Left, 0),
        ])
    }

    /// Row of a single file, or `None` when filtered out.
    #[allow(clippy::float_cmp)]
    pub fn file_row<F: FileCoverage>(&self, name: &str, file: &F, depth: usize) -> Option<String> {
        if self.config.skip_empty && file.eligible_lines() == 0 {
            return None;
        }

        let pct = round2(file.covered_percent());
        if self.config.skip_full && pct == FULL {
            return None;
        }

        let missing = fill(&uncovered_lines(file), self.layout.missing_width, Align::Left, 0);
        Some(self.coverage_row(
            name,
            depth,
            pct,
            pct,
            self.painter.uncovered(&missing, pct),
        ))
    }

    /// Aggregated row of a directory, or `None` when filtered out.
    ///
    /// The percentage is taken over every non-skipped line of the files
    /// below the directory.
    #[allow(clippy::float_cmp)]
    pub fn dir_row<F: FileCoverage>(
        &self,
        name: &str,
        node: &TreeNode<'_, F>,
        depth: usize,
    ) -> Option<String> {
        let files = node.files();
        if files.is_empty() {
            return None;
        }

        let covered: usize = files.iter().map(|f| f.covered_lines()).sum();
        let eligible: usize = files.iter().map(|f| f.eligible_lines()).sum();
        if self.config.skip_empty && eligible == 0 {
            return None;
        }

        let pct = if eligible > 0 {
            round2(covered as f64 / eligible as f64 * 100.0)
        } else {
            0.0
        };
        if self.config.skip_full && pct == FULL {
            return None;
        }

        Some(self.coverage_row(name, depth, pct, pct, self.empty_missing()))
    }

    /// The "All files" row. Never filtered.
    ///
    /// Colors follow the exact overall percentage; the displayed value is
    /// rounded.
    pub fn summary_row(&self, total_pct: f64) -> String {
        self.coverage_row(
            "All files",
            0,
            round2(total_pct),
            total_pct,
            self.empty_missing(),
        )
    }

    fn empty_missing(&self) -> String {
        fill("", self.layout.missing_width, Align::Left, 0)
    }

    fn coverage_row(
        &self,
        name: &str,
        depth: usize,
        shown_pct: f64,
        color_pct: f64,
        missing_cell: String,
    ) -> String {
        let pct_text = format_percent(shown_pct);
        let paint = |text: String, pct: f64| self.painter.by_coverage(&text, pct);

        join_row(&[
            paint(fill(name, self.layout.name_width, Align::Left, depth), color_pct),
            paint(fill(&pct_text, ColumnLayout::PCT_WIDTH, Align::Right, 0), color_pct),
            paint(fill("100", ColumnLayout::BRANCH_WIDTH, Align::Right, 0), FULL),
            paint(fill("100", ColumnLayout::FUNCS_WIDTH, Align::Right, 0), FULL),
            paint(fill(&pct_text, ColumnLayout::LINES_WIDTH, Align::Right, 0), color_pct),
            missing_cell,
        ])
    }
}

fn join_row(cells: &[String]) -> String {
    format!("{} ", cells.join(DELIM))
}
