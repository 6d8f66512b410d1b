//! Column widths of the report table.
//!
//! A row is laid out as
//!
//! ```text
//! name | % Stmts | % Branch | % Funcs | % Lines | uncovered<space>
//! ```
//!
//! The four percentage columns have fixed widths; only the name and the
//! uncovered-lines columns are negotiated against the configured width.

use crate::coverage::FileCoverage;

use super::ranges::uncovered_lines;
use super::tree::{max_name_width, Children};

/// Minimum width of the file name column.
pub const NAME_COL: usize = 4;
/// Width of a percentage column. The branch column is one wider.
pub const PCT_COLS: usize = 7;
/// Minimum width of the uncovered lines column.
pub const MISSING_COL: usize = 17;
/// Separator between cells.
pub const DELIM: &str = " | ";

/// Columns taken by everything except the name and uncovered-lines cells:
/// the percentage cells, the delimiters around them and the trailing space.
pub const PCT_BLOCK_WIDTH: usize = DELIM.len() + 4 * (PCT_COLS + DELIM.len()) + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name_width: usize,
    pub missing_width: usize,
}

impl ColumnLayout {
    pub const PCT_WIDTH: usize = PCT_COLS;
    pub const BRANCH_WIDTH: usize = PCT_COLS + 1;
    pub const FUNCS_WIDTH: usize = PCT_COLS;
    pub const LINES_WIDTH: usize = PCT_COLS;

    /// Fit the natural widths into `max_cols` columns. `0` disables fitting.
    ///
    /// When the name does not fit next to a minimal uncovered column, the
    /// name is squeezed (possibly below [`NAME_COL`]) and the uncovered
    /// column drops to its minimum. Otherwise the uncovered column may only
    /// shrink into the slack left by the name.
    pub fn negotiate(natural_name: usize, natural_missing: usize, max_cols: usize) -> Self {
        let mut layout = Self {
            name_width: natural_name,
            missing_width: natural_missing,
        };
        if max_cols == 0 {
            return layout;
        }

        let max_remaining = max_cols.saturating_sub(PCT_BLOCK_WIDTH + MISSING_COL);
        if layout.name_width > max_remaining {
            layout.name_width = max_remaining;
            layout.missing_width = MISSING_COL;
        } else if layout.name_width < max_remaining {
            let slack = max_cols - (layout.name_width + PCT_BLOCK_WIDTH);
            layout.missing_width = layout.missing_width.min(slack);
        }
        layout
    }

    /// Width of every rendered row, separators included.
    pub fn row_width(&self) -> usize {
        self.name_width + self.missing_width + PCT_BLOCK_WIDTH
    }
}

/// Compute the layout for a tree and its files.
pub fn compute_layout<F: FileCoverage>(
    tree: &Children<'_, F>,
    files: &[F],
    max_cols: usize,
) -> ColumnLayout {
    let natural_name = NAME_COL.max(max_name_width(tree, 0));
    let natural_missing = files
        .iter()
        .map(|file| uncovered_lines(file).len())
        .fold(MISSING_COL, usize::max);

    ColumnLayout::negotiate(natural_name, natural_missing, max_cols)
}
