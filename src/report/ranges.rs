//! Compression of uncovered line numbers into `"3-5,9"` style lists.

use crate::coverage::{FileCoverage, LineRecord, LineState};

/// Render the uncovered lines of a file as a comma separated list of line
/// numbers and `start-end` ranges.
///
/// Skipped lines are dropped first, so a skipped line between two misses
/// does not break their range. Never-executed lines count as hits.
pub fn uncovered_lines<F: FileCoverage + ?Sized>(file: &F) -> String {
    compress_ranges(
        file.line_states()
            .iter()
            .filter(|line| line.state != LineState::Skipped),
    )
}

/// Merge consecutive misses of already filtered lines into ranges.
pub fn compress_ranges<'a>(lines: impl IntoIterator<Item = &'a LineRecord>) -> String {
    let mut ranges: Vec<(u32, u32)> = Vec::new();
    let mut new_range = true;

    for line in lines {
        if !line.state.is_miss() {
            new_range = true;
        } else if new_range {
            ranges.push((line.number, line.number));
            new_range = false;
        } else if let Some(last) = ranges.last_mut() {
            last.1 = line.number;
        }
    }

    ranges
        .iter()
        .map(|&(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{start}-{end}")
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
