//! Exclusion of `:nocov:` blocks.
//!
//! A source line whose comment starts with `:<token>:` opens or closes an
//! excluded block. Every line of the block, marker lines included, becomes
//! [`LineState::Skipped`](super::LineState::Skipped). An opening marker
//! without a matching close excludes the rest of the file.

use std::fs;
use std::ops::RangeInclusive;

use tracing::debug;

use super::types::{CoverageData, SourceFile};

pub const DEFAULT_NOCOV_TOKEN: &str = "nocov";

/// Line ranges (1-based, inclusive) enclosed by nocov markers.
pub fn nocov_ranges(source: &str, token: &str) -> Vec<RangeInclusive<u32>> {
    let marker = format!(":{token}:");
    let mut ranges = Vec::new();
    let mut open: Option<u32> = None;
    let mut last = 0;

    for (line, number) in source.lines().zip(1u32..) {
        last = number;
        if !is_marker(line, &marker) {
            continue;
        }
        match open.take() {
            Some(start) => ranges.push(start..=number),
            None => open = Some(number),
        }
    }

    if let Some(start) = open {
        ranges.push(start..=last);
    }
    ranges
}

fn is_marker(line: &str, marker: &str) -> bool {
    let trimmed = line.trim_start();
    let comment = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("//"));
    comment.is_some_and(|rest| rest.trim_start().starts_with(marker))
}

/// Skip nocov blocks of a single file given its source text.
pub fn apply_to_file(file: &mut SourceFile, source: &str, token: &str) {
    let ranges = nocov_ranges(source, token);
    if ranges.is_empty() {
        return;
    }
    file.skip_lines(|number| ranges.iter().any(|range| range.contains(&number)));
}

/// Skip nocov blocks in every file whose source is readable.
pub fn apply_nocov(data: &mut CoverageData, token: &str) {
    for file in data.files_mut() {
        match fs::read_to_string(file.path()) {
            Ok(source) => apply_to_file(file, &source, token),
            Err(e) => debug!("no source for nocov scan of {}: {}", file.path().display(), e),
        }
    }
}
