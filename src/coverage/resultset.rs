//! Loader for the JSON result set written by Ruby's SimpleCov.
//!
//! The file maps a suite name (`"RSpec"`, `"Minitest"`, ...) to the raw
//! per-file line counts of that suite. Line arrays are dense: index `i` is
//! line `i + 1`, `null` marks a line that is not executable.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::types::{CoverageData, LineState, SourceFile};
use crate::errors::{CovReportError, Result};

type LineHits = Vec<Option<u64>>;

#[derive(Debug, Deserialize)]
struct SuiteResult {
    coverage: BTreeMap<PathBuf, FileLines>,
}

/// Newer result sets nest the array under `lines`; older ones store it
/// directly.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileLines {
    Detailed { lines: LineHits },
    Legacy(LineHits),
}

impl FileLines {
    fn into_hits(self) -> LineHits {
        match self {
            FileLines::Detailed { lines } => lines,
            FileLines::Legacy(lines) => lines,
        }
    }
}

/// Parse a result set from disk.
pub fn parse_resultset_file(path: &Path, root: &Path) -> Result<CoverageData> {
    let content = fs::read_to_string(path).map_err(|e| CovReportError::io(path, e))?;
    parse_resultset(&content, path, root)
}

/// Parse a result set held in memory. `origin` is only used in errors.
pub fn parse_resultset(content: &str, origin: &Path, root: &Path) -> Result<CoverageData> {
    let suites: BTreeMap<String, SuiteResult> =
        serde_json::from_str(content).map_err(|source| CovReportError::Resultset {
            path: origin.to_path_buf(),
            source,
        })?;

    debug!(
        suites = suites.len(),
        "parsed result set {}",
        origin.display()
    );

    let mut merged: BTreeMap<PathBuf, LineHits> = BTreeMap::new();
    for suite in suites.into_values() {
        for (path, lines) in suite.coverage {
            let hits = lines.into_hits();
            match merged.get_mut(&path) {
                Some(existing) => merge_hits(existing, &hits),
                None => {
                    merged.insert(path, hits);
                }
            }
        }
    }

    let files = merged
        .into_iter()
        .map(|(path, hits)| SourceFile::from_states(path, &classify(&hits)))
        .collect();

    Ok(CoverageData::new(root, files))
}

/// Combine the counts of two suites for the same file.
///
/// A line stays non-executable only when both sides say so.
fn merge_hits(into: &mut LineHits, other: &[Option<u64>]) {
    if other.len() > into.len() {
        into.resize(other.len(), None);
    }
    for (slot, hit) in into.iter_mut().zip(other) {
        *slot = match (*slot, *hit) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0).saturating_add(b.unwrap_or(0))),
        };
    }
}

fn classify(hits: &[Option<u64>]) -> Vec<LineState> {
    hits.iter()
        .map(|hit| match hit {
            None => LineState::Never,
            Some(0) => LineState::Uncovered,
            Some(_) => LineState::Covered,
        })
        .collect()
}
