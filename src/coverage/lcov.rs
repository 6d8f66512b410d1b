//! LCOV tracefile loader.
//!
//! The reader loop is the I/O shell; every record is dispatched to a small
//! handler that updates [`LcovParserState`]. Only `SF`, `DA` and
//! `end_of_record` matter for line coverage; function and branch records are
//! ignored because the report does not model them.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use ::lcov::{Reader, Record};
use tracing::debug;

use super::types::{CoverageData, LineRecord, LineState, SourceFile};
use crate::errors::{CovReportError, Result};

/// Hit counts collected while walking the tracefile.
///
/// Sections for the same source file are merged, and repeated `DA` records
/// for one line are summed.
#[derive(Debug, Default)]
pub(crate) struct LcovParserState {
    current_file: Option<PathBuf>,
    files: BTreeMap<PathBuf, BTreeMap<u32, u64>>,
    record_count: usize,
}

impl LcovParserState {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle_source_file(&mut self, path: PathBuf) {
        self.files.entry(path.clone()).or_default();
        self.current_file = Some(path);
    }

    fn handle_line_data(&mut self, line: u32, count: u64) {
        if let Some(file) = &self.current_file {
            let hits = self.files.entry(file.clone()).or_default();
            let slot = hits.entry(line).or_insert(0);
            *slot = slot.saturating_add(count);
        }
    }

    fn handle_end_of_record(&mut self) {
        self.current_file = None;
        self.record_count += 1;
    }

    fn into_files(self) -> Vec<SourceFile> {
        self.files
            .into_iter()
            .map(|(path, hits)| {
                let lines = hits
                    .into_iter()
                    .map(|(line, count)| {
                        let state = if count > 0 {
                            LineState::Covered
                        } else {
                            LineState::Uncovered
                        };
                        LineRecord::new(line, state)
                    })
                    .collect();
                SourceFile::new(path, lines)
            })
            .collect()
    }
}

/// Parse an LCOV tracefile from disk.
pub fn parse_lcov_file(path: &Path, root: &Path) -> Result<CoverageData> {
    let reader = Reader::open_file(path).map_err(|e| CovReportError::io(path, e))?;
    parse_records(reader, path, root)
}

/// Parse LCOV content already held in memory.
pub fn parse_lcov_str(content: &str, root: &Path) -> Result<CoverageData> {
    parse_records(Reader::new(content.as_bytes()), Path::new("<memory>"), root)
}

fn parse_records<B: BufRead>(reader: Reader<B>, origin: &Path, root: &Path) -> Result<CoverageData> {
    let mut state = LcovParserState::new();

    for record in reader {
        let record = record.map_err(|e| CovReportError::Lcov {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        match record {
            Record::SourceFile { path } => state.handle_source_file(path),
            Record::LineData { line, count, .. } => state.handle_line_data(line, count),
            Record::EndOfRecord => state.handle_end_of_record(),
            _ => {}
        }
    }

    debug!(
        records = state.record_count,
        files = state.files.len(),
        "parsed LCOV tracefile {}",
        origin.display()
    );

    Ok(CoverageData::new(root, state.into_files()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{CoverageResult, FileCoverage};
    use indoc::indoc;

    #[test]
    fn test_parse_lcov_str_classifies_lines() {
        let content = indoc! {"
            TN:
            SF:/app/src/lib.rs
            FN:1,main
            FNDA:1,main
            DA:1,3
            DA:2,0
            DA:4,1
            LF:3
            LH:2
            end_of_record
        "};

        let data = parse_lcov_str(content, Path::new("/app")).unwrap();
        assert_eq!(data.files().len(), 1);

        let file = &data.files()[0];
        assert_eq!(file.filename(), Path::new("/app/src/lib.rs"));
        let states: Vec<_> = file.line_states().iter().map(|l| (l.number, l.state)).collect();
        assert_eq!(
            states,
            vec![
                (1, LineState::Covered),
                (2, LineState::Uncovered),
                (4, LineState::Covered)
            ]
        );
        assert!((file.covered_percent() - 66.666_666).abs() < 0.001);
    }

    #[test]
    fn test_parse_lcov_str_merges_sections_for_same_file() {
        let content = indoc! {"
            SF:/app/a.rs
            DA:1,0
            DA:2,0
            end_of_record
            SF:/app/a.rs
            DA:1,2
            end_of_record
        "};

        let data = parse_lcov_str(content, Path::new("/app")).unwrap();
        assert_eq!(data.files().len(), 1);
        let states: Vec<_> = data.files()[0].line_states().iter().map(|l| l.state).collect();
        assert_eq!(states, vec![LineState::Covered, LineState::Uncovered]);
    }

    #[test]
    fn test_parse_lcov_str_saturates_hit_counts() {
        let content = "SF:/app/hot.rs\nDA:1,18446744073709551615\nDA:1,1\nend_of_record\n";

        let data = parse_lcov_str(content, Path::new("/app")).unwrap();
        let states: Vec<_> = data.files()[0].line_states().iter().map(|l| l.state).collect();
        assert_eq!(states, vec![LineState::Covered]);
    }

    #[test]
    fn test_parse_lcov_str_keeps_file_without_end_of_record() {
        let content = "SF:/app/partial.rs\nDA:7,0\n";

        let data = parse_lcov_str(content, Path::new("/app")).unwrap();
        assert_eq!(data.files().len(), 1);
        assert_eq!(data.covered_percent(), 0.0);
    }

    #[test]
    fn test_parse_lcov_str_rejects_malformed_record() {
        let err = parse_lcov_str("SF:/app/a.rs\nDA:not-a-number\n", Path::new("/app")).unwrap_err();
        assert!(matches!(err, CovReportError::Lcov { .. }));
    }

    #[test]
    fn test_parse_lcov_file_missing() {
        let err = parse_lcov_file(Path::new("/nonexistent/lcov.info"), Path::new("/")).unwrap_err();
        assert!(err.is_not_found());
    }
}
