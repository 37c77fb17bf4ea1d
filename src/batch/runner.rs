use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use rayon::prelude::*;
use tracing::{info, warn};

use super::discovery::discover_transcripts;
use crate::models::RecordTable;
use crate::parsers::parse_transcript_file;

/// One successfully parsed transcript
#[derive(Debug)]
pub struct ParsedTranscript {
    pub path: PathBuf,
    pub table: RecordTable,
}

/// Outcome of a batch run, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub parsed: Vec<ParsedTranscript>,
    /// Failed files with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total_records(&self) -> usize {
        self.parsed.iter().map(|p| p.table.len()).sum()
    }

    pub fn total_files(&self) -> usize {
        self.parsed.len() + self.failed.len()
    }
}

/// Parse every transcript below a directory
///
/// # Errors
///
/// Returns an error if discovery fails or more than 50% of the transcripts fail to parse.
pub fn parse_transcript_dir(dir: &Path) -> Result<BatchReport> {
    let files = discover_transcripts(dir)?;
    parse_transcript_files(&files)
}

/// Parse transcripts in parallel
///
/// Files are independent, so each one is parsed on the rayon pool. Results keep the order
/// of `files`. A failing file is logged and recorded in [`BatchReport::failed`].
///
/// # Errors
///
/// Returns an error if more than 50% of the files fail to parse.
pub fn parse_transcript_files(files: &[PathBuf]) -> Result<BatchReport> {
    let results: Vec<(PathBuf, Result<RecordTable>)> = files
        .par_iter()
        .map(|path| (path.clone(), parse_transcript_file(path)))
        .collect();

    let mut report = BatchReport::default();
    for (path, result) in results {
        match result {
            Ok(table) => report.parsed.push(ParsedTranscript { path, table }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse transcript");
                report.failed.push((path, e.to_string()));
            }
        }
    }

    let total = report.total_files();
    if total > 0 {
        let failure_rate = report.failed.len() as f64 / total as f64;
        if failure_rate > 0.5 {
            bail!(
                "Batch parsing failed: {}/{} transcript files failed to parse ({}% failure rate)",
                report.failed.len(),
                total,
                (failure_rate * 100.0) as u32
            );
        }
    }

    info!(
        records = report.total_records(),
        parsed = report.parsed.len(),
        failed = report.failed.len(),
        "batch parsing finished"
    );

    Ok(report)
}
