//! Batch parsing of transcript directories
//!
//! # Error Handling Strategy
//!
//! Batch runs combine graceful degradation with error rate tracking:
//!
//! - **File-level failures**: A transcript that cannot be read (too large, binary, not
//!   UTF-8) is logged and recorded in the report, and the remaining files are still parsed.
//!
//! - **Error rate tracking**: Returns an error if >50% of files fail, so a directory of the
//!   wrong kind of files is not reported as a success.
//!
//! - **Resource limits**: Discovery stops with an error beyond 1000 transcript files and
//!   never follows symlinks.
//!
//! - **Summary reporting**: Logs how many files parsed, how many failed and the total number
//!   of records.

pub mod discovery;
pub mod runner;

pub use discovery::{MAX_TRANSCRIPT_FILES, discover_transcripts};
pub use runner::{BatchReport, ParsedTranscript, parse_transcript_dir, parse_transcript_files};
