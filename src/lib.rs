//! Chat History Explorer - Parse and analyze exported chat transcripts
//!
//! This library turns the plain-text export of a group or one-to-one chat into an ordered
//! table of message records and aggregates it. It supports:
//!
//! - Detecting the export's timestamp format from a small registry of grammars
//! - Splitting transcripts into messages, with a line-scan fallback for unknown formats
//! - Separating sender and body, classifying system events as `group_notification`
//! - Normalizing timestamps and deriving calendar fields and hour periods
//! - Filtering records and computing statistics, timelines and activity heatmaps
//! - Parsing whole directories of transcripts in parallel
//!
//! # Example
//!
//! ```no_run
//! use chat_history_explorer::parse_transcript_file;
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/Users/alice/chats/family.txt");
//! let table = parse_transcript_file(&path)?;
//! println!("Parsed {} messages", table.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod batch;
pub mod cli;
pub mod enrichment;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod stats;
pub mod utils;

// Re-export commonly used types
pub use batch::parse_transcript_dir;
pub use models::{GROUP_NOTIFICATION, MessageRecord, Period, RecordTable};
pub use parsers::{TimestampGrammar, parse_transcript, parse_transcript_file};
