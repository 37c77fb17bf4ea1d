//! Transcript parser: exported chat text to ordered message records
//!
//! # Pipeline
//!
//! 1. [`grammar`] picks one timestamp grammar for the whole transcript (or none)
//! 2. [`splitter`] cuts the text into `(timestamp, block)` pairs, scanning lines when no
//!    grammar applies
//! 3. [`sender`] separates sender and body with an ordered list of rules
//! 4. [`dates`] normalizes each timestamp into an instant
//! 5. [`transcript`] enriches and assembles the final [`RecordTable`](crate::models::RecordTable)
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Grammar miss**: no registered grammar matches, so the splitter scans lines instead.
//!
//! - **Count mismatch**: block and timestamp sequences of different lengths are truncated to
//!   the shorter one.
//!
//! - **Unattributable blocks**: classified as `group_notification` instead of being dropped.
//!
//! - **Bad dates**: an unparseable timestamp becomes `None` with unknown derived fields for
//!   that record only.
//!
//! - **No records**: an empty table, which callers check with `is_empty()`.
//!
//! The core parser has no error type at all. Only the file boundary
//! ([`parse_transcript_file`]) returns `anyhow::Result`, for unreadable, oversized or
//! binary input.

pub mod dates;
pub mod grammar;
pub mod sender;
pub mod splitter;
pub mod transcript;

pub use grammar::{TimestampGrammar, select_grammar};
pub use sender::{Extraction, NotificationKind, extract_sender};
pub use transcript::{parse_transcript, parse_transcript_file};
