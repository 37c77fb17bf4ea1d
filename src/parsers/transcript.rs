use std::path::Path;

use anyhow::Result;
use tracing::debug;

use super::dates::normalize;
use super::grammar::select_grammar;
use super::sender::extract_sender;
use super::splitter::split_transcript;
use crate::enrichment::{apply_placeholder_dates, enrich};
use crate::models::{MessageRecord, RecordTable};
use crate::utils::read_transcript;

/// Parse a transcript into an ordered record table
///
/// Pipeline: grammar selection (once per transcript), splitting, sender extraction, date
/// normalization and field enrichment. Malformed input never fails the parse; an
/// unrecognizable or empty transcript yields an empty table.
///
/// # Examples
///
/// ```
/// use chat_history_explorer::parse_transcript;
///
/// let table = parse_transcript("12/05/23, 9:08 - Alice: Hello there");
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.records()[0].sender, "Alice");
/// assert_eq!(table.records()[0].calendar.period.label(), "9-10");
/// ```
pub fn parse_transcript(text: &str) -> RecordTable {
    let grammar = select_grammar(text);
    match grammar {
        Some(grammar) => debug!(%grammar, "selected timestamp grammar"),
        None => debug!("no timestamp grammar matched, scanning lines"),
    }

    let blocks = split_transcript(text, grammar).into_raw_blocks();
    let block_count = blocks.len();

    let mut records = Vec::with_capacity(block_count);
    for block in blocks {
        let (sender, body) = extract_sender(&block.text).into_parts();
        if body.trim().is_empty() {
            continue;
        }

        let instant = normalize(&block.timestamp_raw, grammar);
        records.push(MessageRecord {
            timestamp_raw: block.timestamp_raw,
            instant,
            sender,
            body,
            calendar: enrich(instant),
        });
    }

    let unparseable = records.iter().filter(|r| r.instant.is_none()).count();
    debug!(
        blocks = block_count,
        records = records.len(),
        dropped_blank = block_count - records.len(),
        unparseable_dates = unparseable,
        "assembled record table"
    );

    let placeholder_dates = apply_placeholder_dates(&mut records);
    RecordTable::new(records, grammar, placeholder_dates)
}

/// Read a transcript file and parse it
///
/// # Errors
///
/// Returns an error if the file cannot be read, is larger than 10MB, or is not UTF-8
/// text. Parsing itself does not fail.
pub fn parse_transcript_file(path: &Path) -> Result<RecordTable> {
    let text = read_transcript(path)?;
    Ok(parse_transcript(&text))
}
