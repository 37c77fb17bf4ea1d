//! Splits a raw transcript into `(timestamp, block)` pairs.
//!
//! With a selected grammar the transcript is cut at every timestamp match. Without one,
//! lines are scanned and every line starting with a date-like prefix opens a new block.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::grammar::TimestampGrammar;

static DATE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}").expect("date prefix pattern must compile")
});

static DATE_SUBSTRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}").expect("date substring pattern must compile")
});

/// How a transcript was split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    Grammar(TimestampGrammar),
    LineScan,
}

/// One block of transcript text and the timestamp it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub timestamp_raw: String,
    pub text: String,
}

/// Parallel timestamp and block sequences produced by the splitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitTranscript {
    pub mode: SplitMode,
    pub timestamps: Vec<String>,
    pub blocks: Vec<String>,
}

impl SplitTranscript {
    /// Drop trailing entries so both sequences have the same length
    pub fn truncate_to_shorter(&mut self) {
        let len = self.timestamps.len().min(self.blocks.len());
        if self.timestamps.len() != self.blocks.len() {
            debug!(
                timestamps = self.timestamps.len(),
                blocks = self.blocks.len(),
                kept = len,
                "block/timestamp count mismatch, truncating"
            );
        }
        self.timestamps.truncate(len);
        self.blocks.truncate(len);
    }

    pub fn into_raw_blocks(mut self) -> Vec<RawBlock> {
        self.truncate_to_shorter();
        self.timestamps
            .into_iter()
            .zip(self.blocks)
            .map(|(timestamp_raw, text)| RawBlock { timestamp_raw, text })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len().min(self.blocks.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split with the selected grammar, or by line scanning when there is none
pub fn split_transcript(text: &str, grammar: Option<TimestampGrammar>) -> SplitTranscript {
    let mut split = match grammar {
        Some(grammar) => split_on_grammar(text, grammar),
        None => split_lines(text),
    };
    split.truncate_to_shorter();
    split
}

/// Cut the transcript at every grammar match
///
/// Text before the first match is preamble and is discarded. Each match's block runs up
/// to the start of the next match (or the end of the transcript).
pub fn split_on_grammar(text: &str, grammar: TimestampGrammar) -> SplitTranscript {
    let matches: Vec<_> = grammar.find_all(text).collect();
    let mut timestamps = Vec::with_capacity(matches.len());
    let mut blocks = Vec::with_capacity(matches.len());

    for (i, m) in matches.iter().enumerate() {
        let end = matches.get(i + 1).map_or(text.len(), |next| next.start());
        timestamps.push(m.as_str().to_string());
        blocks.push(text[m.end()..end].to_string());
    }

    SplitTranscript { mode: SplitMode::Grammar(grammar), timestamps, blocks }
}

/// Line-scan fallback for transcripts no grammar recognizes
///
/// A line starting with `D{1,2}[/-.]D{1,2}[/-.]D{2,4}` opens a block; following lines are
/// appended to it. Lines before the first such line form a block of their own. Each
/// block's timestamp is the first date-like substring inside it, or empty.
pub fn split_lines(text: &str) -> SplitTranscript {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        if DATE_PREFIX_RE.is_match(line) {
            push_block(&mut blocks, &current);
            current.clear();
            current.push_str(line);
        } else {
            current.push('\n');
            current.push_str(line);
        }
    }
    push_block(&mut blocks, &current);

    let timestamps = blocks
        .iter()
        .map(|block| {
            DATE_SUBSTRING_RE.find(block).map_or_else(String::new, |m| m.as_str().to_string())
        })
        .collect();

    SplitTranscript { mode: SplitMode::LineScan, timestamps, blocks }
}

fn push_block(blocks: &mut Vec<String>, current: &str) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        blocks.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_grammar_basic() {
        let text = "12/05/23, 9:08 - Alice: Hello\n12/05/23, 9:10 - Bob: Hi\n";
        let split = split_on_grammar(text, TimestampGrammar::SlashDash);

        assert_eq!(split.mode, SplitMode::Grammar(TimestampGrammar::SlashDash));
        assert_eq!(split.timestamps, vec!["12/05/23, 9:08 - ", "12/05/23, 9:10 - "]);
        assert_eq!(split.blocks, vec!["Alice: Hello\n", "Bob: Hi\n"]);
    }

    #[test]
    fn test_split_on_grammar_discards_preamble() {
        let text = "Chat export\n12/05/23, 9:08 - Alice: Hello";
        let split = split_on_grammar(text, TimestampGrammar::SlashDash);
        assert_eq!(split.blocks, vec!["Alice: Hello"]);
    }

    #[test]
    fn test_split_on_grammar_keeps_multiline_bodies() {
        let text = "12/05/23, 9:08 - Alice: line one\nline two\n12/05/23, 9:09 - Bob: ok";
        let split = split_on_grammar(text, TimestampGrammar::SlashDash);
        assert_eq!(split.blocks[0], "Alice: line one\nline two\n");
        assert_eq!(split.blocks[1], "Bob: ok");
    }

    #[test]
    fn test_split_lines_groups_continuation_lines() {
        let text = "12-05-2023 Alice hello\nmore text\n13-05-2023 Bob hi";
        let split = split_lines(text);

        assert_eq!(split.mode, SplitMode::LineScan);
        assert_eq!(split.blocks, vec!["12-05-2023 Alice hello\nmore text", "13-05-2023 Bob hi"]);
        assert_eq!(split.timestamps, vec!["12-05-2023", "13-05-2023"]);
    }

    #[test]
    fn test_split_lines_preamble_block_has_empty_timestamp() {
        let text = "exported chat\n12.05.2023 hello";
        let split = split_lines(text);
        assert_eq!(split.blocks, vec!["exported chat", "12.05.2023 hello"]);
        assert_eq!(split.timestamps, vec!["", "12.05.2023"]);
    }

    #[test]
    fn test_split_lines_empty_input() {
        let split = split_lines("");
        assert!(split.is_empty());
        assert!(split.blocks.is_empty());
    }

    #[test]
    fn test_truncate_to_shorter() {
        let mut split = SplitTranscript {
            mode: SplitMode::LineScan,
            timestamps: vec!["a".into(), "b".into(), "c".into()],
            blocks: vec!["x".into(), "y".into()],
        };
        split.truncate_to_shorter();
        assert_eq!(split.timestamps, vec!["a", "b"]);
        assert_eq!(split.blocks.len(), 2);
    }

    #[test]
    fn test_into_raw_blocks_pairs_in_order() {
        let split = split_transcript(
            "1/1/24, 10:00 - A: x\n2/1/24, 11:00 - B: y",
            Some(TimestampGrammar::SlashDash),
        );
        let blocks = split.into_raw_blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[1],
            RawBlock { timestamp_raw: "2/1/24, 11:00 - ".into(), text: "B: y".into() }
        );
    }
}
