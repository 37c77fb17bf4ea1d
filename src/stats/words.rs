use std::collections::{HashMap, HashSet};
use std::fs;
use std::hash::Hash;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::models::MessageRecord;

/// Number of entries in the common-words ranking
const TOP_WORDS: usize = 20;

/// A flag pair, or a pictograph with its presentation selector, skin tone and ZWJ chain
static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\p{Regional_Indicator}{2}|\p{Extended_Pictographic}\x{FE0F}?\p{Emoji_Modifier}?(?:\x{200D}\p{Extended_Pictographic}\x{FE0F}?\p{Emoji_Modifier}?)*",
    )
    .expect("emoji pattern must compile")
});

static BUILTIN_STOP_WORDS: LazyLock<StopWords> =
    LazyLock::new(|| StopWords::from_text(include_str!("stop_words.txt")));

/// Words excluded from word frequency counts
///
/// Loaded once and treated as read-only for the rest of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Built-in English/Hinglish list
    pub fn builtin() -> &'static StopWords {
        &BUILTIN_STOP_WORDS
    }

    /// One word per line; blank lines ignored, matching is case-insensitive
    pub fn from_text(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stop-word file: {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: usize,
}

/// Top 20 lowercase words of chat messages
///
/// Notifications, media placeholders and stop words are excluded. Ties keep the order in
/// which words first appeared.
pub fn most_common_words(records: &[MessageRecord], stop_words: &StopWords) -> Vec<WordCount> {
    let words = records
        .iter()
        .filter(|r| !r.is_notification() && !r.is_media())
        .flat_map(|r| r.body.split_whitespace())
        .map(str::to_lowercase)
        .filter(|word| !stop_words.contains(word));

    rank_by_frequency(words)
        .into_iter()
        .take(TOP_WORDS)
        .map(|(word, count)| WordCount { word, count })
        .collect()
}

/// Every emoji used, most frequent first
pub fn emoji_counts(records: &[MessageRecord]) -> Vec<EmojiCount> {
    let emojis = records.iter().flat_map(|r| find_emojis(&r.body));

    rank_by_frequency(emojis)
        .into_iter()
        .map(|(emoji, count)| EmojiCount { emoji, count })
        .collect()
}

/// Count items, ordered by count descending then first appearance
fn rank_by_frequency<T, I>(items: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (position, item) in items.into_iter().enumerate() {
        counts.entry(item).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(T, usize, usize)> =
        counts.into_iter().map(|(item, (count, first))| (item, count, first)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().map(|(item, count, _)| (item, count)).collect()
}

/// Emoji in a message body, one item per rendered symbol
///
/// Flags stay whole, and the emoji variation selector is dropped so `❤` and `❤️` count
/// together.
pub fn find_emojis(text: &str) -> impl Iterator<Item = String> {
    EMOJI_RE.find_iter(text).map(|m| m.as_str().replace('\u{FE0F}', ""))
}
