//! Registry of recognized timestamp grammars.
//!
//! Grammars are tried in a fixed priority order against the whole transcript. Stricter
//! formats come first so a looser grammar cannot claim a prefix of a stricter one (grammar
//! 2 matches the leading part of every grammar 1 timestamp, for instance).

use std::fmt;
use std::sync::LazyLock;

use regex::{Match, Regex};
use serde::Serialize;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("timestamp grammar pattern must compile")
}

static SLASH_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}\s-\s"));
static SLASH_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}\s"));
static HYPHEN_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\d{1,2}-\d{1,2}-\d{2,4},\s\d{1,2}:\d{2}\s-\s"));
static DOT_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\d{1,2}\.\d{1,2}\.\d{2,4},\s\d{1,2}:\d{2}\s-\s"));
static BRACKETED_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\[\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}:\d{2}\]"));

/// A timestamp recognition rule paired with the formats used to parse what it matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimestampGrammar {
    /// `DD/MM/YYYY, HH:MM - `
    SlashDash,
    /// `DD/MM/YYYY, HH:MM `
    SlashSpace,
    /// `DD-MM-YYYY, HH:MM - `
    HyphenDash,
    /// `DD.MM.YYYY, HH:MM - `
    DotDash,
    /// `[DD/MM/YYYY, HH:MM:SS]`
    Bracketed,
}

impl TimestampGrammar {
    /// Every grammar, in priority order
    pub const ALL: [TimestampGrammar; 5] = [
        TimestampGrammar::SlashDash,
        TimestampGrammar::SlashSpace,
        TimestampGrammar::HyphenDash,
        TimestampGrammar::DotDash,
        TimestampGrammar::Bracketed,
    ];

    pub fn recognizer(self) -> &'static Regex {
        match self {
            TimestampGrammar::SlashDash => &SLASH_DASH_RE,
            TimestampGrammar::SlashSpace => &SLASH_SPACE_RE,
            TimestampGrammar::HyphenDash => &HYPHEN_DASH_RE,
            TimestampGrammar::DotDash => &DOT_DASH_RE,
            TimestampGrammar::Bracketed => &BRACKETED_RE,
        }
    }

    /// chrono formats for matched text: two-digit year first, then four-digit year
    ///
    /// `%Y` happily reads `23` as year 23 AD, so `%y` has to be tried before it. A
    /// four-digit year never satisfies `%y` because the separator check fails.
    pub fn formats(self) -> [&'static str; 2] {
        match self {
            TimestampGrammar::SlashDash => ["%d/%m/%y, %H:%M - ", "%d/%m/%Y, %H:%M - "],
            TimestampGrammar::SlashSpace => ["%d/%m/%y, %H:%M ", "%d/%m/%Y, %H:%M "],
            TimestampGrammar::HyphenDash => ["%d-%m-%y, %H:%M - ", "%d-%m-%Y, %H:%M - "],
            TimestampGrammar::DotDash => ["%d.%m.%y, %H:%M - ", "%d.%m.%Y, %H:%M - "],
            TimestampGrammar::Bracketed => ["[%d/%m/%y, %H:%M:%S]", "[%d/%m/%Y, %H:%M:%S]"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TimestampGrammar::SlashDash => "DD/MM/YYYY, HH:MM - ",
            TimestampGrammar::SlashSpace => "DD/MM/YYYY, HH:MM ",
            TimestampGrammar::HyphenDash => "DD-MM-YYYY, HH:MM - ",
            TimestampGrammar::DotDash => "DD.MM.YYYY, HH:MM - ",
            TimestampGrammar::Bracketed => "[DD/MM/YYYY, HH:MM:SS]",
        }
    }

    /// Non-overlapping timestamp matches in transcript order
    pub fn find_all<'t>(self, text: &'t str) -> impl Iterator<Item = Match<'t>> + 't {
        self.recognizer().find_iter(text)
    }
}

impl fmt::Display for TimestampGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description().trim_end())
    }
}

/// Select the grammar for a whole transcript
///
/// Returns the first grammar, in priority order, with at least one match. Every match
/// opens a block (possibly an empty one), so one match is enough to yield a split.
/// `None` means no grammar applies and the splitter falls back to line scanning.
pub fn select_grammar(text: &str) -> Option<TimestampGrammar> {
    TimestampGrammar::ALL.into_iter().find(|grammar| grammar.recognizer().is_match(text))
}
