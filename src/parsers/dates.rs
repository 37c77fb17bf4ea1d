//! Timestamp normalization.
//!
//! Timestamp text is parsed with the selected grammar's chrono formats first. When that
//! fails (an impossible date such as day 31 in February, a month-first export, or a format
//! change mid-transcript) a lenient component parse is tried. Anything still unparseable
//! becomes `None`; normalization never fails the transcript.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};

use super::grammar::TimestampGrammar;

static LENIENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d{1,4})[/\-.](\d{1,2})[/\-.](\d{1,4})(?:,?\s*(\d{1,2}):(\d{2})(?::(\d{2}))?(?:\s*([AaPp])\.?[Mm]\.?)?)?",
    )
    .expect("lenient date pattern must compile")
});

/// Normalize one timestamp, `None` when it cannot be parsed
pub fn normalize(timestamp_raw: &str, grammar: Option<TimestampGrammar>) -> Option<NaiveDateTime> {
    if timestamp_raw.trim().is_empty() {
        return None;
    }

    grammar
        .and_then(|grammar| parse_with_grammar(timestamp_raw, grammar))
        .or_else(|| parse_lenient(timestamp_raw))
}

/// Strict parse with the grammar's formats
pub fn parse_with_grammar(timestamp_raw: &str, grammar: TimestampGrammar) -> Option<NaiveDateTime> {
    grammar
        .formats()
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp_raw, format).ok())
}

/// Permissive parse of `a/b/c[, H:MM[:SS][ AM|PM]]` with `/`, `-` or `.` separators
///
/// Component order is tried day-first, then month-first; a four-digit first component is
/// read as year-month-day. Two-digit years are 20YY. A date with no time is midnight.
pub fn parse_lenient(text: &str) -> Option<NaiveDateTime> {
    let caps = LENIENT_RE.captures(text)?;

    let first = &caps[1];
    let second: u32 = caps[2].parse().ok()?;
    let third = &caps[3];

    let (hour, minute, second_of_minute) = time_components(&caps)?;

    let date = if first.len() == 4 {
        let year: i32 = first.parse().ok()?;
        let day: u32 = third.parse().ok()?;
        NaiveDate::from_ymd_opt(year, second, day)
    } else {
        let leading: u32 = first.parse().ok()?;
        let year = expand_year(third)?;
        NaiveDate::from_ymd_opt(year, second, leading)
            .or_else(|| NaiveDate::from_ymd_opt(year, leading, second))
    }?;

    date.and_hms_opt(hour, minute, second_of_minute)
}

fn time_components(caps: &Captures<'_>) -> Option<(u32, u32, u32)> {
    let Some(hour) = caps.get(4) else {
        return Some((0, 0, 0));
    };

    let mut hour: u32 = hour.as_str().parse().ok()?;
    let minute: u32 = caps.get(5)?.as_str().parse().ok()?;
    let second = match caps.get(6) {
        Some(s) => s.as_str().parse().ok()?,
        None => 0,
    };

    if let Some(meridiem) = caps.get(7) {
        if hour == 0 || hour > 12 {
            return None;
        }
        let pm = meridiem.as_str().eq_ignore_ascii_case("p");
        hour = match (pm, hour) {
            (false, 12) => 0,
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, h) => h,
        };
    }

    Some((hour, minute, second))
}

fn expand_year(text: &str) -> Option<i32> {
    let year: i32 = text.parse().ok()?;
    match text.len() {
        1 | 2 => Some(2000 + year),
        4 => Some(year),
        _ => None,
    }
}
