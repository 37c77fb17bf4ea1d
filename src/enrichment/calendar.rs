use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use tracing::debug;

use crate::models::{CalendarFields, MessageRecord, Period};

/// English month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English day names, Monday first
pub const DAY_NAMES: [&str; 7] =
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

pub fn month_name(month_num: u32) -> Option<&'static str> {
    let index = usize::try_from(month_num).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Position of a day name in the Monday-first week
pub fn day_index(day_name: &str) -> Option<usize> {
    DAY_NAMES.iter().position(|d| *d == day_name)
}

/// Fixed instant used when a whole table has no parseable date
pub fn placeholder_instant() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 1, 1)?.and_hms_opt(12, 0, 0)
}

/// Calendar fields of a parsed instant
pub fn calendar_fields(instant: NaiveDateTime) -> CalendarFields {
    let weekday = instant.weekday().num_days_from_monday() as usize;

    CalendarFields {
        only_date: Some(instant.date()),
        year: Some(instant.year()),
        month_num: Some(instant.month()),
        month: month_name(instant.month()).map(str::to_string),
        day: Some(instant.day()),
        day_name: DAY_NAMES.get(weekday).map(|d| d.to_string()),
        hour: Some(instant.hour()),
        minute: Some(instant.minute()),
        period: Period::from_hour(Some(instant.hour())),
    }
}

/// Calendar fields of an optional instant; unknown when there is none
pub fn enrich(instant: Option<NaiveDateTime>) -> CalendarFields {
    instant.map_or_else(CalendarFields::unknown, calendar_fields)
}

/// Fill placeholder calendar fields when no record in a non-empty table has a date
///
/// Returns whether the substitution happened. Instants stay `None`.
pub fn apply_placeholder_dates(records: &mut [MessageRecord]) -> bool {
    if records.is_empty() || records.iter().any(|r| r.instant.is_some()) {
        return false;
    }

    let fields = enrich(placeholder_instant());
    debug!(records = records.len(), "no parseable dates, using placeholder calendar fields");
    for record in records.iter_mut() {
        record.calendar = fields.clone();
    }
    true
}
