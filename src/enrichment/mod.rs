//! Derived-field enrichment for parsed records.
//!
//! Every aggregation works on calendar fields derived from a record's instant: the date,
//! year, month number and English name, day of month and English day name, hour, minute,
//! and the hour [`Period`](crate::models::Period) bucket.
//!
//! # Unparseable dates
//!
//! A record whose instant is `None` gets unknown calendar fields. If every record of a
//! non-empty table is undated, [`apply_placeholder_dates`] fills the calendar fields from a
//! fixed placeholder instant so that aggregations still have values to group on. The
//! records keep `instant == None`, and the table reports the substitution, so callers can
//! always tell placeholder rows from genuinely dated ones.

pub mod calendar;

pub use calendar::{
    DAY_NAMES, MONTH_NAMES, apply_placeholder_dates, calendar_fields, day_index, enrich,
    month_name, placeholder_instant,
};
