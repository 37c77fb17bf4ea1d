//! Data models for parsed chat transcripts.
//!
//! This module defines the data structures produced by the transcript parser:
//!
//! - [`MessageRecord`] - One chat message or system notification with its derived fields
//! - [`CalendarFields`] - Calendar and time-bucket fields derived from a record's instant
//! - [`Period`] - Hour-of-day bucket label used for heatmaps
//! - [`RecordTable`] - The ordered output table handed to aggregation and filtering
//!
//! Records serialize with serde using the fixed column names listed in
//! [`RecordTable::COLUMNS`]. Those names and [`GROUP_NOTIFICATION`] are relied upon by
//! downstream consumers and must not change.

pub mod period;
pub mod record;
pub mod table;

pub use period::Period;
pub use record::{CalendarFields, GROUP_NOTIFICATION, MEDIA_OMITTED, MessageRecord};
pub use table::RecordTable;
