use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::period::Period;

/// Sender assigned to system events and text that cannot be attributed to a participant
pub const GROUP_NOTIFICATION: &str = "group_notification";

/// Placeholder body exporters write in place of attachments
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// Calendar and time-bucket fields derived from a record's instant
///
/// Every field is `None` (and `period` is [`Period::Unknown`]) when the instant could not
/// be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarFields {
    pub only_date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month_num: Option<u32>,
    pub month: Option<String>,
    pub day: Option<u32>,
    pub day_name: Option<String>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub period: Period,
}

impl CalendarFields {
    pub fn unknown() -> Self {
        Self {
            only_date: None,
            year: None,
            month_num: None,
            month: None,
            day: None,
            day_name: None,
            hour: None,
            minute: None,
            period: Period::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        self.only_date.is_some()
    }
}

impl Default for CalendarFields {
    fn default() -> Self {
        Self::unknown()
    }
}

/// One message (or system notification) of a parsed transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    /// Timestamp text exactly as it appeared in the transcript
    #[serde(skip)]
    pub timestamp_raw: String,
    /// `None` when the timestamp could not be parsed
    #[serde(rename = "date")]
    pub instant: Option<NaiveDateTime>,
    #[serde(rename = "user")]
    pub sender: String,
    #[serde(rename = "message")]
    pub body: String,
    #[serde(flatten)]
    pub calendar: CalendarFields,
}

impl MessageRecord {
    pub fn is_notification(&self) -> bool {
        self.sender == GROUP_NOTIFICATION
    }

    pub fn is_media(&self) -> bool {
        self.body.starts_with(MEDIA_OMITTED)
    }

    /// Render the record back into a `DD/MM/YYYY, HH:MM - sender: body` transcript line
    ///
    /// Notifications are rendered without a sender prefix. Returns `None` when the record
    /// has no parsed instant.
    pub fn to_transcript_line(&self) -> Option<String> {
        let instant = self.instant?;
        let stamp = instant.format("%d/%m/%Y, %H:%M");
        if self.is_notification() {
            Some(format!("{} - {}", stamp, self.body))
        } else {
            Some(format!("{} - {}: {}", stamp, self.sender, self.body))
        }
    }
}
