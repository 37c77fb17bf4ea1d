use std::mem;
use std::str::FromStr;

use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::models::MessageRecord;

/// Chat message or system notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Message,
    Notification,
}

impl RecordKind {
    pub fn of(record: &MessageRecord) -> Self {
        if record.is_notification() { RecordKind::Notification } else { RecordKind::Message }
    }
}

impl FromStr for RecordKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "message" => Ok(RecordKind::Message),
            "notification" => Ok(RecordKind::Notification),
            _ => bail!("Invalid kind value: '{}' (must be 'message' or 'notification')", s),
        }
    }
}

/// One `field:value` condition on a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterTerm {
    /// Sender name, exact but case-insensitive
    User(String),
    Kind(RecordKind),
    /// Dated on or after the day
    Since(NaiveDate),
    /// Dated on or before the day
    Until(NaiveDate),
}

impl FilterTerm {
    /// Build a term from a field name (any case) and its raw value
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        match field.to_ascii_lowercase().as_str() {
            "user" => Ok(FilterTerm::User(value.to_string())),
            "kind" => value.parse().map(FilterTerm::Kind),
            "since" => parse_day(value).map(FilterTerm::Since),
            "until" => parse_day(value).map(FilterTerm::Until),
            _ => bail!("Unknown field: '{}' (valid fields: user, kind, since, until)", field),
        }
    }

    pub fn same_field(&self, other: &FilterTerm) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// Date terms never match undated records, even under placeholder calendar fields.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        match self {
            FilterTerm::User(name) => record.sender.to_lowercase() == name.to_lowercase(),
            FilterTerm::Kind(kind) => RecordKind::of(record) == *kind,
            FilterTerm::Since(day) => record.instant.is_some_and(|i| i.date() >= *day),
            FilterTerm::Until(day) => record.instant.is_some_and(|i| i.date() <= *day),
        }
    }
}

/// Strict `YYYY-MM-DD`, calendar-checked
fn parse_day(value: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(day) if value.len() == 10 => Ok(day),
        _ => bail!("Invalid date format: '{}' (expected YYYY-MM-DD)", value),
    }
}
