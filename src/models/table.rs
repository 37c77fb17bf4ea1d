use std::slice;

use super::record::MessageRecord;
use crate::parsers::grammar::TimestampGrammar;

/// Ordered output of the transcript parser
///
/// Records keep transcript order, which is not necessarily chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    records: Vec<MessageRecord>,
    grammar: Option<TimestampGrammar>,
    placeholder_dates: bool,
}

impl RecordTable {
    /// Serialized column names, in order
    pub const COLUMNS: [&'static str; 12] = [
        "date",
        "user",
        "message",
        "only_date",
        "year",
        "month_num",
        "month",
        "day",
        "day_name",
        "hour",
        "minute",
        "period",
    ];

    pub fn new(
        records: Vec<MessageRecord>,
        grammar: Option<TimestampGrammar>,
        placeholder_dates: bool,
    ) -> Self {
        Self { records, grammar, placeholder_dates }
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MessageRecord> {
        self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, MessageRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Grammar selected for the transcript; `None` means the line-scan fallback was used
    pub fn grammar(&self) -> Option<TimestampGrammar> {
        self.grammar
    }

    /// True when no record had a parseable date and calendar fields hold placeholders
    ///
    /// Placeholder rows keep `instant == None`, so they stay distinguishable from real data.
    pub fn placeholder_dates(&self) -> bool {
        self.placeholder_dates
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a MessageRecord;
    type IntoIter = slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for RecordTable {
    type Item = MessageRecord;
    type IntoIter = std::vec::IntoIter<MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
