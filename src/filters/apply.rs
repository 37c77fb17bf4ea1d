use super::query::FilterExpr;
use crate::models::MessageRecord;

/// Keep the records matching `filter`, in their original order
pub fn apply_filters(records: Vec<MessageRecord>, filter: &FilterExpr) -> Vec<MessageRecord> {
    if filter.is_empty() {
        return records;
    }

    records.into_iter().filter(|record| filter.matches(record)).collect()
}
