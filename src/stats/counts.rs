use std::collections::{BTreeSet, HashMap};

use linkify::{LinkFinder, LinkKind};
use serde::Serialize;

use crate::filters::OVERALL;
use crate::models::{GROUP_NOTIFICATION, MessageRecord};

/// Number of users in the busiest-users ranking
const TOP_USERS: usize = 5;

/// Headline counts for a set of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChatStats {
    pub messages: usize,
    pub words: usize,
    pub media_messages: usize,
    pub links: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserShare {
    pub name: String,
    pub percent: f64,
}

/// Most active senders and every sender's share of all records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusyUsers {
    pub top: Vec<UserCount>,
    pub shares: Vec<UserShare>,
}

pub fn fetch_stats(records: &[MessageRecord]) -> ChatStats {
    ChatStats {
        messages: records.len(),
        words: records.iter().map(|r| r.body.split_whitespace().count()).sum(),
        media_messages: records.iter().filter(|r| r.is_media()).count(),
        links: records.iter().map(|r| find_links(&r.body).count()).sum(),
    }
}

/// URLs inside a message body, with or without a scheme
///
/// Trailing punctuation is not part of the link.
pub fn find_links(text: &str) -> impl Iterator<Item = &str> {
    let mut finder = LinkFinder::new();
    finder.url_must_have_scheme(false).kinds(&[LinkKind::Url]);
    finder.links(text).map(|link| link.as_str())
}

/// Records per sender, most active first (ties by name)
///
/// Notifications count under [`GROUP_NOTIFICATION`] like any other sender.
pub fn user_counts(records: &[MessageRecord]) -> Vec<UserCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.sender.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<UserCount> = counts
        .into_iter()
        .map(|(name, count)| UserCount { name: name.to_string(), count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked
}

pub fn most_busy_users(records: &[MessageRecord]) -> BusyUsers {
    let ranked = user_counts(records);
    let total = records.len();

    let shares = ranked
        .iter()
        .map(|user| UserShare { name: user.name.clone(), percent: percent_of(user.count, total) })
        .collect();
    let top = ranked.into_iter().take(TOP_USERS).collect();

    BusyUsers { top, shares }
}

/// Percentage rounded to two decimals
fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 10_000.0).round() / 100.0
}

/// Selectable participants: `Overall` followed by sorted senders, notifications excluded
pub fn user_list(records: &[MessageRecord]) -> Vec<String> {
    let senders: BTreeSet<&str> = records
        .iter()
        .map(|r| r.sender.as_str())
        .filter(|s| *s != GROUP_NOTIFICATION)
        .collect();

    std::iter::once(OVERALL).chain(senders).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalendarFields;

    fn record(sender: &str, body: &str) -> MessageRecord {
        MessageRecord {
            timestamp_raw: String::new(),
            instant: None,
            sender: sender.to_string(),
            body: body.to_string(),
            calendar: CalendarFields::unknown(),
        }
    }

    #[test]
    fn test_fetch_stats() {
        let records = vec![
            record("Alice", "hello there friend"),
            record("Bob", "<Media omitted>"),
            record("Alice", "see https://example.com and www.rust-lang.org"),
        ];

        let stats = fetch_stats(&records);
        assert_eq!(stats.messages, 3);
        assert_eq!(stats.words, 3 + 2 + 4);
        assert_eq!(stats.media_messages, 1);
        assert_eq!(stats.links, 2);
    }

    #[test]
    fn test_fetch_stats_empty() {
        assert_eq!(fetch_stats(&[]), ChatStats::default());
    }

    #[test]
    fn test_find_links() {
        let links: Vec<&str> = find_links("go to http://a.io/x?y=1, or www.b.com.").collect();
        assert_eq!(links, vec!["http://a.io/x?y=1", "www.b.com"]);
    }

    #[test]
    fn test_find_links_without_scheme() {
        let body = "see github.com/rust-lang/rust and docs.rs/regex";
        let links: Vec<&str> = find_links(body).collect();
        assert_eq!(links, vec!["github.com/rust-lang/rust", "docs.rs/regex"]);

        let stats = fetch_stats(&[record("Alice", body)]);
        assert_eq!(stats.links, 2);
    }

    #[test]
    fn test_find_links_ignores_plain_text() {
        assert_eq!(find_links("meet at 10:30, bring snacks!").count(), 0);
    }

    #[test]
    fn test_most_busy_users() {
        let mut records = vec![record("Alice", "a"); 3];
        records.push(record("Bob", "b"));
        records.push(record(GROUP_NOTIFICATION, "Bob left"));
        records.push(record("Carol", "c"));

        let busy = most_busy_users(&records);
        assert_eq!(busy.top[0], UserCount { name: "Alice".into(), count: 3 });
        assert_eq!(busy.top.len(), 4);
        assert_eq!(busy.shares[0].percent, 50.0);
        assert_eq!(busy.shares[1].name, "Bob");
        assert_eq!(busy.shares[1].percent, 16.67);
    }

    #[test]
    fn test_most_busy_users_caps_top_list() {
        let records: Vec<_> = (0..8).map(|i| record(&format!("user{}", i), "x")).collect();
        let busy = most_busy_users(&records);
        assert_eq!(busy.top.len(), 5);
        assert_eq!(busy.shares.len(), 8);
    }

    #[test]
    fn test_user_list() {
        let records = vec![
            record("Zed", "a"),
            record(GROUP_NOTIFICATION, "x"),
            record("Alice", "b"),
            record("Zed", "c"),
        ];
        assert_eq!(user_list(&records), vec!["Overall", "Alice", "Zed"]);
    }
}
