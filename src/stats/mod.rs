//! Aggregations over parsed records.
//!
//! Every function takes a slice of [`MessageRecord`](crate::models::MessageRecord)s, usually
//! the output of a filter or [`Selection`](crate::filters::Selection), and returns plain
//! serializable results:
//!
//! - [`counts`] - headline totals, busiest users and the participant list
//! - [`words`] - common words (with stop words) and emoji usage
//! - [`timeline`] - monthly and daily timelines, weekday/month maps and activity heatmaps
//!
//! Calendar aggregations skip records whose calendar fields are unknown. Tables that fell
//! back to placeholder dates still aggregate, under the placeholder day.

pub mod counts;
pub mod timeline;
pub mod words;

pub use counts::{
    BusyUsers, ChatStats, UserCount, UserShare, fetch_stats, find_links, most_busy_users,
    user_counts, user_list,
};
pub use timeline::{
    ActivityCount, DailyCount, GridCell, Heatmap, MonthlyCount, activity_heatmap, daily_timeline,
    month_activity_map, monthly_timeline, user_activity_grid, week_activity_map,
};
pub use words::{EmojiCount, StopWords, WordCount, emoji_counts, find_emojis, most_common_words};
