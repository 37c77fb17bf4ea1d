use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::enrichment::{DAY_NAMES, MONTH_NAMES, day_index, month_name};
use crate::models::{GROUP_NOTIFICATION, MessageRecord, Period};

/// Messages in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month_num: u32,
    pub month: String,
    pub count: usize,
    /// `"<Month>-<Year>"`, e.g. `"March-2023"`
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub only_date: NaiveDate,
    pub count: usize,
}

/// Count for a named day or month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityCount {
    pub name: String,
    pub count: usize,
}

/// Day-of-week by hour-period counts
///
/// Rows and columns only cover days and periods that occur in the data, both in calendar
/// order. Missing combinations are zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Heatmap {
    pub days: Vec<String>,
    pub periods: Vec<Period>,
    /// `counts[row][column]` for `days[row]` and `periods[column]`
    pub counts: Vec<Vec<usize>>,
}

impl Heatmap {
    pub fn get(&self, day_name: &str, period: Period) -> usize {
        let row = self.days.iter().position(|d| d == day_name);
        let column = self.periods.iter().position(|p| *p == period);
        match (row, column) {
            (Some(row), Some(column)) => self.counts[row][column],
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Messages sent by one user on one weekday during one hour
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub user: String,
    pub day_name: String,
    pub hour: u32,
    pub count: usize,
}

/// Message counts per month in chronological order
pub fn monthly_timeline(records: &[MessageRecord]) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for record in records {
        if let (Some(year), Some(month_num)) = (record.calendar.year, record.calendar.month_num) {
            *counts.entry((year, month_num)).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|((year, month_num), count)| {
            let month = month_name(month_num).unwrap_or_default().to_string();
            let time = format!("{}-{}", month, year);
            MonthlyCount { year, month_num, month, count, time }
        })
        .collect()
}

/// Message counts per calendar day in chronological order
pub fn daily_timeline(records: &[MessageRecord]) -> Vec<DailyCount> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for only_date in records.iter().filter_map(|r| r.calendar.only_date) {
        *counts.entry(only_date).or_default() += 1;
    }

    counts.into_iter().map(|(only_date, count)| DailyCount { only_date, count }).collect()
}

/// Messages per weekday, busiest first (ties Monday first)
pub fn week_activity_map(records: &[MessageRecord]) -> Vec<ActivityCount> {
    rank_names(records.iter().filter_map(|r| r.calendar.day_name.as_deref()), &DAY_NAMES)
}

/// Messages per month name across all years, busiest first (ties January first)
pub fn month_activity_map(records: &[MessageRecord]) -> Vec<ActivityCount> {
    rank_names(records.iter().filter_map(|r| r.calendar.month.as_deref()), &MONTH_NAMES)
}

fn rank_names<'a>(
    names: impl Iterator<Item = &'a str>,
    canonical: &[&str],
) -> Vec<ActivityCount> {
    let mut counts = vec![0usize; canonical.len()];
    for name in names {
        if let Some(index) = canonical.iter().position(|c| *c == name) {
            counts[index] += 1;
        }
    }

    let mut ranked: Vec<ActivityCount> = canonical
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(name, count)| ActivityCount { name: name.to_string(), count })
        .collect();
    // Stable sort keeps calendar order among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

pub fn activity_heatmap(records: &[MessageRecord]) -> Heatmap {
    let mut cells: HashMap<(usize, Period), usize> = HashMap::new();
    for record in records {
        let Some(day) = record.calendar.day_name.as_deref().and_then(day_index) else {
            continue;
        };
        if !record.calendar.period.is_known() {
            continue;
        }
        *cells.entry((day, record.calendar.period)).or_default() += 1;
    }

    let days: BTreeSet<usize> = cells.keys().map(|(day, _)| *day).collect();
    let periods: BTreeSet<Period> = cells.keys().map(|(_, period)| *period).collect();

    let counts = days
        .iter()
        .map(|day| {
            periods.iter().map(|period| cells.get(&(*day, *period)).copied().unwrap_or(0)).collect()
        })
        .collect();

    Heatmap {
        days: days.iter().map(|day| DAY_NAMES[*day].to_string()).collect(),
        periods: periods.into_iter().collect(),
        counts,
    }
}

/// Every sender x weekday x hour combination with its message count, zero-filled
///
/// Users are sorted by name, days run Monday to Sunday and hours 0 to 23. Notifications
/// are not users and are left out.
pub fn user_activity_grid(records: &[MessageRecord]) -> Vec<GridCell> {
    let mut cells: HashMap<(&str, usize, u32), usize> = HashMap::new();
    let mut users: BTreeSet<&str> = BTreeSet::new();

    for record in records.iter().filter(|r| r.sender != GROUP_NOTIFICATION) {
        users.insert(record.sender.as_str());
        let day = record.calendar.day_name.as_deref().and_then(day_index);
        if let (Some(day), Some(hour)) = (day, record.calendar.hour) {
            *cells.entry((record.sender.as_str(), day, hour)).or_default() += 1;
        }
    }

    let mut grid = Vec::with_capacity(users.len() * DAY_NAMES.len() * 24);
    for user in users {
        for (day, day_name) in DAY_NAMES.iter().enumerate() {
            for hour in 0..24 {
                grid.push(GridCell {
                    user: user.to_string(),
                    day_name: day_name.to_string(),
                    hour,
                    count: cells.get(&(user, day, hour)).copied().unwrap_or(0),
                });
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::enrichment::enrich;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 30, 0).unwrap()
    }

    fn record(sender: &str, instant: Option<NaiveDateTime>) -> MessageRecord {
        MessageRecord {
            timestamp_raw: String::new(),
            instant,
            sender: sender.to_string(),
            body: "hi".to_string(),
            calendar: enrich(instant),
        }
    }

    fn sample() -> Vec<MessageRecord> {
        vec![
            // 2023-03-06 is a Monday
            record("Alice", Some(at(2023, 3, 6, 9))),
            record("Bob", Some(at(2023, 3, 6, 9))),
            record("Alice", Some(at(2023, 3, 7, 23))),
            record("Alice", Some(at(2023, 1, 2, 0))),
            record("Bob", Some(at(2024, 3, 4, 9))),
            record("Bob", None),
        ]
    }

    #[test]
    fn test_monthly_timeline() {
        let timeline = monthly_timeline(&sample());
        let labels: Vec<(&str, usize)> =
            timeline.iter().map(|m| (m.time.as_str(), m.count)).collect();
        assert_eq!(labels, vec![("January-2023", 1), ("March-2023", 3), ("March-2024", 1)]);
        assert_eq!(timeline[1].month_num, 3);
    }

    #[test]
    fn test_daily_timeline() {
        let timeline = daily_timeline(&sample());
        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline[0].only_date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(timeline[1].count, 2);
    }

    #[test]
    fn test_week_activity_map() {
        let map = week_activity_map(&sample());
        assert_eq!(map[0], ActivityCount { name: "Monday".into(), count: 4 });
        assert_eq!(map[1], ActivityCount { name: "Tuesday".into(), count: 1 });
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_month_activity_ties_keep_calendar_order() {
        let records = vec![
            record("Alice", Some(at(2023, 5, 1, 9))),
            record("Alice", Some(at(2023, 2, 1, 9))),
        ];
        let names: Vec<String> = month_activity_map(&records).into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["February", "May"]);
    }

    #[test]
    fn test_activity_heatmap() {
        let heatmap = activity_heatmap(&sample());
        assert_eq!(heatmap.days, vec!["Monday", "Tuesday"]);
        assert_eq!(heatmap.periods, vec![Period::Hour(0), Period::Hour(9), Period::Hour(23)]);
        assert_eq!(heatmap.get("Monday", Period::Hour(9)), 3);
        assert_eq!(heatmap.get("Monday", Period::Hour(0)), 1);
        assert_eq!(heatmap.get("Tuesday", Period::Hour(23)), 1);
        assert_eq!(heatmap.get("Tuesday", Period::Hour(9)), 0);
        assert_eq!(heatmap.get("Sunday", Period::Hour(9)), 0);
        assert_eq!(heatmap.counts.iter().flatten().sum::<usize>(), 5);
    }

    #[test]
    fn test_activity_heatmap_empty() {
        let heatmap = activity_heatmap(&[record("Alice", None)]);
        assert!(heatmap.is_empty());
        assert!(heatmap.counts.is_empty());
    }

    #[test]
    fn test_user_activity_grid_is_zero_filled() {
        let mut records = sample();
        records.push(record(GROUP_NOTIFICATION, Some(at(2023, 3, 6, 9))));

        let grid = user_activity_grid(&records);
        assert_eq!(grid.len(), 2 * 7 * 24);
        assert_eq!(grid[0].user, "Alice");
        assert_eq!(grid[0].day_name, "Monday");
        assert_eq!(grid[0].hour, 0);
        assert_eq!(grid[0].count, 1);

        let bob_monday_nine = grid
            .iter()
            .find(|c| c.user == "Bob" && c.day_name == "Monday" && c.hour == 9)
            .unwrap();
        assert_eq!(bob_monday_nine.count, 2);
        assert_eq!(grid.iter().map(|c| c.count).sum::<usize>(), 5);
    }
}
