use std::fmt;

use serde::{Serialize, Serializer};

/// Hour-of-day bucket used for day/period heatmaps
///
/// Labels are `"<h>-<h+1>"` with two wrap cases: hour 23 is `"23-00"` and hour 0 is
/// `"00-1"`. Records without a parseable instant get [`Period::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Period {
    Hour(u32),
    Unknown,
}

impl Period {
    /// Bucket for an hour value; anything outside 0..=23 is unknown
    pub fn from_hour(hour: Option<u32>) -> Self {
        match hour {
            Some(h) if h < 24 => Period::Hour(h),
            _ => Period::Unknown,
        }
    }

    /// All 24 hour buckets in day order
    pub fn all_hours() -> impl Iterator<Item = Period> {
        (0..24).map(Period::Hour)
    }

    pub fn label(&self) -> String {
        match *self {
            Period::Hour(23) => "23-00".to_string(),
            Period::Hour(0) => "00-1".to_string(),
            Period::Hour(h) => format!("{}-{}", h, h + 1),
            Period::Unknown => "Unknown".to_string(),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Period::Hour(_))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.label())
    }
}
