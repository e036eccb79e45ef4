//! The slot coordinate system: a slot is one (calendar day, time of day) cell.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::MeetgridError;

/// The three selectable parts of a day.
///
/// Declaration order defines the intra-day rank (morning < noon < evening),
/// which the derived `Ord` relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Noon,
    Evening,
}

impl TimeOfDay {
    /// All times of day in rank order.
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Noon, TimeOfDay::Evening];

    /// Position within a day's slot column (0-based).
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Inverse of `rank`.
    pub fn from_rank(rank: usize) -> Option<TimeOfDay> {
        TimeOfDay::ALL.get(rank).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Noon => "noon",
            TimeOfDay::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = MeetgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(TimeOfDay::Morning),
            "noon" => Ok(TimeOfDay::Noon),
            "evening" => Ok(TimeOfDay::Evening),
            other => Err(MeetgridError::InvalidSlot(format!(
                "unknown time of day '{other}' (expected morning, noon or evening)"
            ))),
        }
    }
}

/// Identity of one selectable cell on the shared calendar.
///
/// Total order is date ascending, then time-of-day rank; the derived `Ord`
/// follows field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub day: NaiveDate,
    pub time: TimeOfDay,
}

impl SlotKey {
    pub fn new(day: NaiveDate, time: TimeOfDay) -> SlotKey {
        SlotKey { day, time }
    }
}

/// Rendered as `YYYY-MM-DD|tod`, the same key format the web client uses.
impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.day, self.time)
    }
}

impl FromStr for SlotKey {
    type Err = MeetgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, time) = s
            .split_once('|')
            .ok_or_else(|| MeetgridError::InvalidSlot(format!("'{s}' is not 'YYYY-MM-DD|tod'")))?;
        let day = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|_| MeetgridError::InvalidSlot(format!("invalid date '{day}'")))?;
        Ok(SlotKey::new(day, time.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn orders_by_date_then_time_of_day() {
        let morning_first = SlotKey::new(date(2024, 1, 1), TimeOfDay::Morning);
        let evening_first = SlotKey::new(date(2024, 1, 1), TimeOfDay::Evening);
        let morning_second = SlotKey::new(date(2024, 1, 2), TimeOfDay::Morning);

        assert!(morning_first < evening_first);
        assert!(evening_first < morning_second);
    }

    #[test]
    fn key_string_roundtrip() {
        let key = SlotKey::new(date(2024, 3, 7), TimeOfDay::Noon);
        assert_eq!(key.to_string(), "2024-03-07|noon");
        assert_eq!("2024-03-07|noon".parse::<SlotKey>().unwrap(), key);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!("2024-03-07".parse::<SlotKey>().is_err());
        assert!("2024-03-07|midnight".parse::<SlotKey>().is_err());
        assert!("notadate|noon".parse::<SlotKey>().is_err());
    }

    #[test]
    fn rank_roundtrip() {
        for tod in TimeOfDay::ALL {
            assert_eq!(TimeOfDay::from_rank(tod.rank()), Some(tod));
        }
        assert_eq!(TimeOfDay::from_rank(3), None);
    }
}
