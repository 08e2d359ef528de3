use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("expected HH:MM, got {0:?}")]
    Format(String),
    #[error("time out of range: {0:?}")]
    Range(String),
}

/// Wall-clock time within a day, stored as minutes since midnight.
/// `24:00` is accepted as the end-of-day bound.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const fn from_hm(hours: u16, minutes: u16) -> Self {
        Self(hours * 60 + minutes)
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then(|| Self(minutes as u16))
    }

    pub fn minutes(self) -> u32 {
        self.0 as u32
    }

    pub fn hours(self) -> u16 {
        self.0 / 60
    }

    /// Clamps at end of day rather than wrapping.
    pub fn saturating_add(self, minutes: u32) -> Self {
        Self(self.minutes().saturating_add(minutes).min(MINUTES_PER_DAY) as u16)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| TimeParseError::Format(s.to_string()))?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(TimeParseError::Format(s.to_string()));
        }
        let hours: u16 = h.parse().map_err(|_| TimeParseError::Format(s.to_string()))?;
        let minutes: u16 = m.parse().map_err(|_| TimeParseError::Format(s.to_string()))?;
        if minutes >= 60 || hours > 24 || (hours == 24 && minutes != 0) {
            return Err(TimeParseError::Range(s.to_string()));
        }
        Ok(Self::from_hm(hours, minutes))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for TimeOfDay {
    fn schema_name() -> String {
        "TimeOfDay".into()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl TimeSlot {
    pub const fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_time, self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_clock_times() {
        let t: TimeOfDay = "09:05".parse().unwrap();
        assert_eq!(t.minutes(), 9 * 60 + 5);
        assert_eq!(t.to_string(), "09:05");
        assert_eq!("7:30".parse::<TimeOfDay>().unwrap(), TimeOfDay::from_hm(7, 30));
        assert_eq!("24:00".parse::<TimeOfDay>().unwrap().minutes(), MINUTES_PER_DAY);
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(matches!("0900".parse::<TimeOfDay>(), Err(TimeParseError::Format(_))));
        assert!(matches!("9:5".parse::<TimeOfDay>(), Err(TimeParseError::Format(_))));
        assert!(matches!("25:00".parse::<TimeOfDay>(), Err(TimeParseError::Range(_))));
        assert!(matches!("10:60".parse::<TimeOfDay>(), Err(TimeParseError::Range(_))));
    }

    #[test]
    fn serde_uses_clock_strings() {
        let slot = TimeSlot::new(TimeOfDay::from_hm(14, 0), TimeOfDay::from_hm(15, 0));
        let json = serde_json::to_value(slot).unwrap();
        assert_eq!(json, serde_json::json!({"startTime": "14:00", "endTime": "15:00"}));
        let back: TimeSlot = serde_json::from_value(json).unwrap();
        assert_eq!(back, slot);
        assert!(serde_json::from_str::<TimeOfDay>("\"noon\"").is_err());
    }

    #[test]
    fn overlap_is_half_open() {
        let a = TimeSlot::new(TimeOfDay::from_hm(9, 0), TimeOfDay::from_hm(10, 0));
        let b = TimeSlot::new(TimeOfDay::from_hm(10, 0), TimeOfDay::from_hm(11, 0));
        let c = TimeSlot::new(TimeOfDay::from_hm(9, 30), TimeOfDay::from_hm(10, 30));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c) && c.overlaps(&b));
        assert_eq!(a.duration_minutes(), 60);
        assert_eq!(TimeOfDay::from_hm(23, 30).saturating_add(90).minutes(), MINUTES_PER_DAY);
    }
}
