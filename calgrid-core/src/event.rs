//! Event types.
//!
//! An `Event` is a single time-boxed item on one calendar day. Times are
//! wall-clock `HH:MM` values with no time zone attached.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CalGridError, CalGridResult};

/// Format of a date-key, e.g. `2024-06-10`.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    /// Day the event is on. Always equal to the key of the bucket holding it.
    pub date: NaiveDate,
    pub color: EventColor,
}

impl Event {
    /// Build a new event with a freshly generated id.
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_time: ClockTime,
        end_time: ClockTime,
        description: Option<String>,
        color: EventColor,
    ) -> Self {
        Event {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description,
            start_time,
            end_time,
            date,
            color,
        }
    }

    /// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` overlap iff
    /// `s1 < e2 && s2 < e1`. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    /// Date-key string of the bucket this event belongs in.
    pub fn date_key(&self) -> String {
        date_key(self.date)
    }

    /// Check the fields the store requires to be present.
    pub fn validate(&self) -> CalGridResult<()> {
        if self.id.trim().is_empty() {
            return Err(CalGridError::InvalidEvent("id must not be empty".into()));
        }
        if self.title.trim().is_empty() {
            return Err(CalGridError::InvalidEvent("title must not be empty".into()));
        }
        Ok(())
    }

    /// Case-insensitive match of `needle` (already lowercased) against the
    /// title, description and date-key.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self.date_key().contains(needle)
    }
}

/// Format a date as a date-key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date-key.
pub fn parse_date_key(s: &str) -> CalGridResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_KEY_FORMAT)
        .map_err(|_| CalGridError::InvalidDate(s.to_string()))
}

/// Wall-clock time of day with minute precision, written as `HH:MM`.
///
/// Ordering matches lexicographic ordering of the zero-padded text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Add a duration, returning `None` if the result would cross midnight or
    /// is not a whole minute.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let (time, wrapped) = self.0.overflowing_add_signed(duration);
        if wrapped != 0 || time.second() != 0 || time.nanosecond() != 0 {
            return None;
        }
        Some(ClockTime(time))
    }
}

impl FromStr for ClockTime {
    type Err = CalGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalGridError::InvalidTime(s.to_string());

        // Fixed width keeps the text form sortable
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;

        ClockTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Category tag of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Work,
    Personal,
    Other,
}

/// Display properties of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub label: &'static str,
    pub swatch: Swatch,
    pub icon: &'static str,
}

/// Palette entry a category is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    Blue,
    Green,
    Purple,
}

const CATEGORY_STYLES: [(EventColor, CategoryStyle); 3] = [
    (
        EventColor::Work,
        CategoryStyle { label: "Work", swatch: Swatch::Blue, icon: "💼" },
    ),
    (
        EventColor::Personal,
        CategoryStyle { label: "Personal", swatch: Swatch::Green, icon: "🏠" },
    ),
    (
        EventColor::Other,
        CategoryStyle { label: "Other", swatch: Swatch::Purple, icon: "📌" },
    ),
];

impl EventColor {
    pub const ALL: [EventColor; 3] = [EventColor::Work, EventColor::Personal, EventColor::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventColor::Work => "work",
            EventColor::Personal => "personal",
            EventColor::Other => "other",
        }
    }

    pub fn style(&self) -> CategoryStyle {
        CATEGORY_STYLES[*self as usize].1
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventColor {
    type Err = CalGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CalGridError::InvalidEvent(format!(
                    "unknown color '{}' (expected work, personal or other)",
                    s
                ))
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_event(id: &str, date: &str, start: &str, end: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            description: None,
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            date: parse_date_key(date).unwrap(),
            color: EventColor::Work,
        }
    }

    #[test]
    fn clock_time_parses_padded_form() {
        let t: ClockTime = "09:05".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (9, 5));
        assert_eq!(t.to_string(), "09:05");
    }

    #[test]
    fn clock_time_rejects_unpadded_and_out_of_range() {
        assert!("9:00".parse::<ClockTime>().is_err());
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
        assert!("12:00:00".parse::<ClockTime>().is_err());
    }

    #[test]
    fn clock_time_order_matches_text_order() {
        let mut times = vec!["23:59", "00:00", "09:30", "09:05", "10:00"];
        let mut parsed: Vec<ClockTime> = times.iter().map(|t| t.parse().unwrap()).collect();
        times.sort();
        parsed.sort();
        let rendered: Vec<String> = parsed.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, times);
    }

    #[test]
    fn checked_add_stops_at_midnight() {
        let t: ClockTime = "23:00".parse().unwrap();
        assert_eq!(
            t.checked_add(Duration::minutes(59)).map(|t| t.to_string()),
            Some("23:59".to_string())
        );
        assert_eq!(t.checked_add(Duration::hours(1)), None);
        assert_eq!(t.checked_add(Duration::seconds(30)), None);
    }

    #[test]
    fn overlap_is_half_open() {
        let a = make_event("a", "2024-06-10", "09:00", "10:00");
        let touching = make_event("b", "2024-06-10", "10:00", "10:30");
        let inside = make_event("c", "2024-06-10", "09:15", "09:45");
        let containing = make_event("d", "2024-06-10", "08:00", "11:00");
        let straddling = make_event("e", "2024-06-10", "09:30", "10:30");

        assert!(!a.overlaps(&touching));
        assert!(!touching.overlaps(&a));
        assert!(a.overlaps(&inside));
        assert!(a.overlaps(&containing));
        assert!(a.overlaps(&straddling));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let event = make_event("1", "2024-06-10", "09:00", "10:00");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "title": "Event 1",
                "startTime": "09:00",
                "endTime": "10:00",
                "date": "2024-06-10",
                "color": "work"
            })
        );
    }

    #[test]
    fn deserializes_description_when_present() {
        let json = r#"{"id":"x","title":"Lunch","description":"with Sam",
            "startTime":"12:00","endTime":"13:00","date":"2024-06-11","color":"personal"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.description.as_deref(), Some("with Sam"));
        assert_eq!(event.color, EventColor::Personal);
    }

    #[test]
    fn matches_title_description_and_date() {
        let mut event = make_event("1", "2024-06-10", "09:00", "10:00");
        event.title = "Team Standup".into();
        event.description = Some("Daily SYNC".into());

        assert!(event.matches("standup"));
        assert!(event.matches("sync"));
        assert!(event.matches("2024-06"));
        assert!(!event.matches("retro"));
    }

    #[test]
    fn validate_requires_title() {
        let mut event = make_event("1", "2024-06-10", "09:00", "10:00");
        event.title = "   ".into();
        assert!(matches!(event.validate(), Err(CalGridError::InvalidEvent(_))));
    }

    #[test]
    fn color_table_covers_every_category() {
        for color in EventColor::ALL {
            assert_eq!(color.style().label.to_lowercase(), color.as_str());
            assert_eq!(color.as_str().parse::<EventColor>().unwrap(), color);
        }
        assert!("blue".parse::<EventColor>().is_err());
    }
}
