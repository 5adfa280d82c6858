pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod month;
pub mod relocate;

use anyhow::Result;
use calgrid_core::ClockTime;
use calgrid_core::event::parse_date_key;
use chrono::{Days, Local, NaiveDate};

/// Parse a day given as YYYY-MM-DD, "today", "tomorrow" or "yesterday".
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    let today = Local::now().date_naive();

    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => Ok(today + Days::new(1)),
        "yesterday" => Ok(today - Days::new(1)),
        _ => Ok(parse_date_key(input)?),
    }
}

pub fn parse_time(input: &str) -> Result<ClockTime> {
    Ok(input.trim().parse()?)
}

/// Reject intervals that end at or before they start.
pub fn ensure_ordered(start: ClockTime, end: ClockTime) -> Result<()> {
    if end <= start {
        anyhow::bail!("End time {} must be after start time {}", end, start);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_day_accepts_keywords_and_dates() {
        let today = Local::now().date_naive();
        assert_eq!(parse_day("today").unwrap(), today);
        assert_eq!(parse_day("Tomorrow").unwrap(), today + Days::new(1));
        assert_eq!(
            parse_day("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_day("2023-02-29").is_err());
        assert!(parse_day("next week").is_err());
    }

    #[test]
    fn ensure_ordered_rejects_empty_and_reversed() {
        let nine = parse_time("09:00").unwrap();
        let ten = parse_time("10:00").unwrap();
        assert!(ensure_ordered(nine, ten).is_ok());
        assert!(ensure_ordered(nine, nine).is_err());
        assert!(ensure_ordered(ten, nine).is_err());
    }
}
