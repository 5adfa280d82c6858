use anyhow::Result;
use calgrid_core::storage::Storage;
use calgrid_core::{Event, EventStore};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::parse_day;
use crate::render::{Render, format_date_label};

pub fn run<S: Storage>(
    store: &mut EventStore<S>,
    date: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    if let Some(term) = search {
        store.set_search_term(term);
    }

    let days: Vec<(NaiveDate, &[Event])> = match date {
        Some(date) => {
            let date = parse_day(date)?;
            vec![(date, store.events_for_date(date))]
        }
        None => store
            .search_view()
            .iter()
            .map(|(date, events)| (*date, events.as_slice()))
            .collect(),
    };

    let lines = render_days(&days);
    if lines.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

/// Group events under a label per day, skipping empty days.
fn render_days(days: &[(NaiveDate, &[Event])]) -> Vec<String> {
    let mut lines = Vec::new();

    for (date, events) in days.iter().filter(|(_, events)| !events.is_empty()) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format_date_label(*date).bold().to_string());
        lines.extend(events.iter().map(|event| format!("  {}", event.render())));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid_core::event::parse_date_key;
    use calgrid_core::{ClockTime, EventColor};

    fn event(title: &str, date: &str, hour: u32) -> Event {
        Event::new(
            title,
            parse_date_key(date).unwrap(),
            ClockTime::new(hour, 0).unwrap(),
            ClockTime::new(hour + 1, 0).unwrap(),
            None,
            EventColor::Other,
        )
    }

    #[test]
    fn groups_by_day_and_skips_empty_days() {
        let first = [event("Standup", "2024-06-10", 9), event("Lunch", "2024-06-10", 12)];
        let second = [event("Dentist", "2024-06-12", 15)];
        let none: [Event; 0] = [];
        let days: Vec<(NaiveDate, &[Event])> = vec![
            (parse_date_key("2024-06-10").unwrap(), &first[..]),
            (parse_date_key("2024-06-11").unwrap(), &none[..]),
            (parse_date_key("2024-06-12").unwrap(), &second[..]),
        ];

        let lines = render_days(&days);

        // label, 2 events, blank, label, 1 event
        assert_eq!(lines.len(), 6);
        assert!(lines[1].contains("Standup"));
        assert!(lines[2].contains("Lunch"));
        assert_eq!(lines[3], "");
        assert!(lines[5].contains("Dentist"));
    }

    #[test]
    fn nothing_to_show() {
        let none: [Event; 0] = [];
        let days: Vec<(NaiveDate, &[Event])> = vec![(parse_date_key("2024-06-10").unwrap(), &none[..])];
        assert!(render_days(&days).is_empty());
    }
}
