//! Terminal rendering for calgrid types.
//!
//! Extension traits and helpers that add colored output to calgrid-core
//! types using owo_colors.

use calgrid_core::event::{Swatch, date_key};
use calgrid_core::grid::GridDay;
use calgrid_core::{Event, EventColor};
use chrono::{Datelike, Local, NaiveDate};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventColor {
    fn render(&self) -> String {
        let style = self.style();
        paint(style.swatch, &format!("{} {}", style.icon, style.label))
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let time = format!("{}-{}", self.start_time, self.end_time);
        let mut line = format!(
            "{} {} {} {}",
            time.bold(),
            self.title,
            self.color.render(),
            self.id.dimmed()
        );
        if let Some(description) = &self.description {
            line.push_str(&format!("\n                {}", description.dimmed()));
        }
        line
    }
}

pub fn paint(swatch: Swatch, text: &str) -> String {
    match swatch {
        Swatch::Blue => text.blue().to_string(),
        Swatch::Green => text.green().to_string(),
        Swatch::Purple => text.magenta().to_string(),
    }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25 2026")
pub fn format_date_label(date: NaiveDate) -> String {
    let today = Local::now().date_naive();

    match (date - today).num_days() {
        0 => format!("Today ({})", date_key(date)),
        1 => format!("Tomorrow ({})", date_key(date)),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Render a 6x7 month grid. Each cell shows the day number and, when there
/// are any, the number of events on that day.
pub fn render_month(month: NaiveDate, days: &[GridDay], count: impl Fn(NaiveDate) -> usize) -> Vec<String> {
    let today = Local::now().date_naive();
    let mut lines = vec![
        month.format("%B %Y").to_string().bold().to_string(),
        WEEKDAYS.map(|d| format!("{:<5}", d)).join(" "),
    ];

    for week in days.chunks(7) {
        let cells: Vec<String> = week
            .iter()
            .map(|day| {
                // Pad before coloring so escape codes don't skew the columns
                let cell = format!("{:>2}{:<3}", day.date.day(), count_marker(count(day.date)));
                if !day.is_current_month {
                    cell.dimmed().to_string()
                } else if day.date == today {
                    cell.reversed().to_string()
                } else {
                    cell
                }
            })
            .collect();
        lines.push(cells.join(" "));
    }

    lines
}

fn count_marker(count: usize) -> String {
    match count {
        0 => String::new(),
        1..=9 => format!("({})", count),
        _ => "(+)".to_string(),
    }
}
