use anyhow::Result;
use calgrid_core::EventStore;
use calgrid_core::grid::{days_for_month, first_of_month, next_month, previous_month};
use calgrid_core::storage::Storage;
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;

use crate::render::render_month;

pub fn run<S: Storage>(
    store: &mut EventStore<S>,
    month: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    let first = match month {
        Some(month) => parse_month(month)?,
        None => first_of_month(Local::now().date_naive()),
    };

    if let Some(term) = search {
        store.set_search_term(term);
    }

    let days = days_for_month(first);
    for line in render_month(first, &days, |date| store.events_for_date(date).len()) {
        println!("{}", line);
    }
    println!(
        "{}",
        format!(
            "< {}   {} >",
            previous_month(first).format("%Y-%m"),
            next_month(first).format("%Y-%m")
        )
        .dimmed()
    );

    Ok(())
}

/// Parse YYYY-MM into the first day of that month.
fn parse_month(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_year_month() {
        assert_eq!(
            parse_month("2024-02").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("February").is_err());
    }
}
