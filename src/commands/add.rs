use anyhow::{Context, Result};
use calgrid_core::storage::Storage;
use calgrid_core::{ClockTime, Event, EventStore};
use chrono::Duration;
use owo_colors::OwoColorize;

use super::{ensure_ordered, parse_day, parse_time};
use crate::render::Render;

pub struct AddArgs {
    pub title: String,
    pub date: String,
    pub start: String,
    pub end: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub color: String,
}

pub fn run<S: Storage>(store: &mut EventStore<S>, args: AddArgs) -> Result<()> {
    let event = build_event(args)?;

    store.add(event.clone())?;

    println!("{}", format!("  Created: {}", event.title).green());
    println!("  {}", event.render());

    Ok(())
}

/// Turn command-line input into a new event with a fresh id.
fn build_event(args: AddArgs) -> Result<Event> {
    let date = parse_day(&args.date)?;
    let start = parse_time(&args.start)?;

    let end = match (args.end, args.duration) {
        (Some(end), _) => parse_time(&end)?,
        (None, Some(duration)) => apply_duration(start, &duration)?,
        (None, None) => default_end(start)?,
    };
    ensure_ordered(start, end)?;

    let description = args.description.filter(|d| !d.trim().is_empty());
    let color = args.color.parse()?;

    Ok(Event::new(args.title, date, start, end, description, color))
}

/// Apply a duration string such as "45m" or "1h 30m" to a start time.
fn apply_duration(start: ClockTime, input: &str) -> Result<ClockTime> {
    let std_dur = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    let chrono_dur = Duration::from_std(std_dur).context("Duration too large")?;

    start.checked_add(chrono_dur).ok_or_else(|| {
        anyhow::anyhow!(
            "Duration \"{}\" from {} must end by 23:59 and be whole minutes",
            input,
            start
        )
    })
}

/// Default end time: one hour after the start.
fn default_end(start: ClockTime) -> Result<ClockTime> {
    start
        .checked_add(Duration::hours(1))
        .ok_or_else(|| anyhow::anyhow!("Starting at {}, pass --end or --duration", start))
}
