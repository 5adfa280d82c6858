use anyhow::Result;
use calgrid_core::storage::Storage;
use calgrid_core::{Event, EventStore};
use owo_colors::OwoColorize;

use super::{ensure_ordered, parse_day, parse_time};
use crate::render::Render;

/// Fields to change. `None` leaves a field as it is.
#[derive(Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub color: Option<String>,
}

pub fn run<S: Storage>(store: &mut EventStore<S>, id: &str, args: EditArgs) -> Result<()> {
    let Some(current) = store.event(id) else {
        anyhow::bail!("No event with id '{}'", id);
    };

    let edited = apply(current.clone(), args)?;
    store.update(edited.clone())?;

    println!("{}", format!("  Updated: {}", edited.title).yellow());
    println!("  {}", edited.render());

    Ok(())
}

fn apply(mut event: Event, args: EditArgs) -> Result<Event> {
    if let Some(title) = args.title {
        event.title = title;
    }
    if let Some(description) = args.description {
        event.description = (!description.trim().is_empty()).then_some(description);
    }
    if let Some(date) = args.date {
        event.date = parse_day(&date)?;
    }
    if let Some(start) = args.start {
        event.start_time = parse_time(&start)?;
    }
    if let Some(end) = args.end {
        event.end_time = parse_time(&end)?;
    }
    if let Some(color) = args.color {
        event.color = color.parse()?;
    }

    ensure_ordered(event.start_time, event.end_time)?;
    Ok(event)
}
