//! `calgrid move`: move an event to another day.

use anyhow::Result;
use calgrid_core::event::date_key;
use calgrid_core::storage::Storage;
use calgrid_core::{EventStore, MoveOutcome};
use owo_colors::OwoColorize;

use super::parse_day;

pub fn run<S: Storage>(store: &mut EventStore<S>, id: &str, from: &str, to: &str) -> Result<()> {
    let from = parse_day(from)?;
    let to = parse_day(to)?;

    match store.move_event(id, from, to)? {
        MoveOutcome::Moved { conflicts } => {
            println!(
                "{}",
                format!("  Moved {} from {} to {}", id, date_key(from), date_key(to)).green()
            );
            if !conflicts.is_empty() {
                println!(
                    "{}",
                    format!("  Overlaps with: {}", conflicts.join(", ")).yellow()
                );
            }
        }
        MoveOutcome::Unchanged => {
            println!("{}", format!("  {} is already on {}", id, date_key(to)).dimmed());
        }
        MoveOutcome::Missing => {
            println!("{}", format!("  No event {} on {}", id, date_key(from)).dimmed());
        }
    }

    Ok(())
}
