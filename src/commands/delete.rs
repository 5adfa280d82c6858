use anyhow::Result;
use calgrid_core::EventStore;
use calgrid_core::event::date_key;
use calgrid_core::storage::Storage;
use owo_colors::OwoColorize;

use super::parse_day;

pub fn run<S: Storage>(store: &mut EventStore<S>, id: &str, date: &str) -> Result<()> {
    let date = parse_day(date)?;

    if store.delete(id, date)? {
        println!("{}", format!("  Deleted {} from {}", id, date_key(date)).red());
    } else {
        println!("{}", format!("  No event {} on {}", id, date_key(date)).dimmed());
    }

    Ok(())
}
