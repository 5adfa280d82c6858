use std::path::Path;

use anyhow::{Context, Result};
use calgrid_core::EventStore;
use calgrid_core::export::ExportFormat;
use calgrid_core::storage::Storage;
use chrono::Utc;
use owo_colors::OwoColorize;

pub fn run<S: Storage>(store: &EventStore<S>, format: ExportFormat, dir: &Path) -> Result<()> {
    let export = store.export(format, Utc::now())?;
    let path = export
        .write_to(dir)
        .with_context(|| format!("Failed to write export to {}", dir.display()))?;

    let count = store.all_events().len();
    println!(
        "{}",
        format!("  Exported {} events to {}", count, path.display()).green()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid_core::storage::MemoryStorage;

    #[test]
    fn writes_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::load(MemoryStorage::new()).unwrap();

        run(&store, ExportFormat::Json, dir.path()).unwrap();

        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("calendar-events-"));
        assert!(files[0].ends_with(".json"));
    }
}
