use std::path::Path;

use anyhow::Result;
use calgrid_core::config::CalGridConfig;
use calgrid_core::storage::STORAGE_KEY;
use owo_colors::OwoColorize;

pub fn run(config: &CalGridConfig, config_file: Option<&Path>) -> Result<()> {
    let config_path = match config_file {
        Some(path) => path.to_path_buf(),
        None => CalGridConfig::config_path()?,
    };

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!(
        "  Events:   {}",
        config.data_path().join(format!("{}.json", STORAGE_KEY)).display()
    );
    println!("  Exports:  {}", config.export_path().display());
    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
