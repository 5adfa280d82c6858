//! User configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};
use crate::storage::FileStorage;
use crate::store::{EventStore, MovePolicy};

static DEFAULT_EXPORT_DIR: &str = ".";

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("calgrid"))
        .unwrap_or_else(|| PathBuf::from("~/.calgrid"))
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

/// Configuration at ~/.config/calgrid/config.toml, overridable with
/// `CALGRID_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalGridConfig {
    /// Where the event store is persisted.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Where exports are written.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(default)]
    pub move_conflicts: MovePolicy,
}

impl Default for CalGridConfig {
    fn default() -> Self {
        CalGridConfig {
            data_dir: default_data_dir(),
            export_dir: default_export_dir(),
            move_conflicts: MovePolicy::default(),
        }
    }
}

impl CalGridConfig {
    pub fn config_path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out config file
    /// there on first run.
    pub fn load() -> CalGridResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> CalGridResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALGRID"))
            .build()
            .map_err(|e| CalGridError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalGridError::Config(e.to_string()))
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    pub fn export_path(&self) -> PathBuf {
        expand(&self.export_dir)
    }

    /// Open the event store persisted under `data_dir`.
    pub fn open_store(&self) -> CalGridResult<EventStore<FileStorage>> {
        let store = EventStore::load(FileStorage::new(self.data_path()))?;
        Ok(store.with_move_policy(self.move_conflicts))
    }

    pub fn to_toml(&self) -> CalGridResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalGridError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalGridResult<()> {
        let contents = format!(
            "\
# calgrid configuration

# Where your events are stored:
# data_dir = \"{}\"

# Where `calgrid export` writes files:
# export_dir = \"{}\"

# What moving an event onto a busy time slot does (\"allow\" or \"reject\"):
# move_conflicts = \"allow\"
",
            default_data_dir().display(),
            DEFAULT_EXPORT_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
