//! Snapshot persistence for stats and preferences.
//!
//! Each value is one JSON file named after a fixed key inside the data directory.
//! A missing file means "use defaults"; a file that does not parse is a hard error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::domain::GameStats;
use crate::keymap::Shortcuts;

pub const KEY_GAME_STATS: &str = "game_stats";
pub const KEY_SHOW_FEEDBACK: &str = "show_feedback_overlay";
pub const KEY_SHORTCUTS: &str = "keyboard_shortcuts";

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("I/O error on snapshot '{key}': {source}")]
  Io {
    key: String,
    #[source]
    source: std::io::Error,
  },
  #[error("Snapshot '{key}' is corrupt: {source}")]
  Corrupt {
    key: String,
    #[source]
    source: serde_json::Error,
  },
  #[error("Failed to encode snapshot '{key}': {source}")]
  Encode {
    key: String,
    #[source]
    source: serde_json::Error,
  },
}

/// Everything the game reloads at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Persisted {
  pub stats: GameStats,
  pub show_feedback: bool,
  pub shortcuts: Shortcuts,
}

#[derive(Clone, Debug)]
pub struct Store {
  dir: PathBuf,
}

impl Store {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{key}.json"))
  }

  /// Read one snapshot. `Ok(None)` when it was never written.
  #[instrument(level = "debug", skip(self), fields(dir = %self.dir.display()))]
  pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
    let path = self.path_for(key);
    let raw = match std::fs::read_to_string(&path) {
      Ok(s) => s,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(target: "typemaster_backend", %key, "No snapshot; using defaults");
        return Ok(None);
      }
      Err(e) => return Err(StoreError::Io { key: key.to_string(), source: e }),
    };
    serde_json::from_str(&raw)
      .map(Some)
      .map_err(|e| {
        error!(target: "typemaster_backend", %key, path = %path.display(), error = %e, "Corrupt snapshot");
        StoreError::Corrupt { key: key.to_string(), source: e }
      })
  }

  /// Overwrite one snapshot, creating the directory on first use.
  #[instrument(level = "debug", skip(self, value), fields(dir = %self.dir.display()))]
  pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
    let body = serde_json::to_string_pretty(value)
      .map_err(|e| StoreError::Encode { key: key.to_string(), source: e })?;
    std::fs::create_dir_all(&self.dir)
      .map_err(|e| StoreError::Io { key: key.to_string(), source: e })?;
    std::fs::write(self.path_for(key), body)
      .map_err(|e| StoreError::Io { key: key.to_string(), source: e })?;
    debug!(target: "typemaster_backend", %key, "Snapshot written");
    Ok(())
  }

  /// Load all snapshots, falling back to defaults for the ones never written.
  pub fn load_all(&self, default_show_feedback: bool) -> Result<Persisted, StoreError> {
    Ok(Persisted {
      stats: self.load(KEY_GAME_STATS)?.unwrap_or_default(),
      show_feedback: self.load(KEY_SHOW_FEEDBACK)?.unwrap_or(default_show_feedback),
      shortcuts: self.load(KEY_SHORTCUTS)?.unwrap_or_default(),
    })
  }

  pub fn save_all(&self, p: &Persisted) -> Result<(), StoreError> {
    self.save(KEY_GAME_STATS, &p.stats)?;
    self.save(KEY_SHOW_FEEDBACK, &p.show_feedback)?;
    self.save(KEY_SHORTCUTS, &p.shortcuts)
  }
}
