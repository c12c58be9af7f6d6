//! Loading game configuration from TOML.
//!
//! See `GameConfig` for the expected schema. Every field is optional.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_DATA_DIR: &str = "./.typemaster";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
  /// Where stats and preference snapshots live.
  #[serde(default = "default_data_dir")]
  pub data_dir: PathBuf,
  /// Start in dual-category mode.
  #[serde(default)]
  pub dual_mode: bool,
  /// Feedback preference used until the player changes it.
  #[serde(default)]
  pub show_feedback: bool,
}

fn default_data_dir() -> PathBuf {
  PathBuf::from(DEFAULT_DATA_DIR)
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      data_dir: default_data_dir(),
      dual_mode: false,
      show_feedback: false,
    }
  }
}

/// How the driver prints replies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn from_env() -> Self {
    match std::env::var("OUTPUT_FORMAT").as_deref() {
      Ok("json") => OutputFormat::Json,
      _ => OutputFormat::Text,
    }
  }
}

/// Parse a config document. Missing keys take their defaults.
pub fn parse_config(s: &str) -> Result<GameConfig, toml::de::Error> {
  toml::from_str::<GameConfig>(s)
}

/// Attempt to load `GameConfig` from TYPEMASTER_CONFIG_PATH, then apply
/// TYPEMASTER_DATA_DIR. Any read/parse error is logged and defaults are used.
pub fn load_config_from_env() -> GameConfig {
  let mut cfg = std::env::var("TYPEMASTER_CONFIG_PATH")
    .ok()
    .and_then(|path| match std::fs::read_to_string(&path) {
      Ok(s) => match parse_config(&s) {
        Ok(cfg) => {
          info!(target: "typemaster_backend", %path, "Loaded game config (TOML)");
          Some(cfg)
        }
        Err(e) => {
          error!(target: "typemaster_backend", %path, error = %e, "Failed to parse TOML config");
          None
        }
      },
      Err(e) => {
        error!(target: "typemaster_backend", %path, error = %e, "Failed to read TOML config file");
        None
      }
    })
    .unwrap_or_default();

  if let Ok(dir) = std::env::var("TYPEMASTER_DATA_DIR") {
    if !dir.trim().is_empty() {
      cfg.data_dir = PathBuf::from(dir);
    }
  }
  cfg
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_is_default() {
    assert_eq!(parse_config("").unwrap(), GameConfig::default());
  }

  #[test]
  fn fields_override_defaults() {
    let cfg = parse_config("data_dir = \"/tmp/tm\"\ndual_mode = true\n").unwrap();
    assert_eq!(cfg.data_dir, PathBuf::from("/tmp/tm"));
    assert!(cfg.dual_mode);
    assert!(!cfg.show_feedback);
  }

  #[test]
  fn bad_types_are_rejected() {
    assert!(parse_config("dual_mode = \"yes\"").is_err());
  }
}
