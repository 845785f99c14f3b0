//! Runtime settings: built-in defaults, then an optional TOML file, then
//! `TOME_*` environment variables. Command-line flags are applied on top by
//! `main`.

use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use serde::Deserialize;
use tome_core::enrich::DEFAULT_MAX_PER_SECOND;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// The character file.
  pub storage_path:         PathBuf,
  pub api_base_url:         String,
  pub backgrounds_path:     PathBuf,
  pub classes_path:         PathBuf,
  pub spells_path:          PathBuf,
  pub requests_per_second:  u32,
  pub request_timeout_secs: u64,
  /// Skip the reference API entirely and use local tables.
  pub offline:              bool,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      storage_path:         "characters.json".into(),
      api_base_url:         tome_srd::DEFAULT_BASE_URL.to_owned(),
      backgrounds_path:     "data/backgrounds.json".into(),
      classes_path:         "data/classes.json".into(),
      spells_path:          "data/spells.csv".into(),
      requests_per_second:  DEFAULT_MAX_PER_SECOND,
      request_timeout_secs: tome_srd::DEFAULT_TIMEOUT.as_secs(),
      offline:              false,
    }
  }
}

impl Settings {
  /// Layer `file` (if it exists) and the environment over the defaults.
  pub fn load(file: PathBuf) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("TOME").try_parsing(true))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}
