//! Error type for `tome-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] tome_core::Error),

  #[error("i/o error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("json error in {}: {source}", path.display())]
  Json {
    path:   PathBuf,
    source: serde_json::Error,
  },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("spell {name:?} has an invalid level {value:?}")]
  InvalidSpellLevel { name: String, value: String },
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }

  pub(crate) fn json(
    path: impl Into<PathBuf>,
    source: serde_json::Error,
  ) -> Self {
    Self::Json { path: path.into(), source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
