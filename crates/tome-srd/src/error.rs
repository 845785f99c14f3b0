//! Error type for `tome-srd`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("GET {url} → {status}")]
  Status {
    url:    String,
    status: reqwest::StatusCode,
  },

  /// None of the trait endpoints for a race could be reached.
  #[error("no trait data available for race {0:?}")]
  NoTraitData(String),
}

impl From<Error> for tome_core::Error {
  fn from(e: Error) -> Self { Self::EnrichmentUnavailable(e.to_string()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
