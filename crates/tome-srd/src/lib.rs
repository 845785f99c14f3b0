//! HTTP enrichment gateway for an SRD-style 5e reference API.
//!
//! [`SrdClient`] implements [`tome_core::enrich::Enricher`]. Lookups are
//! best-effort: every failure surfaces as
//! [`tome_core::Error::EnrichmentUnavailable`] at the trait boundary and the
//! caller falls back to local tables.

mod batch;
mod client;
mod enricher;
mod traits;

pub mod error;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, SrdClient, SrdConfig};
pub use error::{Error, Result};
