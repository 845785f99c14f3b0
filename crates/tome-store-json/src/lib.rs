//! File-backed repositories for Tome.
//!
//! [`JsonFileStore`] keeps every character in a single JSON document. The
//! reference repositories read backgrounds and classes from JSON arrays and
//! the spell list from CSV.

mod document;
mod reference;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use reference::{
  CsvSpellRepository, JsonBackgroundRepository, JsonClassRepository,
};
pub use store::JsonFileStore;

#[cfg(test)]
mod tests;
