//! Reference-data repositories: backgrounds and classes from JSON arrays,
//! spells from CSV.
//!
//! Files are re-read on every call. They are small and the CLI only touches
//! them once per invocation.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tome_core::{
  enrich::lookup_key,
  reference::{Background, ClassInfo, Spell},
  store::{BackgroundRepository, ClassRepository, SpellRepository},
};
use tracing::debug;

use crate::{Error, Result};

fn load_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
  let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
  serde_json::from_slice(&bytes).map_err(|e| Error::json(path, e))
}

// ─── Backgrounds ─────────────────────────────────────────────────────────────

/// Backgrounds from a JSON array of `{ name, skill_proficiencies }`.
#[derive(Debug, Clone)]
pub struct JsonBackgroundRepository {
  path: PathBuf,
}

impl JsonBackgroundRepository {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

impl BackgroundRepository for JsonBackgroundRepository {
  type Error = Error;

  fn load_backgrounds(&self) -> Result<Vec<Background>> {
    load_json_array(&self.path)
  }

  fn find_by_name(&self, name: &str) -> Result<Background> {
    self
      .load_backgrounds()?
      .into_iter()
      .find(|b| b.name.trim().eq_ignore_ascii_case(name.trim()))
      .ok_or_else(|| {
        tome_core::Error::BackgroundNotFound(name.to_owned()).into()
      })
  }
}

// ─── Classes ─────────────────────────────────────────────────────────────────

/// Classes from a JSON array of `{ name, skill_proficiencies, skill_count }`.
#[derive(Debug, Clone)]
pub struct JsonClassRepository {
  path: PathBuf,
}

impl JsonClassRepository {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

impl ClassRepository for JsonClassRepository {
  type Error = Error;

  fn load_classes(&self) -> Result<Vec<ClassInfo>> {
    load_json_array(&self.path)
  }

  fn find_by_name(&self, name: &str) -> Result<ClassInfo> {
    self
      .load_classes()?
      .into_iter()
      .find(|c| c.name.trim().eq_ignore_ascii_case(name.trim()))
      .ok_or_else(|| tome_core::Error::ClassNotFound(name.to_owned()).into())
  }
}

// ─── Spells ──────────────────────────────────────────────────────────────────

/// The spell list from a CSV file with a header row and the columns
/// `name,level,classes`. The classes field is itself comma-separated, so it
/// is quoted in the file. Extra columns are ignored.
#[derive(Debug, Clone)]
pub struct CsvSpellRepository {
  path: PathBuf,
}

impl CsvSpellRepository {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

fn parse_classes(field: &str) -> Vec<String> {
  field
    .split(',')
    .map(str::trim)
    .filter(|c| !c.is_empty())
    .map(str::to_owned)
    .collect()
}

fn parse_spell(record: &csv::StringRecord) -> Result<Option<Spell>> {
  let name = record.get(0).unwrap_or_default().trim();
  if name.is_empty() {
    return Ok(None);
  }

  let raw_level = record.get(1).unwrap_or_default().trim();
  let level = match raw_level {
    "" => 0,
    raw => raw.parse().map_err(|_| Error::InvalidSpellLevel {
      name:  name.to_owned(),
      value: raw.to_owned(),
    })?,
  };

  Ok(Some(Spell {
    index: lookup_key(name),
    name: name.to_owned(),
    level,
    classes: parse_classes(record.get(2).unwrap_or_default()),
  }))
}

impl SpellRepository for CsvSpellRepository {
  type Error = Error;

  fn load_spells(&self) -> Result<Vec<Spell>> {
    let mut reader = csv::ReaderBuilder::new()
      .has_headers(true)
      .flexible(true)
      .from_path(&self.path)?;

    let mut spells = Vec::new();
    for record in reader.records() {
      if let Some(spell) = parse_spell(&record?)? {
        spells.push(spell);
      }
    }
    debug!(path = %self.path.display(), count = spells.len(), "loaded spells");
    Ok(spells)
  }

  fn filter_by_class(&self, class: &str) -> Result<Vec<Spell>> {
    Ok(
      self
        .load_spells()?
        .into_iter()
        .filter(|s| s.is_available_to(class))
        .collect(),
    )
  }

  fn find_for_class(&self, spell: &str, class: &str) -> Result<Spell> {
    let key = lookup_key(spell);
    self
      .filter_by_class(class)?
      .into_iter()
      .find(|s| s.index == key || s.name.eq_ignore_ascii_case(spell.trim()))
      .ok_or_else(|| {
        tome_core::Error::SpellNotFound {
          spell: spell.to_owned(),
          class: class.to_owned(),
        }
        .into()
      })
  }
}
