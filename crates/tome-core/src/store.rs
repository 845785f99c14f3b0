//! Repository traits for characters and reference data.
//!
//! Implemented by `tome-store-json`. The CLI depends on these abstractions,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  character::Character,
  reference::{Background, ClassInfo, Spell},
};

// ─── Characters ──────────────────────────────────────────────────────────────

/// Persistence for characters, keyed by name.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait CharacterRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert or overwrite the character with the same name.
  fn save(
    &self,
    character: &Character,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;

  /// Every stored character, in storage order.
  fn get_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Character>, Self::Error>> + Send;

  /// The character with exactly this name. Absent names are an error.
  fn get_by_id(
    &self,
    name: &str,
  ) -> impl Future<Output = Result<Character, Self::Error>> + Send;

  /// Remove the character with this name. Absent names are an error.
  fn delete(
    &self,
    name: &str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

// ─── Reference data ──────────────────────────────────────────────────────────

pub trait BackgroundRepository {
  type Error: std::error::Error + Send + Sync + 'static;

  fn load_backgrounds(&self) -> Result<Vec<Background>, Self::Error>;

  /// Case-insensitive lookup by name.
  fn find_by_name(&self, name: &str) -> Result<Background, Self::Error>;
}

pub trait ClassRepository {
  type Error: std::error::Error + Send + Sync + 'static;

  fn load_classes(&self) -> Result<Vec<ClassInfo>, Self::Error>;

  /// Case-insensitive lookup by name.
  fn find_by_name(&self, name: &str) -> Result<ClassInfo, Self::Error>;
}

pub trait SpellRepository {
  type Error: std::error::Error + Send + Sync + 'static;

  fn load_spells(&self) -> Result<Vec<Spell>, Self::Error>;

  /// Spells whose class list contains `class`.
  fn filter_by_class(&self, class: &str) -> Result<Vec<Spell>, Self::Error>;

  /// A single spell by name (case-insensitive) from `class`'s list.
  fn find_for_class(
    &self,
    spell: &str,
    class: &str,
  ) -> Result<Spell, Self::Error>;
}
