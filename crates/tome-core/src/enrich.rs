//! The `Enricher` trait: best-effort lookups of canonical weapon, armor,
//! spell, and race data from an external reference API.
//!
//! Every consumer keeps a local fallback, so implementations report failures
//! as [`Error::EnrichmentUnavailable`] and never block the rules engine.

use std::{collections::HashMap, future::Future};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Requests per second used by batch lookups when the caller passes 0.
pub const DEFAULT_MAX_PER_SECOND: u32 = 5;

/// API lookup key for a display name: trimmed, lowercased, spaces replaced
/// with hyphens (`"Chain Mail"` → `"chain-mail"`).
pub fn lookup_key(name: &str) -> String {
  name.trim().to_lowercase().replace(' ', "-")
}

// ─── DTOs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponInfo {
  pub name:       String,
  pub category:   String,
  /// Normal range in feet.
  pub range:      u32,
  pub two_handed: bool,
}

/// Armor (or shield) data used by the armor-class calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorInfo {
  pub name:      String,
  pub base_ac:   i32,
  /// Whether the wearer's dexterity modifier is added.
  pub dex_bonus: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellInfo {
  pub name:   String,
  pub range:  String,
  pub school: String,
}

/// A racial trait and its description paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitInfo {
  pub index: String,
  pub name:  String,
  pub desc:  Vec<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an external reference API.
///
/// Batch methods pace their requests to at most `max_per_second` and return a
/// map keyed by the input name. A failed lookup is simply absent from the map;
/// it never fails the batch.
pub trait Enricher: Send + Sync {
  fn get_weapon(
    &self,
    name: &str,
  ) -> impl Future<Output = Result<WeaponInfo>> + Send;

  fn get_armor(
    &self,
    name: &str,
  ) -> impl Future<Output = Result<ArmorInfo>> + Send;

  fn get_spell(
    &self,
    name: &str,
  ) -> impl Future<Output = Result<SpellInfo>> + Send;

  /// Skills the race is proficient in, derived from its SRD traits.
  fn get_racial_skill_proficiencies(
    &self,
    race: &str,
  ) -> impl Future<Output = Result<Vec<String>>> + Send;

  fn get_racial_traits(
    &self,
    race: &str,
  ) -> impl Future<Output = Result<Vec<TraitInfo>>> + Send;

  fn get_weapons_batch(
    &self,
    names: &[String],
    max_per_second: u32,
  ) -> impl Future<Output = HashMap<String, WeaponInfo>> + Send;

  fn get_armors_batch(
    &self,
    names: &[String],
    max_per_second: u32,
  ) -> impl Future<Output = HashMap<String, ArmorInfo>> + Send;

  fn get_spells_batch(
    &self,
    names: &[String],
    max_per_second: u32,
  ) -> impl Future<Output = HashMap<String, SpellInfo>> + Send;
}

// ─── Offline ─────────────────────────────────────────────────────────────────

/// An enricher with no backing service. Every lookup is unavailable, so
/// callers always take their local fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

fn offline<T>() -> Result<T> {
  Err(Error::EnrichmentUnavailable("offline mode".into()))
}

impl Enricher for Offline {
  async fn get_weapon(&self, _name: &str) -> Result<WeaponInfo> { offline() }

  async fn get_armor(&self, _name: &str) -> Result<ArmorInfo> { offline() }

  async fn get_spell(&self, _name: &str) -> Result<SpellInfo> { offline() }

  async fn get_racial_skill_proficiencies(
    &self,
    _race: &str,
  ) -> Result<Vec<String>> {
    offline()
  }

  async fn get_racial_traits(&self, _race: &str) -> Result<Vec<TraitInfo>> {
    offline()
  }

  async fn get_weapons_batch(
    &self,
    _names: &[String],
    _max_per_second: u32,
  ) -> HashMap<String, WeaponInfo> {
    HashMap::new()
  }

  async fn get_armors_batch(
    &self,
    _names: &[String],
    _max_per_second: u32,
  ) -> HashMap<String, ArmorInfo> {
    HashMap::new()
  }

  async fn get_spells_batch(
    &self,
    _names: &[String],
    _max_per_second: u32,
  ) -> HashMap<String, SpellInfo> {
    HashMap::new()
  }
}
