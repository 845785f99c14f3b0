//! Ability scores, modifiers, and proficiency bonus.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ─── Ability ─────────────────────────────────────────────────────────────────

/// One of the six abilities.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Ability {
  Strength,
  Dexterity,
  Constitution,
  Intelligence,
  Wisdom,
  Charisma,
}

impl Ability {
  /// Three-letter abbreviation used on the printed sheet.
  pub fn abbreviation(self) -> &'static str {
    match self {
      Self::Strength => "STR",
      Self::Dexterity => "DEX",
      Self::Constitution => "CON",
      Self::Intelligence => "INT",
      Self::Wisdom => "WIS",
      Self::Charisma => "CHA",
    }
  }
}

// ─── Pure calculators ────────────────────────────────────────────────────────

/// `floor((score - 10) / 2)` using mathematical floor, so 8 → -1 and 7 → -2.
pub fn ability_modifier(score: i32) -> i32 { (score - 10).div_euclid(2) }

/// Proficiency bonus by character level. Levels below 1 get nothing.
pub fn proficiency_bonus(level: i32) -> i32 {
  match level {
    i32::MIN..=0 => 0,
    1..=4 => 2,
    5..=8 => 3,
    9..=12 => 4,
    13..=16 => 5,
    _ => 6,
  }
}

// ─── Scores ──────────────────────────────────────────────────────────────────

/// The six raw ability scores. Serialised with the short keys used by the
/// character file (`str`, `dex`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityScores {
  #[serde(rename = "str")]
  pub strength:     i32,
  #[serde(rename = "dex")]
  pub dexterity:    i32,
  #[serde(rename = "con")]
  pub constitution: i32,
  #[serde(rename = "int")]
  pub intelligence: i32,
  #[serde(rename = "wis")]
  pub wisdom:       i32,
  #[serde(rename = "cha")]
  pub charisma:     i32,
}

impl Default for AbilityScores {
  fn default() -> Self {
    Self {
      strength:     10,
      dexterity:    10,
      constitution: 10,
      intelligence: 10,
      wisdom:       10,
      charisma:     10,
    }
  }
}

impl AbilityScores {
  pub fn get(&self, ability: Ability) -> i32 {
    match ability {
      Ability::Strength => self.strength,
      Ability::Dexterity => self.dexterity,
      Ability::Constitution => self.constitution,
      Ability::Intelligence => self.intelligence,
      Ability::Wisdom => self.wisdom,
      Ability::Charisma => self.charisma,
    }
  }

  pub fn get_mut(&mut self, ability: Ability) -> &mut i32 {
    match ability {
      Ability::Strength => &mut self.strength,
      Ability::Dexterity => &mut self.dexterity,
      Ability::Constitution => &mut self.constitution,
      Ability::Intelligence => &mut self.intelligence,
      Ability::Wisdom => &mut self.wisdom,
      Ability::Charisma => &mut self.charisma,
    }
  }

  pub fn modifier(&self, ability: Ability) -> i32 {
    ability_modifier(self.get(ability))
  }
}

// ─── Modifiers ───────────────────────────────────────────────────────────────

/// Cached modifiers, stored alongside the scores for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityModifiers {
  #[serde(rename = "str_mod")]
  pub strength:     i32,
  #[serde(rename = "dex_mod")]
  pub dexterity:    i32,
  #[serde(rename = "con_mod")]
  pub constitution: i32,
  #[serde(rename = "int_mod")]
  pub intelligence: i32,
  #[serde(rename = "wis_mod")]
  pub wisdom:       i32,
  #[serde(rename = "cha_mod")]
  pub charisma:     i32,
}

impl AbilityModifiers {
  pub fn from_scores(scores: &AbilityScores) -> Self {
    Self {
      strength:     ability_modifier(scores.strength),
      dexterity:    ability_modifier(scores.dexterity),
      constitution: ability_modifier(scores.constitution),
      intelligence: ability_modifier(scores.intelligence),
      wisdom:       ability_modifier(scores.wisdom),
      charisma:     ability_modifier(scores.charisma),
    }
  }

  pub fn get(&self, ability: Ability) -> i32 {
    match ability {
      Ability::Strength => self.strength,
      Ability::Dexterity => self.dexterity,
      Ability::Constitution => self.constitution,
      Ability::Intelligence => self.intelligence,
      Ability::Wisdom => self.wisdom,
      Ability::Charisma => self.charisma,
    }
  }
}
