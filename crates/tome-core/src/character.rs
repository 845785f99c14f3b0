//! The `Character` aggregate.
//!
//! A character is keyed by name. Class, race, and background are copied in
//! by value; derived fields are filled by [`crate::derived`] and persisted
//! alongside the raw data so a stored sheet can be read without recomputing.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
  Error, Result,
  ability::{AbilityModifiers, AbilityScores},
  rules::{MAX_CHARACTER_LEVEL, caster_archetype_for},
  spellcasting::SpellcastingState,
};

// ─── Equipment ───────────────────────────────────────────────────────────────

/// One of the four equipment slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EquipSlot {
  #[strum(serialize = "main hand")]
  MainHand,
  #[strum(serialize = "off hand")]
  OffHand,
  #[strum(serialize = "armor")]
  Armor,
  #[strum(serialize = "shield")]
  Shield,
}

impl EquipSlot {
  /// Parse a weapon slot alias. Anything that is not an off-hand alias means
  /// the main hand.
  pub fn weapon_slot(alias: &str) -> Self {
    match alias.trim().to_lowercase().as_str() {
      "off hand" | "off" | "oh" => Self::OffHand,
      _ => Self::MainHand,
    }
  }
}

/// Equipped items by lowercase name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub main_hand: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub off_hand:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub armor:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub shield:    Option<String>,
}

impl Equipment {
  pub fn get(&self, slot: EquipSlot) -> Option<&str> {
    self.slot(slot).as_deref()
  }

  fn slot(&self, slot: EquipSlot) -> &Option<String> {
    match slot {
      EquipSlot::MainHand => &self.main_hand,
      EquipSlot::OffHand => &self.off_hand,
      EquipSlot::Armor => &self.armor,
      EquipSlot::Shield => &self.shield,
    }
  }

  fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<String> {
    match slot {
      EquipSlot::MainHand => &mut self.main_hand,
      EquipSlot::OffHand => &mut self.off_hand,
      EquipSlot::Armor => &mut self.armor,
      EquipSlot::Shield => &mut self.shield,
    }
  }
}

// ─── Character ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
  pub name:                String,
  pub race:                String,
  pub class:               String,
  pub level:               i32,
  #[serde(flatten)]
  pub abilities:           AbilityScores,
  pub background:          String,
  #[serde(rename = "proficiency")]
  pub proficiency_bonus:   i32,
  pub skill_proficiencies: Vec<String>,
  #[serde(flatten)]
  pub equipment:           Equipment,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub spellcasting:        Option<SpellcastingState>,

  // Derived; see `crate::derived::recalculate_derived`.
  #[serde(flatten)]
  pub modifiers:           AbilityModifiers,
  pub armor_class:         i32,
  pub initiative:          i32,
  pub passive_perception:  i32,
  pub spell_attack_bonus:  i32,
}

impl Character {
  /// A validated character with default scores and no derived stats yet.
  pub fn new(
    name: impl Into<String>,
    race: impl Into<String>,
    class: impl Into<String>,
    level: i32,
  ) -> Result<Self> {
    let character = Self {
      name: name.into().trim().to_owned(),
      race: race.into().trim().to_owned(),
      class: class.into().trim().to_owned(),
      level,
      ..Self::default()
    };
    character.validate()?;
    Ok(character)
  }

  /// Check the invariants every stored character must hold.
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::InvalidCharacter("name is required".into()));
    }
    let max = i32::from(MAX_CHARACTER_LEVEL);
    if !(1..=max).contains(&self.level) {
      return Err(Error::InvalidCharacter(format!(
        "level must be between 1 and {max}, got {}",
        self.level
      )));
    }
    Ok(())
  }

  /// Whether the character's class can cast at all.
  pub fn is_caster(&self) -> bool {
    caster_archetype_for(&self.class).can_cast()
  }

  /// Make sure the spellcasting state matches the current class and level.
  ///
  /// Creates a state when there is none. An existing state is re-derived in
  /// place, keeping its spell lists.
  pub fn assign_spellcasting(&mut self) -> &mut SpellcastingState {
    let (class, level) = (&self.class, self.level);
    let state = self
      .spellcasting
      .get_or_insert_with(|| SpellcastingState::assign(class, level));
    state.reassign(class, level);
    state
  }

  pub fn learn_spell(&mut self, spell: &str) -> Result<()> {
    self.assign_spellcasting().learn(spell)
  }

  pub fn prepare_spell(&mut self, spell: &str, spell_level: u8) -> Result<()> {
    self.assign_spellcasting().prepare(spell, spell_level)
  }

  /// Put an item into an empty slot. Names are stored lowercased.
  pub fn equip(&mut self, slot: EquipSlot, item: &str) -> Result<()> {
    let item = item.trim().to_lowercase();
    if item.is_empty() {
      return Err(Error::InvalidCharacter(format!("no item given for {slot}")));
    }

    let target = self.equipment.slot_mut(slot);
    if target.is_some() {
      return Err(Error::SlotOccupied(slot));
    }
    *target = Some(item);
    Ok(())
  }

  /// Case-insensitive skill check; stored entries are trimmed first.
  pub fn has_skill(&self, skill: &str) -> bool {
    let skill = skill.trim();
    self
      .skill_proficiencies
      .iter()
      .any(|s| s.trim().eq_ignore_ascii_case(skill))
  }
}
