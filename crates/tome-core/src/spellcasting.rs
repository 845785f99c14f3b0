//! Per-character spellcasting state and the learn/prepare state machine.
//!
//! A state is created by [`SpellcastingState::assign`] once the character's
//! archetype is known. Known and pact casters grow `known_spells` through
//! [`SpellcastingState::learn`]; full and half casters grow `prepared_spells`
//! through [`SpellcastingState::prepare`]. Preparing does not require the
//! spell to be known first: a prepared caster picks from its whole class list.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
  Error, Result,
  rules::{
    CasterArchetype, SpellSlots, cantrips_known_for, caster_archetype_for,
    spell_slots_for,
  },
};

/// The transition a caller attempted; used in [`Error::WrongCasterType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SpellAction {
  Learn,
  Prepare,
}

/// What a character can cast and how many slots it has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellcastingState {
  pub archetype:       CasterArchetype,
  /// Spells learned permanently. Unique, compared case-insensitively.
  pub known_spells:    Vec<String>,
  /// Spells prepared for the day. Only ever filled for full/half casters.
  pub prepared_spells: Vec<String>,
  pub slots:           SpellSlots,
}

impl SpellcastingState {
  /// Fresh state for a class at a level: archetype and slots from the rules
  /// tables, no spells.
  pub fn assign(class: &str, level: i32) -> Self {
    let archetype = caster_archetype_for(class);
    Self {
      archetype,
      known_spells: Vec::new(),
      prepared_spells: Vec::new(),
      slots: spell_slots_for(archetype, level),
    }
  }

  /// Re-derive archetype and slots for a class and level, keeping learned and
  /// prepared spells. Returns `false` when nothing changed.
  pub fn reassign(&mut self, class: &str, level: i32) -> bool {
    let archetype = caster_archetype_for(class);
    let slots = spell_slots_for(archetype, level);
    if self.archetype == archetype && self.slots == slots {
      return false;
    }

    self.archetype = archetype;
    self.slots = slots;
    if !archetype.prepares_spells() {
      self.prepared_spells.clear();
    }
    true
  }

  /// The highest spell-slot level with at least one slot, or 0.
  pub fn highest_slot_level(&self) -> u8 {
    self
      .slots
      .iter()
      .filter(|(_, count)| **count > 0)
      .map(|(level, _)| *level)
      .max()
      .unwrap_or(0)
  }

  pub fn knows(&self, spell: &str) -> bool {
    contains_ignore_case(&self.known_spells, spell)
  }

  pub fn has_prepared(&self, spell: &str) -> bool {
    contains_ignore_case(&self.prepared_spells, spell)
  }

  /// Learn a spell permanently. Only known and pact casters learn.
  pub fn learn(&mut self, spell: &str) -> Result<()> {
    if !self.archetype.learns_spells() {
      return Err(Error::WrongCasterType {
        archetype: self.archetype,
        action:    SpellAction::Learn,
      });
    }
    if self.knows(spell) {
      return Err(Error::AlreadyKnown(spell.to_owned()));
    }

    self.known_spells.push(spell.to_owned());
    Ok(())
  }

  /// Prepare a spell of `spell_level` (0 for cantrips). Only full and half
  /// casters prepare, and never above their highest slot level.
  pub fn prepare(&mut self, spell: &str, spell_level: u8) -> Result<()> {
    if !self.archetype.prepares_spells() {
      return Err(Error::WrongCasterType {
        archetype: self.archetype,
        action:    SpellAction::Prepare,
      });
    }
    if self.has_prepared(spell) {
      return Err(Error::AlreadyPrepared(spell.to_owned()));
    }

    let highest_slot = self.highest_slot_level();
    if spell_level > 0 && spell_level > highest_slot {
      return Err(Error::SlotTooHigh {
        spell: spell.to_owned(),
        spell_level,
        highest_slot,
      });
    }

    self.prepared_spells.push(spell.to_owned());
    Ok(())
  }

  /// Render the slot table for the sheet: cantrips as level 0, then each
  /// populated slot level in ascending order.
  pub fn format_spell_slots(&self, class: &str, level: i32) -> String {
    let mut out = String::from("Spell slots:\n");

    let cantrips = cantrips_known_for(class, level);
    if cantrips > 0 {
      let _ = writeln!(out, "  Level 0: {cantrips}");
    }
    for (slot_level, count) in self.slots.range(1..=9) {
      if *count > 0 {
        let _ = writeln!(out, "  Level {slot_level}: {count}");
      }
    }
    out
  }

  /// Render cantrips, preferring a level-0 slot count when one is tracked and
  /// otherwise listing known spells tagged as cantrips. Empty when neither
  /// source has anything.
  pub fn format_cantrips(&self) -> String {
    if let Some(count) = self.slots.get(&0) {
      return format!("Spell slots:\n  Level 0: {count}\n");
    }

    let cantrips: Vec<&str> = self
      .known_spells
      .iter()
      .filter(|name| {
        let lower = name.to_lowercase();
        lower.contains("cantrip") || lower.contains("level 0")
      })
      .map(String::as_str)
      .collect();
    if cantrips.is_empty() {
      return String::new();
    }
    format!("Cantrips: {}\n", cantrips.join(", "))
  }
}

fn contains_ignore_case(list: &[String], name: &str) -> bool {
  let name = name.trim();
  list.iter().any(|s| s.trim().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn assign_wizard_level_three() {
    let state = SpellcastingState::assign("wizard", 3);
    assert_eq!(state.archetype, CasterArchetype::Full);
    assert_eq!(state.slots, SpellSlots::from([(1, 4), (2, 2)]));
    assert!(state.known_spells.is_empty());
    assert!(state.prepared_spells.is_empty());
    assert_eq!(state.highest_slot_level(), 2);
  }

  #[test]
  fn assign_non_caster_has_no_slots() {
    let state = SpellcastingState::assign("fighter", 5);
    assert_eq!(state.archetype, CasterArchetype::None);
    assert!(state.slots.is_empty());
    assert_eq!(state.highest_slot_level(), 0);
  }

  #[test]
  fn learning_twice_keeps_one_entry() {
    let mut state = SpellcastingState::assign("sorcerer", 3);
    state.learn("Fireball").unwrap();
    let err = state.learn("fireball").unwrap_err();
    assert_eq!(err, Error::AlreadyKnown("fireball".into()));
    assert_eq!(state.known_spells, vec!["Fireball".to_string()]);
  }

  #[test]
  fn warlock_learns() {
    let mut state = SpellcastingState::assign("warlock", 1);
    state.learn("hex").unwrap();
    assert!(state.knows("HEX"));
  }

  #[test]
  fn learn_on_prepared_caster_is_rejected_without_change() {
    let mut state = SpellcastingState::assign("wizard", 3);
    let before = state.clone();
    let err = state.learn("magic missile").unwrap_err();
    assert_eq!(err, Error::WrongCasterType {
      archetype: CasterArchetype::Full,
      action:    SpellAction::Learn,
    });
    assert_eq!(
      err.to_string(),
      "this class prepares spells and can't learn them"
    );
    assert_eq!(state, before);
  }

  #[test]
  fn prepare_on_learned_caster_is_rejected_without_change() {
    let mut state = SpellcastingState::assign("bard", 3);
    let before = state.clone();
    let err = state.prepare("healing word", 1).unwrap_err();
    assert!(matches!(err, Error::WrongCasterType {
      action: SpellAction::Prepare,
      ..
    }));
    assert_eq!(state, before);
  }

  #[test]
  fn non_casters_cannot_do_either() {
    let mut state = SpellcastingState::assign("rogue", 3);
    let err = state.learn("light").unwrap_err();
    assert_eq!(err.to_string(), "this class can't cast spells");
    assert!(state.prepare("light", 0).is_err());
    assert_eq!(state, SpellcastingState::assign("rogue", 3));
  }

  #[test]
  fn wizard_prepares_without_learning_first() {
    let mut state = SpellcastingState::assign("wizard", 3);
    state.prepare("magic missile", 1).unwrap();
    assert_eq!(state.prepared_spells, vec!["magic missile".to_string()]);
    assert!(state.known_spells.is_empty());
  }

  #[test]
  fn duplicate_prepare_is_rejected() {
    let mut state = SpellcastingState::assign("cleric", 1);
    state.prepare("Bless", 1).unwrap();
    assert_eq!(
      state.prepare("bless", 1).unwrap_err(),
      Error::AlreadyPrepared("bless".into())
    );
    assert_eq!(state.prepared_spells.len(), 1);
  }

  #[test]
  fn prepare_above_highest_slot_fails() {
    let mut state = SpellcastingState::assign("wizard", 3);
    let err = state.prepare("fireball", 3).unwrap_err();
    assert_eq!(err, Error::SlotTooHigh {
      spell:        "fireball".into(),
      spell_level:  3,
      highest_slot: 2,
    });
    assert!(state.prepared_spells.is_empty());
  }

  #[test]
  fn cantrips_prepare_even_without_slots() {
    let mut state = SpellcastingState::assign("paladin", 1);
    assert!(state.slots.is_empty());
    state.prepare("light", 0).unwrap();
    assert!(state.prepare("bless", 1).is_err());
    assert_eq!(state.prepared_spells, vec!["light".to_string()]);
  }

  #[test]
  fn reassign_is_a_no_op_for_same_class_and_level() {
    let mut state = SpellcastingState::assign("bard", 2);
    state.learn("charm person").unwrap();
    assert!(!state.reassign("Bard", 2));
    assert_eq!(state.known_spells, vec!["charm person".to_string()]);
  }

  #[test]
  fn reassign_on_level_up_keeps_spells() {
    let mut state = SpellcastingState::assign("wizard", 3);
    state.prepare("shield", 1).unwrap();
    assert!(state.reassign("wizard", 5));
    assert_eq!(state.highest_slot_level(), 3);
    assert_eq!(state.prepared_spells, vec!["shield".to_string()]);
  }

  #[test]
  fn format_spell_slots_lists_cantrips_then_levels() {
    let state = SpellcastingState::assign("wizard", 3);
    assert_eq!(
      state.format_spell_slots("wizard", 3),
      "Spell slots:\n  Level 0: 3\n  Level 1: 4\n  Level 2: 2\n"
    );
  }

  #[test]
  fn format_spell_slots_omits_cantrips_for_half_casters() {
    let state = SpellcastingState::assign("paladin", 2);
    assert_eq!(
      state.format_spell_slots("paladin", 2),
      "Spell slots:\n  Level 1: 2\n"
    );
  }

  #[test]
  fn format_cantrips_prefers_level_zero_slots() {
    let mut state = SpellcastingState::assign("sorcerer", 1);
    state.slots.insert(0, 4);
    assert_eq!(state.format_cantrips(), "Spell slots:\n  Level 0: 4\n");
  }

  #[test]
  fn format_cantrips_scans_known_spells() {
    let mut state = SpellcastingState::assign("sorcerer", 1);
    state.learn("Fire Bolt (cantrip)").unwrap();
    state.learn("magic missile").unwrap();
    state.learn("Light - Level 0").unwrap();
    assert_eq!(
      state.format_cantrips(),
      "Cantrips: Fire Bolt (cantrip), Light - Level 0\n"
    );
  }

  #[test]
  fn format_cantrips_empty_without_data() {
    let state = SpellcastingState::assign("wizard", 1);
    assert_eq!(state.format_cantrips(), "");
  }
}
