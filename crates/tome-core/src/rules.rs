//! Static spellcasting tables: caster archetype by class, spell slots by
//! archetype and level, and cantrips known by class and level.
//!
//! All tables follow the SRD progression and are immutable; lookups are pure
//! functions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Spell-slot level (1–9) to number of slots.
pub type SpellSlots = BTreeMap<u8, u8>;

pub const MAX_CHARACTER_LEVEL: u8 = 20;
pub const MAX_SLOT_LEVEL: u8 = 9;

// ─── Archetype ───────────────────────────────────────────────────────────────

/// How a class gains and uses spells.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
  Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CasterArchetype {
  #[default]
  None,
  /// Prepares from the whole class list; full slot progression.
  Full,
  /// Prepares from the whole class list; slots start at level 2.
  Half,
  /// Learns spells; few slots, all at the highest pact level.
  Pact,
  /// Learns spells; full slot progression.
  Known,
}

impl CasterArchetype {
  pub fn can_cast(self) -> bool { self != Self::None }

  /// Known and pact casters learn spells permanently.
  pub fn learns_spells(self) -> bool { matches!(self, Self::Known | Self::Pact) }

  /// Full and half casters prepare spells from their class list.
  pub fn prepares_spells(self) -> bool {
    matches!(self, Self::Full | Self::Half)
  }
}

/// Caster archetype for a class name, case-insensitive. Unknown classes
/// cannot cast.
pub fn caster_archetype_for(class: &str) -> CasterArchetype {
  match class.trim().to_ascii_lowercase().as_str() {
    "wizard" | "cleric" | "druid" => CasterArchetype::Full,
    "bard" | "sorcerer" => CasterArchetype::Known,
    "paladin" | "ranger" => CasterArchetype::Half,
    "warlock" => CasterArchetype::Pact,
    _ => CasterArchetype::None,
  }
}

// ─── Slot tables ─────────────────────────────────────────────────────────────

// Row = character level - 1, column = slot level - 1.
type SlotTable = [[u8; MAX_SLOT_LEVEL as usize]; MAX_CHARACTER_LEVEL as usize];

static FULL_CASTER_SLOTS: SlotTable = [
  [2, 0, 0, 0, 0, 0, 0, 0, 0],
  [3, 0, 0, 0, 0, 0, 0, 0, 0],
  [4, 2, 0, 0, 0, 0, 0, 0, 0],
  [4, 3, 0, 0, 0, 0, 0, 0, 0],
  [4, 3, 2, 0, 0, 0, 0, 0, 0],
  [4, 3, 3, 0, 0, 0, 0, 0, 0],
  [4, 3, 3, 1, 0, 0, 0, 0, 0],
  [4, 3, 3, 2, 0, 0, 0, 0, 0],
  [4, 3, 3, 3, 1, 0, 0, 0, 0],
  [4, 3, 3, 3, 2, 0, 0, 0, 0],
  [4, 3, 3, 3, 2, 1, 0, 0, 0],
  [4, 3, 3, 3, 2, 1, 0, 0, 0],
  [4, 3, 3, 3, 2, 1, 1, 0, 0],
  [4, 3, 3, 3, 2, 1, 1, 0, 0],
  [4, 3, 3, 3, 2, 1, 1, 1, 0],
  [4, 3, 3, 3, 2, 1, 1, 1, 0],
  [4, 3, 3, 3, 2, 1, 1, 1, 1],
  [4, 3, 3, 3, 3, 1, 1, 1, 1],
  [4, 3, 3, 3, 3, 2, 1, 1, 1],
  [4, 3, 3, 3, 3, 2, 2, 1, 1],
];

static HALF_CASTER_SLOTS: SlotTable = [
  [0, 0, 0, 0, 0, 0, 0, 0, 0],
  [2, 0, 0, 0, 0, 0, 0, 0, 0],
  [3, 0, 0, 0, 0, 0, 0, 0, 0],
  [3, 0, 0, 0, 0, 0, 0, 0, 0],
  [4, 2, 0, 0, 0, 0, 0, 0, 0],
  [4, 2, 0, 0, 0, 0, 0, 0, 0],
  [4, 3, 0, 0, 0, 0, 0, 0, 0],
  [4, 3, 0, 0, 0, 0, 0, 0, 0],
  [4, 3, 2, 0, 0, 0, 0, 0, 0],
  [4, 3, 2, 0, 0, 0, 0, 0, 0],
  [4, 3, 3, 0, 0, 0, 0, 0, 0],
  [4, 3, 3, 0, 0, 0, 0, 0, 0],
  [4, 3, 3, 1, 0, 0, 0, 0, 0],
  [4, 3, 3, 1, 0, 0, 0, 0, 0],
  [4, 3, 3, 2, 0, 0, 0, 0, 0],
  [4, 3, 3, 2, 0, 0, 0, 0, 0],
  [4, 3, 3, 3, 1, 0, 0, 0, 0],
  [4, 3, 3, 3, 1, 0, 0, 0, 0],
  [4, 3, 3, 3, 2, 0, 0, 0, 0],
  [4, 3, 3, 3, 2, 0, 0, 0, 0],
];

// Pact magic: every slot is cast at the current pact slot level.
static PACT_CASTER_SLOTS: SlotTable = [
  [1, 0, 0, 0, 0, 0, 0, 0, 0],
  [2, 0, 0, 0, 0, 0, 0, 0, 0],
  [0, 2, 0, 0, 0, 0, 0, 0, 0],
  [0, 2, 0, 0, 0, 0, 0, 0, 0],
  [0, 0, 2, 0, 0, 0, 0, 0, 0],
  [0, 0, 2, 0, 0, 0, 0, 0, 0],
  [0, 0, 0, 2, 0, 0, 0, 0, 0],
  [0, 0, 0, 2, 0, 0, 0, 0, 0],
  [0, 0, 0, 0, 2, 0, 0, 0, 0],
  [0, 0, 0, 0, 2, 0, 0, 0, 0],
  [0, 0, 0, 0, 3, 0, 0, 0, 0],
  [0, 0, 0, 0, 3, 0, 0, 0, 0],
  [0, 0, 0, 0, 3, 0, 0, 0, 0],
  [0, 0, 0, 0, 3, 0, 0, 0, 0],
  [0, 0, 0, 0, 3, 0, 0, 0, 0],
  [0, 0, 0, 0, 3, 0, 0, 0, 0],
  [0, 0, 0, 0, 4, 0, 0, 0, 0],
  [0, 0, 0, 0, 4, 0, 0, 0, 0],
  [0, 0, 0, 0, 4, 0, 0, 0, 0],
  [0, 0, 0, 0, 4, 0, 0, 0, 0],
];

/// Spell slots for an archetype at a character level. Empty for non-casters
/// and for levels outside 1–20.
pub fn spell_slots_for(archetype: CasterArchetype, level: i32) -> SpellSlots {
  let table = match archetype {
    CasterArchetype::Full | CasterArchetype::Known => &FULL_CASTER_SLOTS,
    CasterArchetype::Half => &HALF_CASTER_SLOTS,
    CasterArchetype::Pact => &PACT_CASTER_SLOTS,
    CasterArchetype::None => return SpellSlots::new(),
  };
  if !(1..=i32::from(MAX_CHARACTER_LEVEL)).contains(&level) {
    return SpellSlots::new();
  }

  table[(level - 1) as usize]
    .iter()
    .zip(1..=MAX_SLOT_LEVEL)
    .filter(|(count, _)| **count > 0)
    .map(|(count, slot_level)| (slot_level, *count))
    .collect()
}

// ─── Cantrips ────────────────────────────────────────────────────────────────

// Index 0 is unused so the character level indexes directly.
static CANTRIPS_KNOWN: &[(&str, [u8; 21])] = &[
  ("bard", [0, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4]),
  ("cleric", [0, 3, 3, 3, 4, 4, 4, 4, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5]),
  ("druid", [0, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4]),
  ("sorcerer", [0, 4, 4, 4, 5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6]),
  ("warlock", [0, 2, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4]),
  ("wizard", [0, 3, 3, 3, 4, 4, 4, 4, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5]),
];

/// Number of cantrips known by a class at a level. Levels past the end of the
/// table use the last entry; classes without cantrips return 0.
pub fn cantrips_known_for(class: &str, level: i32) -> u32 {
  let class = class.trim();
  let Some((_, row)) = CANTRIPS_KNOWN
    .iter()
    .find(|(name, _)| name.eq_ignore_ascii_case(class))
  else {
    return 0;
  };
  if level < 1 {
    return 0;
  }
  let index = (level as usize).min(row.len() - 1);
  u32::from(row[index])
}

#[cfg(test)]
mod tests {
  use super::*;

  fn slots(pairs: &[(u8, u8)]) -> SpellSlots { pairs.iter().copied().collect() }

  #[test]
  fn archetype_lookup_is_case_insensitive() {
    assert_eq!(caster_archetype_for("Wizard"), CasterArchetype::Full);
    assert_eq!(caster_archetype_for("CLERIC"), CasterArchetype::Full);
    assert_eq!(caster_archetype_for("druid"), CasterArchetype::Full);
    assert_eq!(caster_archetype_for("bard"), CasterArchetype::Known);
    assert_eq!(caster_archetype_for("Sorcerer"), CasterArchetype::Known);
    assert_eq!(caster_archetype_for("paladin"), CasterArchetype::Half);
    assert_eq!(caster_archetype_for("ranger"), CasterArchetype::Half);
    assert_eq!(caster_archetype_for("Warlock"), CasterArchetype::Pact);
    assert_eq!(caster_archetype_for("fighter"), CasterArchetype::None);
    assert_eq!(caster_archetype_for(""), CasterArchetype::None);
  }

  #[test]
  fn full_caster_slots() {
    assert_eq!(spell_slots_for(CasterArchetype::Full, 1), slots(&[(1, 2)]));
    assert_eq!(
      spell_slots_for(CasterArchetype::Full, 3),
      slots(&[(1, 4), (2, 2)])
    );
    assert_eq!(
      spell_slots_for(CasterArchetype::Full, 20),
      slots(&[
        (1, 4),
        (2, 3),
        (3, 3),
        (4, 3),
        (5, 3),
        (6, 2),
        (7, 2),
        (8, 1),
        (9, 1),
      ])
    );
  }

  #[test]
  fn known_casters_use_full_progression() {
    for level in 1..=20 {
      assert_eq!(
        spell_slots_for(CasterArchetype::Known, level),
        spell_slots_for(CasterArchetype::Full, level)
      );
    }
  }

  #[test]
  fn half_caster_slots_start_at_level_two() {
    assert!(spell_slots_for(CasterArchetype::Half, 1).is_empty());
    assert_eq!(spell_slots_for(CasterArchetype::Half, 2), slots(&[(1, 2)]));
    assert_eq!(
      spell_slots_for(CasterArchetype::Half, 17),
      slots(&[(1, 4), (2, 3), (3, 3), (4, 3), (5, 1)])
    );
  }

  #[test]
  fn pact_slots_sit_at_a_single_level() {
    assert_eq!(spell_slots_for(CasterArchetype::Pact, 1), slots(&[(1, 1)]));
    assert_eq!(spell_slots_for(CasterArchetype::Pact, 3), slots(&[(2, 2)]));
    assert_eq!(spell_slots_for(CasterArchetype::Pact, 11), slots(&[(5, 3)]));
    assert_eq!(spell_slots_for(CasterArchetype::Pact, 20), slots(&[(5, 4)]));
  }

  #[test]
  fn out_of_range_and_non_casters_are_empty() {
    assert!(spell_slots_for(CasterArchetype::Full, 0).is_empty());
    assert!(spell_slots_for(CasterArchetype::Full, 21).is_empty());
    assert!(spell_slots_for(CasterArchetype::None, 5).is_empty());
  }

  #[test]
  fn slot_counts_never_decrease_for_full_and_half() {
    for archetype in [CasterArchetype::Full, CasterArchetype::Half] {
      for level in 1..20 {
        let now = spell_slots_for(archetype, level);
        let next = spell_slots_for(archetype, level + 1);
        for (slot_level, count) in &now {
          assert!(
            next.get(slot_level).copied().unwrap_or(0) >= *count,
            "{archetype} level {level} slot {slot_level}"
          );
        }
      }
    }
  }

  #[test]
  fn cantrip_counts() {
    assert_eq!(cantrips_known_for("Wizard", 1), 3);
    assert_eq!(cantrips_known_for("wizard", 4), 4);
    assert_eq!(cantrips_known_for("sorcerer", 10), 6);
    assert_eq!(cantrips_known_for("bard", 3), 2);
    assert_eq!(cantrips_known_for("cleric", 25), 5);
    assert_eq!(cantrips_known_for("paladin", 5), 0);
    assert_eq!(cantrips_known_for("wizard", 0), 0);
  }
}
