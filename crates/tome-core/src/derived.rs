//! Derived-stats calculator: modifiers, initiative, passive perception, armor
//! class, and spellcasting numbers.
//!
//! Everything here is synchronous. Enriched armor data reaches the calculator
//! through an [`ArmorLookup`] the caller builds beforehand, usually a
//! [`ResolvedArmor`] over the results of a batch fetch.

use std::collections::HashMap;

use crate::{
  ability::{Ability, AbilityModifiers, proficiency_bonus},
  character::Character,
  enrich::{ArmorInfo, lookup_key},
};

/// AC granted by a shield unless its own data says more.
pub const SHIELD_BONUS: i32 = 2;

// ─── Armor lookup ────────────────────────────────────────────────────────────

/// Synchronous armor data source. A miss is not an error; the calculator
/// treats unknown armor as no armor.
pub trait ArmorLookup {
  fn armor(&self, name: &str) -> Option<ArmorInfo>;
}

// (key, display name, base AC, adds dexterity)
static SRD_ARMOR: &[(&str, &str, i32, bool)] = &[
  ("padded", "Padded", 11, true),
  ("leather", "Leather", 11, true),
  ("studded-leather", "Studded Leather", 12, true),
  ("hide", "Hide", 12, true),
  ("chain-shirt", "Chain Shirt", 13, true),
  ("scale-mail", "Scale Mail", 14, true),
  ("breastplate", "Breastplate", 14, true),
  ("half-plate", "Half Plate", 15, true),
  ("ring-mail", "Ring Mail", 14, false),
  ("chain-mail", "Chain Mail", 16, false),
  ("splint", "Splint", 17, false),
  ("plate", "Plate", 18, false),
  ("shield", "Shield", 2, false),
];

/// The SRD armor table compiled in. Used when enrichment is off or failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrdArmorTable;

impl ArmorLookup for SrdArmorTable {
  fn armor(&self, name: &str) -> Option<ArmorInfo> {
    let key = lookup_key(name);
    SRD_ARMOR
      .iter()
      .find(|(k, ..)| *k == key)
      .map(|(_, name, base_ac, dex_bonus)| ArmorInfo {
        name:      (*name).to_owned(),
        base_ac:   *base_ac,
        dex_bonus: *dex_bonus,
      })
  }
}

/// Enriched armor keyed by lookup key, falling back to [`SrdArmorTable`].
#[derive(Debug, Clone, Default)]
pub struct ResolvedArmor {
  enriched: HashMap<String, ArmorInfo>,
}

impl ResolvedArmor {
  /// Build from a batch result keyed by the names that were requested.
  pub fn new(enriched: HashMap<String, ArmorInfo>) -> Self {
    let enriched = enriched
      .into_iter()
      .map(|(name, info)| (lookup_key(&name), info))
      .collect();
    Self { enriched }
  }
}

impl ArmorLookup for ResolvedArmor {
  fn armor(&self, name: &str) -> Option<ArmorInfo> {
    self
      .enriched
      .get(&lookup_key(name))
      .cloned()
      .or_else(|| SrdArmorTable.armor(name))
  }
}

// ─── Spellcasting stats ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellcastingStats {
  pub ability:      Ability,
  pub ability_mod:  i32,
  pub save_dc:      i32,
  pub attack_bonus: i32,
}

/// The ability a class casts with. Unknown classes use intelligence.
pub fn spellcasting_ability(class: &str) -> Ability {
  match class.trim().to_lowercase().as_str() {
    "cleric" | "druid" | "ranger" => Ability::Wisdom,
    "bard" | "sorcerer" | "warlock" | "paladin" => Ability::Charisma,
    _ => Ability::Intelligence,
  }
}

pub fn spellcasting_stats(character: &Character) -> SpellcastingStats {
  let ability = spellcasting_ability(&character.class);
  let ability_mod = character.abilities.modifier(ability);
  let prof = proficiency_bonus(character.level);
  SpellcastingStats {
    ability,
    ability_mod,
    save_dc: 8 + prof + ability_mod,
    attack_bonus: prof + ability_mod,
  }
}

// ─── Calculator ──────────────────────────────────────────────────────────────

/// Recompute every derived field of `character` from its scores, class,
/// skills, and equipment.
pub fn recalculate_derived(character: &mut Character, armor: &impl ArmorLookup) {
  character.modifiers = AbilityModifiers::from_scores(&character.abilities);
  character.proficiency_bonus = proficiency_bonus(character.level);
  character.initiative = character.modifiers.dexterity;
  character.passive_perception = passive_perception(character);
  character.armor_class = armor_class(character, armor);
  character.spell_attack_bonus = spellcasting_stats(character).attack_bonus;
}

fn passive_perception(character: &Character) -> i32 {
  let mut passive = 10 + character.modifiers.wisdom;
  if character.has_skill("perception") {
    passive += character.proficiency_bonus;
  }
  passive
}

fn armor_class(character: &Character, lookup: &impl ArmorLookup) -> i32 {
  let mods = &character.modifiers;
  let equipment = &character.equipment;
  let class = character.class.trim().to_lowercase();

  if equipment.armor.is_none() {
    if class == "barbarian" {
      let shield = if equipment.shield.is_some() { SHIELD_BONUS } else { 0 };
      return 10 + mods.dexterity + mods.constitution + shield;
    }
    if class == "monk" && equipment.shield.is_none() {
      return 10 + mods.dexterity + mods.wisdom;
    }
  }

  let base = match equipment.armor.as_deref().and_then(|a| lookup.armor(a)) {
    Some(info) if info.dex_bonus => info.base_ac + mods.dexterity,
    Some(info) => info.base_ac,
    None => 10 + mods.dexterity,
  };
  base + shield_bonus(equipment.shield.as_deref(), lookup)
}

fn shield_bonus(shield: Option<&str>, lookup: &impl ArmorLookup) -> i32 {
  let Some(shield) = shield else { return 0 };
  match lookup.armor(shield) {
    Some(info) if info.base_ac > SHIELD_BONUS => info.base_ac,
    _ => SHIELD_BONUS,
  }
}
