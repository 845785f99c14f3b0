//! Plain-text rendering of character sheets and listings.

use std::fmt::Write as _;

use strum::IntoEnumIterator;
use tome_core::{
  ability::Ability,
  character::Character,
  derived::spellcasting_stats,
};

/// The full sheet printed by `tome view`.
pub fn sheet(c: &Character) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "Name: {}", c.name);
  let _ = writeln!(out, "Class: {}", c.class.to_lowercase());
  let _ = writeln!(out, "Race: {}", c.race.to_lowercase());
  let _ = writeln!(out, "Background: {}", c.background);
  let _ = writeln!(out, "Level: {}", c.level);

  out.push_str("Ability scores:\n");
  for ability in Ability::iter() {
    let _ = writeln!(
      out,
      "  {}: {} ({:+})",
      ability.abbreviation(),
      c.abilities.get(ability),
      c.modifiers.get(ability),
    );
  }
  let _ = writeln!(out, "Proficiency bonus: {:+}", c.proficiency_bonus);
  let _ = writeln!(
    out,
    "Skill proficiencies: {}",
    c.skill_proficiencies.join(", ")
  );

  let equipment = [
    ("Main hand", &c.equipment.main_hand),
    ("Off hand", &c.equipment.off_hand),
    ("Armor", &c.equipment.armor),
    ("Shield", &c.equipment.shield),
  ];
  for (label, item) in equipment {
    if let Some(item) = item {
      let _ = writeln!(out, "{label}: {item}");
    }
  }

  if let Some(state) = c.spellcasting.as_ref().filter(|_| c.is_caster()) {
    out.push_str(&state.format_spell_slots(&c.class, c.level));
    out.push_str(&state.format_cantrips());
    if !state.known_spells.is_empty() {
      let _ = writeln!(out, "Known spells: {}", state.known_spells.join(", "));
    }
    if !state.prepared_spells.is_empty() {
      let _ = writeln!(
        out,
        "Prepared spells: {}",
        state.prepared_spells.join(", ")
      );
    }

    let stats = spellcasting_stats(c);
    let _ = writeln!(out, "Spellcasting ability: {}", stats.ability);
    let _ = writeln!(out, "Spell save DC: {}", stats.save_dc);
    let _ = writeln!(out, "Spell attack bonus: {:+}", stats.attack_bonus);
  }

  let _ = writeln!(out, "Armor class: {}", c.armor_class);
  let _ = writeln!(out, "Initiative bonus: {}", c.initiative);
  let _ = writeln!(out, "Passive perception: {}", c.passive_perception);
  out
}

/// The listing printed by `tome list`.
pub fn list(characters: &[Character]) -> String {
  if characters.is_empty() {
    return "No characters found.\n".to_owned();
  }

  let mut out = String::from("Characters:\n");
  for c in characters {
    let _ = writeln!(
      out,
      "  {} - Level {} {} {}",
      c.name, c.level, c.race, c.class
    );
  }
  out
}
