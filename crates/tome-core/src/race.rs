//! Racial ability score increases and racial skill proficiencies.

use crate::ability::{Ability, AbilityScores};

use Ability::*;

// Keys are lowercase with hyphens folded to spaces.
static RACIAL_BONUSES: &[(&[&str], &[(Ability, i32)])] = &[
  (&["dwarf"], &[(Constitution, 2)]),
  (&["hill dwarf"], &[(Constitution, 2), (Wisdom, 1)]),
  (&["elf"], &[(Dexterity, 2)]),
  (&["high elf"], &[(Dexterity, 2), (Intelligence, 1)]),
  (&["halfling"], &[(Dexterity, 2)]),
  (&["lightfoot halfling", "lightfoot"], &[(Dexterity, 2), (Charisma, 1)]),
  (&["human"], &[
    (Strength, 1),
    (Dexterity, 1),
    (Constitution, 1),
    (Intelligence, 1),
    (Wisdom, 1),
    (Charisma, 1),
  ]),
  (&["dragonborn"], &[(Strength, 2), (Charisma, 1)]),
  (&["gnome"], &[(Intelligence, 2)]),
  (&["rock gnome"], &[(Intelligence, 2), (Constitution, 1)]),
  (&["half elf"], &[(Charisma, 2), (Dexterity, 1), (Constitution, 1)]),
  (&["half orc"], &[(Strength, 2), (Constitution, 1)]),
  (&["tiefling"], &[(Intelligence, 1), (Charisma, 2)]),
];

// SRD traits simplified to plain proficiencies: Stonecunning, Keen Senses,
// Menacing.
static RACIAL_SKILLS: &[(&[&str], &str)] = &[
  (&["dwarf", "hill dwarf", "mountain dwarf"], "history"),
  (&["elf", "high elf", "wood elf", "dark elf", "drow"], "perception"),
  (&["half orc"], "intimidation"),
];

/// Lowercase, trim, and treat hyphens as spaces so "Half-Orc" and "half orc"
/// match.
pub fn normalize_race(race: &str) -> String {
  race.trim().to_lowercase().replace('-', " ")
}

/// The ability score increases granted by a race. Unknown races grant none.
pub fn racial_bonuses(race: &str) -> &'static [(Ability, i32)] {
  let race = normalize_race(race);
  RACIAL_BONUSES
    .iter()
    .find(|(names, _)| names.contains(&race.as_str()))
    .map(|(_, bonuses)| *bonuses)
    .unwrap_or(&[])
}

/// Add the race's ability score increases to `scores`.
pub fn apply_racial_bonuses(race: &str, scores: &mut AbilityScores) {
  for (ability, bonus) in racial_bonuses(race) {
    *scores.get_mut(*ability) += bonus;
  }
}

/// Skill proficiencies granted by race, from the local table.
pub fn racial_skill_proficiencies(race: &str) -> Vec<String> {
  let race = normalize_race(race);
  RACIAL_SKILLS
    .iter()
    .filter(|(names, _)| names.contains(&race.as_str()))
    .map(|(_, skill)| (*skill).to_owned())
    .collect()
}
