//! Reference data copied by value into characters: backgrounds, classes, and
//! the spell list.

use serde::{Deserialize, Serialize};

use crate::enrich::lookup_key;

/// A character background and the skills it grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
  pub name:                String,
  pub skill_proficiencies: Vec<String>,
}

/// A character class and the skills it can choose from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassInfo {
  pub name:                String,
  pub skill_proficiencies: Vec<String>,
  /// How many of `skill_proficiencies` the class grants.
  pub skill_count:         usize,
}

/// One entry of the spell list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
  /// API lookup key, e.g. `"magic-missile"`.
  pub index:   String,
  pub name:    String,
  /// 0 for cantrips.
  pub level:   u8,
  pub classes: Vec<String>,
}

impl Spell {
  pub fn new(name: &str, level: u8, classes: &[&str]) -> Self {
    Self {
      index: lookup_key(name),
      name: name.to_owned(),
      level,
      classes: classes.iter().map(|c| (*c).to_owned()).collect(),
    }
  }

  pub fn is_available_to(&self, class: &str) -> bool {
    let class = class.trim();
    self.classes.iter().any(|c| c.trim().eq_ignore_ascii_case(class))
  }
}

/// Merge skill proficiencies for a new character.
///
/// Takes the first `skill_count` class skills, then the player's picks, then
/// background skills, then racial skills. Entries are trimmed and lowercased;
/// blanks are dropped; duplicates are kept. The result is sorted.
pub fn combine_skill_proficiencies(
  racial: &[String],
  background: &Background,
  class: &ClassInfo,
  user: &[String],
) -> Vec<String> {
  let clean = |s: &String| {
    let s = s.trim().to_lowercase();
    (!s.is_empty()).then_some(s)
  };

  let mut combined: Vec<String> = class
    .skill_proficiencies
    .iter()
    .filter_map(clean)
    .take(class.skill_count)
    .collect();
  combined.extend(user.iter().filter_map(clean));
  combined.extend(background.skill_proficiencies.iter().filter_map(clean));
  combined.extend(racial.iter().filter_map(clean));

  combined.sort();
  combined
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
  }

  #[test]
  fn combines_all_sources_and_sorts() {
    let background = Background {
      name:                "acolyte".into(),
      skill_proficiencies: strings(&["insight", "religion"]),
    };
    let class = ClassInfo {
      name:                "rogue".into(),
      skill_proficiencies: strings(&[
        "acrobatics",
        "athletics",
        "deception",
        "insight",
      ]),
      skill_count:         2,
    };

    let got = combine_skill_proficiencies(
      &strings(&["history"]),
      &background,
      &class,
      &strings(&["athletics"]),
    );

    assert_eq!(got, strings(&[
      "acrobatics",
      "athletics",
      "athletics",
      "history",
      "insight",
      "religion",
    ]));
  }

  #[test]
  fn blank_and_padded_entries_are_cleaned() {
    let got = combine_skill_proficiencies(
      &[],
      &Background::default(),
      &ClassInfo::default(),
      &strings(&["", "  Perception ", " "]),
    );
    assert_eq!(got, strings(&["perception"]));
  }

  #[test]
  fn spell_availability_is_case_insensitive() {
    let spell = Spell::new("Magic Missile", 1, &["Sorcerer", "Wizard"]);
    assert_eq!(spell.index, "magic-missile");
    assert!(spell.is_available_to("wizard"));
    assert!(!spell.is_available_to("cleric"));
  }
}
