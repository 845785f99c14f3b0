//! The on-disk shape of the character file: `{ "characters": [ ... ] }`.

use serde::{Deserialize, Serialize};
use tome_core::character::Character;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterDocument {
  pub characters: Vec<Character>,
}

impl CharacterDocument {
  /// Parse a document. Blank input is an empty document.
  pub fn parse(bytes: &[u8]) -> serde_json::Result<Self> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
      return Ok(Self::default());
    }
    serde_json::from_slice(bytes)
  }

  pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(self)?;
    bytes.push(b'\n');
    Ok(bytes)
  }

  pub fn find(&self, name: &str) -> Option<&Character> {
    self.characters.iter().find(|c| c.name == name)
  }

  /// Replace the character with the same name in place, or append it.
  pub fn upsert(&mut self, character: Character) {
    match self.characters.iter_mut().find(|c| c.name == character.name) {
      Some(existing) => *existing = character,
      None => self.characters.push(character),
    }
  }

  /// Remove by exact name. Returns whether anything was removed.
  pub fn remove(&mut self, name: &str) -> bool {
    let before = self.characters.len();
    self.characters.retain(|c| c.name != name);
    self.characters.len() != before
  }
}
