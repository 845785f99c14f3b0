//! Error types for `tome-core`.

use thiserror::Error;

use crate::{
  character::EquipSlot,
  rules::CasterArchetype,
  spellcasting::SpellAction,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("character '{0}' not found")]
  CharacterNotFound(String),

  #[error("spell '{spell}' not found for class {class}")]
  SpellNotFound { spell: String, class: String },

  #[error("background {0:?} not found")]
  BackgroundNotFound(String),

  #[error("class {0:?} not found")]
  ClassNotFound(String),

  #[error("{}", wrong_caster_message(.archetype, .action))]
  WrongCasterType {
    archetype: CasterArchetype,
    action:    SpellAction,
  },

  #[error("{0} is already known")]
  AlreadyKnown(String),

  #[error("{0} is already prepared")]
  AlreadyPrepared(String),

  #[error(
    "{spell} is level {spell_level}, above the highest available slot \
     (level {highest_slot})"
  )]
  SlotTooHigh {
    spell:        String,
    spell_level:  u8,
    highest_slot: u8,
  },

  #[error("{0} already occupied")]
  SlotOccupied(EquipSlot),

  #[error("invalid character: {0}")]
  InvalidCharacter(String),

  /// A reference lookup could not be served. Always recoverable; callers fall
  /// back to local data.
  #[error("enrichment unavailable: {0}")]
  EnrichmentUnavailable(String),
}

fn wrong_caster_message(
  archetype: &CasterArchetype,
  action: &SpellAction,
) -> &'static str {
  match (archetype.can_cast(), action) {
    (false, _) => "this class can't cast spells",
    (true, SpellAction::Learn) => "this class prepares spells and can't learn them",
    (true, SpellAction::Prepare) => "this class learns spells and can't prepare them",
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
