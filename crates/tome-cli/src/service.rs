//! The character service: the use cases behind each subcommand.
//!
//! Loads characters from the repository, runs the rules engine, consults the
//! enricher where it can add canonical data, and saves the result. Enrichment
//! failures are logged and the local tables are used instead.

use anyhow::{Context as _, Result};
use tome_core::{
  ability::AbilityScores,
  character::{Character, EquipSlot},
  derived::{ResolvedArmor, recalculate_derived},
  enrich::Enricher,
  race::{apply_racial_bonuses, racial_skill_proficiencies},
  reference::{Background, ClassInfo, Spell, combine_skill_proficiencies},
  spellcasting::SpellAction,
  store::{
    BackgroundRepository, CharacterRepository, ClassRepository,
    SpellRepository,
  },
};
use tome_store_json::{
  CsvSpellRepository, JsonBackgroundRepository, JsonClassRepository,
};
use tracing::{debug, warn};

pub const DEFAULT_BACKGROUND: &str = "acolyte";

/// Input for [`CharacterService::create`].
#[derive(Debug, Clone)]
pub struct NewCharacter {
  pub name:       String,
  pub race:       String,
  pub class:      String,
  pub level:      i32,
  /// Scores before racial bonuses.
  pub scores:     AbilityScores,
  pub background: String,
  pub skills:     Vec<String>,
  pub main_hand:  Option<String>,
  pub off_hand:   Option<String>,
  pub armor:      Option<String>,
  pub shield:     Option<String>,
}

/// Reference data files.
#[derive(Debug, Clone)]
pub struct ReferenceData {
  pub backgrounds: JsonBackgroundRepository,
  pub classes:     JsonClassRepository,
  pub spells:      CsvSpellRepository,
}

pub struct CharacterService<R, E> {
  repo:                R,
  enricher:            E,
  reference:           ReferenceData,
  requests_per_second: u32,
}

impl<R, E> CharacterService<R, E>
where
  R: CharacterRepository,
  E: Enricher,
{
  pub fn new(
    repo: R,
    enricher: E,
    reference: ReferenceData,
    requests_per_second: u32,
  ) -> Self {
    Self { repo, enricher, reference, requests_per_second }
  }

  // ── Lifecycle ─────────────────────────────────────────────────────────────

  pub async fn create(&self, input: NewCharacter) -> Result<Character> {
    let mut character =
      Character::new(input.name, &input.race, &input.class, input.level)?;

    let background = self.background(&input.background)?;
    let class = self.class(&character.class)?;
    let racial = self.racial_skills(&character.race).await;

    character.abilities = input.scores;
    apply_racial_bonuses(&character.race, &mut character.abilities);
    character.skill_proficiencies =
      combine_skill_proficiencies(&racial, &background, &class, &input.skills);
    character.background = background.name;

    let equipment = [
      (EquipSlot::MainHand, input.main_hand),
      (EquipSlot::OffHand, input.off_hand),
      (EquipSlot::Armor, input.armor),
      (EquipSlot::Shield, input.shield),
    ];
    for (slot, item) in equipment {
      if let Some(item) = item.filter(|i| !i.trim().is_empty()) {
        character.equip(slot, &item)?;
      }
    }

    if character.is_caster() {
      character.assign_spellcasting();
    }
    self.recalculate(&mut character).await;
    self.save(&character).await?;
    Ok(character)
  }

  /// Load a character with derived stats and spell slots brought up to date.
  /// Nothing is written back.
  pub async fn view(&self, name: &str) -> Result<Character> {
    let mut character = self.repo.get_by_id(name).await?;
    if character.is_caster() {
      character.assign_spellcasting();
    }
    self.recalculate(&mut character).await;
    Ok(character)
  }

  pub async fn list(&self) -> Result<Vec<Character>> {
    self.repo.get_all().await.context("listing characters")
  }

  pub async fn delete(&self, name: &str) -> Result<()> {
    self.repo.delete(name).await?;
    Ok(())
  }

  // ── Equipment ─────────────────────────────────────────────────────────────

  /// Equip a weapon into a hand slot. The slot must be empty.
  pub async fn equip_weapon(
    &self,
    name: &str,
    weapon: &str,
    slot: EquipSlot,
  ) -> Result<()> {
    let mut character = self.repo.get_by_id(name).await?;
    character.equip(slot, weapon)?;

    match self.enricher.get_weapon(weapon).await {
      Ok(info) => debug!(
        weapon = %info.name,
        category = %info.category,
        range = info.range,
        two_handed = info.two_handed,
        "weapon details"
      ),
      Err(e) => warn!(weapon, error = %e, "weapon lookup unavailable"),
    }

    self.recalculate(&mut character).await;
    self.save(&character).await
  }

  /// Equip body armor or a shield. The slot must be empty.
  pub async fn equip_armor(
    &self,
    name: &str,
    item: &str,
    slot: EquipSlot,
  ) -> Result<()> {
    let mut character = self.repo.get_by_id(name).await?;
    character.equip(slot, item)?;
    self.recalculate(&mut character).await;
    self.save(&character).await
  }

  // ── Spells ────────────────────────────────────────────────────────────────

  /// Learn a spell from the class list. Returns the spell as listed.
  pub async fn learn_spell(&self, name: &str, spell: &str) -> Result<Spell> {
    self.spell_action(name, spell, SpellAction::Learn).await
  }

  /// Prepare a spell from the class list. Returns the spell as listed.
  pub async fn prepare_spell(&self, name: &str, spell: &str) -> Result<Spell> {
    self.spell_action(name, spell, SpellAction::Prepare).await
  }

  async fn spell_action(
    &self,
    name: &str,
    spell: &str,
    action: SpellAction,
  ) -> Result<Spell> {
    let mut character = self.repo.get_by_id(name).await?;

    // Reject the wrong archetype before touching the spell list.
    let archetype = character.assign_spellcasting().archetype;
    let allowed = match action {
      SpellAction::Learn => archetype.learns_spells(),
      SpellAction::Prepare => archetype.prepares_spells(),
    };
    if !allowed {
      return Err(
        tome_core::Error::WrongCasterType { archetype, action }.into(),
      );
    }

    let listed = self
      .reference
      .spells
      .find_for_class(spell, &character.class)
      .map_err(unwrap_core)?;

    match self.enricher.get_spell(&listed.name).await {
      Ok(info) => debug!(
        spell = %info.name,
        school = %info.school,
        range = %info.range,
        "spell details"
      ),
      Err(e) => {
        warn!(spell = %listed.name, error = %e, "spell lookup unavailable");
      }
    }

    match action {
      SpellAction::Learn => character.learn_spell(&listed.name)?,
      SpellAction::Prepare => {
        character.prepare_spell(&listed.name, listed.level)?
      }
    }

    self.recalculate(&mut character).await;
    self.save(&character).await?;
    Ok(listed)
  }

  // ── Helpers ───────────────────────────────────────────────────────────────

  async fn save(&self, character: &Character) -> Result<()> {
    self
      .repo
      .save(character)
      .await
      .with_context(|| format!("saving character {}", character.name))
  }

  /// Recompute derived stats, resolving worn armor and shield through the
  /// enricher with the local SRD table underneath.
  async fn recalculate(&self, character: &mut Character) {
    let equipment = &character.equipment;
    let worn: Vec<String> = [&equipment.armor, &equipment.shield]
      .into_iter()
      .flatten()
      .cloned()
      .collect();

    let enriched = if worn.is_empty() {
      Default::default()
    } else {
      self
        .enricher
        .get_armors_batch(&worn, self.requests_per_second)
        .await
    };
    if enriched.len() < worn.len() {
      debug!(
        requested = worn.len(),
        resolved = enriched.len(),
        "using local armor table"
      );
    }
    recalculate_derived(character, &ResolvedArmor::new(enriched));
  }

  async fn racial_skills(&self, race: &str) -> Vec<String> {
    match self.enricher.get_racial_skill_proficiencies(race).await {
      Ok(skills) => skills,
      Err(e) => {
        warn!(race, error = %e, "racial skill lookup unavailable");
        racial_skill_proficiencies(race)
      }
    }
  }

  fn background(&self, name: &str) -> Result<Background> {
    let name = match name.trim() {
      "" => DEFAULT_BACKGROUND,
      name => name,
    };
    match self.reference.backgrounds.find_by_name(name) {
      Ok(background) => Ok(background),
      Err(tome_store_json::Error::Io { path, source }) => {
        warn!(path = %path.display(), error = %source, "no background data");
        Ok(Background {
          name:                name.to_lowercase(),
          skill_proficiencies: Vec::new(),
        })
      }
      Err(e) => Err(unwrap_core(e)),
    }
  }

  fn class(&self, name: &str) -> Result<ClassInfo> {
    match self.reference.classes.find_by_name(name) {
      Ok(class) => Ok(class),
      Err(tome_store_json::Error::Io { path, source }) => {
        warn!(path = %path.display(), error = %source, "no class data");
        Ok(ClassInfo {
          name: name.to_owned(),
          ..ClassInfo::default()
        })
      }
      Err(e) => Err(unwrap_core(e)),
    }
  }
}

/// Surface domain errors from the reference repositories unwrapped, so they
/// read the same as rule errors.
fn unwrap_core(e: tome_store_json::Error) -> anyhow::Error {
  match e {
    tome_store_json::Error::Core(core) => core.into(),
    other => anyhow::Error::new(other).context("reading reference data"),
  }
}
