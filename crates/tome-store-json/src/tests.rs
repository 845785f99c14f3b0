//! Tests for the JSON character store and the reference repositories, run
//! against files in a temporary directory.

use std::path::PathBuf;

use tempfile::TempDir;
use tome_core::{
  character::{Character, EquipSlot},
  rules::CasterArchetype,
  store::{
    BackgroundRepository, CharacterRepository, ClassRepository,
    SpellRepository,
  },
};

use crate::{
  CsvSpellRepository, Error, JsonBackgroundRepository, JsonClassRepository,
  JsonFileStore,
};

fn store() -> (TempDir, JsonFileStore) {
  let dir = tempfile::tempdir().expect("temp dir");
  let store = JsonFileStore::open(dir.path().join("characters.json"));
  (dir, store)
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
  let path = dir.path().join(name);
  std::fs::write(&path, contents).expect("write fixture");
  path
}

fn wizard(name: &str) -> Character {
  Character::new(name, "high elf", "wizard", 3).unwrap()
}

// ─── Characters ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_file_is_empty() {
  let (_dir, s) = store();
  assert!(s.get_all().await.unwrap().is_empty());
  assert!(!s.path().exists());
}

#[tokio::test]
async fn save_and_get_round_trip_with_spellcasting() {
  let (_dir, s) = store();
  let mut c = wizard("Gale");
  c.abilities.intelligence = 17;
  c.equip(EquipSlot::MainHand, "Quarterstaff").unwrap();
  c.prepare_spell("magic missile", 1).unwrap();

  s.save(&c).await.unwrap();
  let fetched = s.get_by_id("Gale").await.unwrap();
  assert_eq!(fetched, c);

  let state = fetched.spellcasting.expect("spellcasting persisted");
  assert_eq!(state.archetype, CasterArchetype::Full);
  assert_eq!(state.prepared_spells, vec!["magic missile".to_string()]);
  assert_eq!(state.slots.get(&2), Some(&2));
}

#[tokio::test]
async fn known_spells_round_trip() {
  let (_dir, s) = store();
  let mut c = Character::new("Tasha", "tiefling", "warlock", 5).unwrap();
  c.learn_spell("hex").unwrap();
  c.learn_spell("misty step").unwrap();

  s.save(&c).await.unwrap();
  let fetched = s.get_by_id("Tasha").await.unwrap();
  assert_eq!(fetched, c);

  let state = fetched.spellcasting.expect("spellcasting persisted");
  assert_eq!(state.archetype, CasterArchetype::Pact);
  assert_eq!(state.known_spells, vec!["hex", "misty step"]);
  assert!(state.prepared_spells.is_empty());
  assert_eq!(state.slots.get(&3), Some(&2));
}

#[tokio::test]
async fn saving_same_name_overwrites() {
  let (_dir, s) = store();
  s.save(&wizard("Gale")).await.unwrap();
  s.save(&wizard("Astarion")).await.unwrap();

  let mut updated = wizard("Gale");
  updated.level = 5;
  s.save(&updated).await.unwrap();

  let all = s.get_all().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].name, "Gale");
  assert_eq!(all[0].level, 5);
  assert_eq!(all[1].name, "Astarion");
}

#[tokio::test]
async fn save_rejects_invalid_character() {
  let (_dir, s) = store();
  let mut c = wizard("Gale");
  c.level = 0;
  let err = s.save(&c).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(tome_core::Error::InvalidCharacter(_))
  ));
  assert!(!s.path().exists());
}

#[tokio::test]
async fn get_missing_character_is_not_found() {
  let (_dir, s) = store();
  s.save(&wizard("Gale")).await.unwrap();
  let err = s.get_by_id("gale").await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(tome_core::Error::CharacterNotFound(ref n)) if n == "gale"
  ));
  assert_eq!(err.to_string(), "character 'gale' not found");
}

#[tokio::test]
async fn delete_removes_and_reports_missing() {
  let (_dir, s) = store();
  s.save(&wizard("Gale")).await.unwrap();
  s.delete("Gale").await.unwrap();
  assert!(s.get_all().await.unwrap().is_empty());

  let err = s.delete("Gale").await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(tome_core::Error::CharacterNotFound(_))
  ));
}

#[tokio::test]
async fn no_temp_file_left_behind() {
  let (dir, s) = store();
  s.save(&wizard("Gale")).await.unwrap();
  let names: Vec<_> = std::fs::read_dir(dir.path())
    .unwrap()
    .map(|e| e.unwrap().file_name())
    .collect();
  assert_eq!(names, vec!["characters.json"]);
}

#[tokio::test]
async fn creates_parent_directories() {
  let dir = tempfile::tempdir().unwrap();
  let s = JsonFileStore::open(dir.path().join("nested/deeper/chars.json"));
  s.save(&wizard("Gale")).await.unwrap();
  assert!(s.path().exists());
}

#[tokio::test]
async fn legacy_documents_fill_in_defaults() {
  let dir = tempfile::tempdir().unwrap();
  let path = write(
    &dir,
    "characters.json",
    r#"{"characters":[{"name":"Old","race":"dwarf","class":"fighter","level":2,"str":15,"main_hand":"axe"}]}"#,
  );
  let s = JsonFileStore::open(path);

  let c = s.get_by_id("Old").await.unwrap();
  assert_eq!(c.abilities.strength, 15);
  assert_eq!(c.abilities.dexterity, 10);
  assert_eq!(c.equipment.main_hand.as_deref(), Some("axe"));
  assert!(c.equipment.armor.is_none());
  assert!(c.spellcasting.is_none());
  assert!(c.skill_proficiencies.is_empty());
}

#[tokio::test]
async fn corrupt_file_is_a_json_error() {
  let dir = tempfile::tempdir().unwrap();
  let path = write(&dir, "characters.json", "{ not json");
  let s = JsonFileStore::open(path);
  assert!(matches!(s.get_all().await.unwrap_err(), Error::Json { .. }));
}

#[tokio::test]
async fn concurrent_saves_all_land() {
  let (_dir, s) = store();
  let mut tasks = tokio::task::JoinSet::new();
  for i in 0..8 {
    let s = s.clone();
    tasks.spawn(async move { s.save(&wizard(&format!("Hero {i}"))).await });
  }
  while let Some(res) = tasks.join_next().await {
    res.unwrap().unwrap();
  }
  assert_eq!(s.get_all().await.unwrap().len(), 8);
}

// ─── Reference data ──────────────────────────────────────────────────────────

#[test]
fn backgrounds_find_by_name_ignores_case() {
  let dir = tempfile::tempdir().unwrap();
  let path = write(
    &dir,
    "backgrounds.json",
    r#"[{"name":"Acolyte","skill_proficiencies":["insight","religion"]},
        {"name":"Sage","skill_proficiencies":["arcana","history"]}]"#,
  );
  let repo = JsonBackgroundRepository::new(path);

  assert_eq!(repo.load_backgrounds().unwrap().len(), 2);
  let sage = repo.find_by_name("sage").unwrap();
  assert_eq!(sage.skill_proficiencies, vec!["arcana", "history"]);

  let err = repo.find_by_name("pirate").unwrap_err();
  assert!(matches!(
    err,
    Error::Core(tome_core::Error::BackgroundNotFound(_))
  ));
}

#[test]
fn classes_carry_skill_count() {
  let dir = tempfile::tempdir().unwrap();
  let path = write(
    &dir,
    "classes.json",
    r#"[{"name":"Rogue","skill_proficiencies":["stealth","acrobatics","deception","insight"],"skill_count":4}]"#,
  );
  let repo = JsonClassRepository::new(path);

  let rogue = repo.find_by_name("ROGUE").unwrap();
  assert_eq!(rogue.skill_count, 4);
  assert!(repo.find_by_name("wizard").is_err());
}

#[test]
fn missing_reference_file_is_io_error() {
  let repo = JsonClassRepository::new("/definitely/not/here.json");
  assert!(matches!(repo.load_classes().unwrap_err(), Error::Io { .. }));
}

const SPELLS_CSV: &str = "\
Name,Level,Classes
Fire Bolt,0,\"Sorcerer, Wizard\"
Magic Missile,1,\"Sorcerer,Wizard\"
Cure Wounds,1,\"Bard, Cleric, Druid, Paladin, Ranger\"
Fireball,3,\"Sorcerer, Wizard\"
";

#[test]
fn spells_load_from_csv() {
  let dir = tempfile::tempdir().unwrap();
  let repo = CsvSpellRepository::new(write(&dir, "spells.csv", SPELLS_CSV));

  let spells = repo.load_spells().unwrap();
  assert_eq!(spells.len(), 4);
  assert_eq!(spells[1].index, "magic-missile");
  assert_eq!(spells[1].level, 1);
  assert_eq!(spells[1].classes, vec!["Sorcerer", "Wizard"]);
  assert_eq!(spells[0].level, 0);
}

#[test]
fn spells_filter_and_find_by_class() {
  let dir = tempfile::tempdir().unwrap();
  let repo = CsvSpellRepository::new(write(&dir, "spells.csv", SPELLS_CSV));

  let cleric: Vec<_> = repo
    .filter_by_class("cleric")
    .unwrap()
    .into_iter()
    .map(|s| s.name)
    .collect();
  assert_eq!(cleric, vec!["Cure Wounds"]);

  let found = repo.find_for_class("magic missile", "wizard").unwrap();
  assert_eq!(found.level, 1);
  assert!(repo.find_for_class("magic-missile", "Wizard").is_ok());

  let err = repo.find_for_class("fireball", "cleric").unwrap_err();
  assert_eq!(
    err.to_string(),
    "spell 'fireball' not found for class cleric"
  );
}

#[test]
fn bad_spell_level_is_reported() {
  let dir = tempfile::tempdir().unwrap();
  let repo = CsvSpellRepository::new(write(
    &dir,
    "spells.csv",
    "name,level,classes\nOdd,three,Wizard\n",
  ));
  assert!(matches!(
    repo.load_spells().unwrap_err(),
    Error::InvalidSpellLevel { .. }
  ));
}
