//! `tome`: D&D 5e character sheets on the command line.
//!
//! # Usage
//!
//! ```text
//! tome create --name "Gale" --race human --class wizard --level 3 --int 16
//! tome equip --name "Gale" --weapon quarterstaff --slot "main hand"
//! tome prepare-spell --name "Gale" --spell "magic missile"
//! tome view --name "Gale"
//! ```
//!
//! Settings come from `tome.toml` (or `--config`) and `TOME_*` environment
//! variables. Logs go to stderr; set `RUST_LOG` or pass `-v` for more.

mod config;
mod render;
mod service;

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use config::Settings;
use service::{CharacterService, NewCharacter, ReferenceData};
use tome_core::{
  ability::AbilityScores,
  character::EquipSlot,
  enrich::{Enricher, Offline},
};
use tome_srd::{SrdClient, SrdConfig};
use tome_store_json::{
  CsvSpellRepository, JsonBackgroundRepository, JsonClassRepository,
  JsonFileStore,
};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tome", author, version, about = "D&D 5e character sheets")]
struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, global = true, default_value = "tome.toml")]
  config: PathBuf,

  /// Character file; overrides `storage_path`.
  #[arg(long, global = true, value_name = "FILE")]
  data: Option<PathBuf>,

  /// Do not contact the reference API.
  #[arg(long, global = true)]
  offline: bool,

  /// More log output (-v info, -vv debug).
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create a character and save it.
  Create(CreateArgs),

  /// Print a character sheet.
  View {
    #[arg(long)]
    name: String,
  },

  /// List saved characters.
  List,

  /// Delete a character.
  Delete {
    #[arg(long)]
    name: String,
  },

  /// Equip a weapon, armor, or a shield.
  Equip(EquipArgs),

  /// Learn a spell (bards, sorcerers, warlocks).
  LearnSpell {
    #[arg(long)]
    name:  String,
    #[arg(long)]
    spell: String,
  },

  /// Prepare a spell (clerics, druids, wizards, paladins, rangers).
  PrepareSpell {
    #[arg(long)]
    name:  String,
    #[arg(long)]
    spell: String,
  },
}

#[derive(clap::Args, Debug)]
struct CreateArgs {
  #[arg(long)]
  name:         String,
  #[arg(long)]
  race:         String,
  #[arg(long)]
  class:        String,
  #[arg(long, default_value_t = 1)]
  level:        i32,
  #[arg(long = "str", default_value_t = 10)]
  strength:     i32,
  #[arg(long = "dex", default_value_t = 10)]
  dexterity:    i32,
  #[arg(long = "con", default_value_t = 10)]
  constitution: i32,
  #[arg(long = "int", default_value_t = 10)]
  intelligence: i32,
  #[arg(long = "wis", default_value_t = 10)]
  wisdom:       i32,
  #[arg(long = "cha", default_value_t = 10)]
  charisma:     i32,
  #[arg(long, default_value = service::DEFAULT_BACKGROUND)]
  background:   String,
  /// Extra skill proficiencies, comma separated.
  #[arg(long = "skills", alias = "skill-proficiencies", value_delimiter = ',')]
  skills:       Vec<String>,
  #[arg(long = "mainhand")]
  main_hand:    Option<String>,
  #[arg(long = "offhand")]
  off_hand:     Option<String>,
  #[arg(long)]
  armor:        Option<String>,
  #[arg(long)]
  shield:       Option<String>,
}

#[derive(clap::Args, Debug)]
struct EquipArgs {
  #[arg(long)]
  name:   String,
  #[arg(long, conflicts_with_all = ["armor", "shield"])]
  weapon: Option<String>,
  /// Hand for the weapon: "main hand" (main, mh) or "off hand" (off, oh).
  #[arg(long, default_value = "main hand")]
  slot:   String,
  #[arg(long, conflicts_with = "shield")]
  armor:  Option<String>,
  #[arg(long)]
  shield: Option<String>,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = match cli.verbose {
    0 => LevelFilter::WARN,
    1 => LevelFilter::INFO,
    _ => LevelFilter::DEBUG,
  };
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .init();

  let mut settings = Settings::load(cli.config.clone())?;
  if let Some(data) = &cli.data {
    settings.storage_path = data.clone();
  }
  settings.offline |= cli.offline;
  debug!(?settings, "loaded settings");

  let store = JsonFileStore::open(&settings.storage_path);
  let reference = ReferenceData {
    backgrounds: JsonBackgroundRepository::new(&settings.backgrounds_path),
    classes:     JsonClassRepository::new(&settings.classes_path),
    spells:      CsvSpellRepository::new(&settings.spells_path),
  };
  let rate = settings.requests_per_second;

  if settings.offline {
    let svc = CharacterService::new(store, Offline, reference, rate);
    return run(cli.command, svc).await;
  }

  let client = SrdClient::new(SrdConfig {
    base_url: settings.api_base_url.clone(),
    timeout:  settings.request_timeout(),
  })
  .context("failed to build HTTP client")?;
  run(cli.command, CharacterService::new(store, client, reference, rate)).await
}

async fn run<E: Enricher>(
  command: Command,
  svc: CharacterService<JsonFileStore, E>,
) -> Result<()> {
  match command {
    Command::Create(args) => {
      let name = args.name.clone();
      svc.create(args.into()).await?;
      println!("saved character {name}");
    }

    Command::View { name } => {
      print!("{}", render::sheet(&svc.view(&name).await?));
    }

    Command::List => print!("{}", render::list(&svc.list().await?)),

    Command::Delete { name } => {
      svc.delete(&name).await?;
      println!("deleted {name}");
    }

    Command::Equip(args) => equip(&svc, args).await?,

    Command::LearnSpell { name, spell } => {
      let spell = svc.learn_spell(&name, &spell).await?;
      println!("Learned spell {}", spell.name.to_lowercase());
    }

    Command::PrepareSpell { name, spell } => {
      let spell = svc.prepare_spell(&name, &spell).await?;
      println!("Prepared spell {}", spell.name.to_lowercase());
    }
  }
  Ok(())
}

async fn equip<E: Enricher>(
  svc: &CharacterService<JsonFileStore, E>,
  args: EquipArgs,
) -> Result<()> {
  if let Some(weapon) = &args.weapon {
    let slot = EquipSlot::weapon_slot(&args.slot);
    svc.equip_weapon(&args.name, weapon, slot).await?;
    println!("Equipped weapon {} to {slot}", weapon.trim().to_lowercase());
  } else if let Some(armor) = &args.armor {
    svc.equip_armor(&args.name, armor, EquipSlot::Armor).await?;
    println!("Equipped armor {}", armor.trim().to_lowercase());
  } else if let Some(shield) = &args.shield {
    svc.equip_armor(&args.name, shield, EquipSlot::Shield).await?;
    println!("Equipped shield {}", shield.trim().to_lowercase());
  } else {
    bail!("nothing to equip: pass --weapon, --armor or --shield");
  }
  Ok(())
}

impl From<CreateArgs> for NewCharacter {
  fn from(args: CreateArgs) -> Self {
    Self {
      name:       args.name,
      race:       args.race,
      class:      args.class,
      level:      args.level,
      scores:     AbilityScores {
        strength:     args.strength,
        dexterity:    args.dexterity,
        constitution: args.constitution,
        intelligence: args.intelligence,
        wisdom:       args.wisdom,
        charisma:     args.charisma,
      },
      background: args.background,
      skills:     args.skills,
      main_hand:  args.main_hand,
      off_hand:   args.off_hand,
      armor:      args.armor,
      shield:     args.shield,
    }
  }
}
