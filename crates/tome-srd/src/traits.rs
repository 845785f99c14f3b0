//! Racial trait lookups. The API has no race → trait index we can rely on, so
//! each known trait is fetched concurrently and kept when its `races` list
//! names the character's race.

use serde::Deserialize;
use tokio::task::JoinSet;
use tome_core::{enrich::TraitInfo, race::normalize_race};
use tracing::debug;

use crate::{Error, Result, SrdClient};

/// Traits that stand in for a skill proficiency.
const SKILL_TRAITS: &[(&str, &str)] = &[
  ("stonecunning", "history"),
  ("keen-senses", "perception"),
  ("menacing", "intimidation"),
];

/// SRD traits that belong to the core races.
const RACIAL_TRAITS: &[&str] = &[
  "stonecunning",
  "darkvision",
  "dwarven-resilience",
  "dwarven-combat-training",
  "keen-senses",
  "fey-ancestry",
  "trance",
  "menacing",
  "relentless-endurance",
  "savage-attacks",
  "brave",
  "halfling-nimbleness",
  "lucky",
];

#[derive(Debug, Deserialize)]
struct TraitResponse {
  #[serde(default)]
  index: String,
  #[serde(default)]
  name:  String,
  #[serde(default)]
  desc:  Vec<String>,
  #[serde(default)]
  races: Vec<RaceRef>,
}

#[derive(Debug, Deserialize)]
struct RaceRef {
  #[serde(default)]
  index: String,
  #[serde(default)]
  name:  String,
}

impl TraitResponse {
  fn belongs_to(&self, race: &str) -> bool {
    self.races.iter().any(|r| {
      normalize_race(&r.index) == race || normalize_race(&r.name) == race
    })
  }
}

/// Fetch `traits` concurrently and return, in list order, the ones that
/// belong to `race` (already normalised). Fails only when every request
/// failed.
async fn matching_traits(
  client: &SrdClient,
  race: &str,
  traits: &[&'static str],
) -> Result<Vec<(usize, TraitResponse)>> {
  let mut set = JoinSet::new();
  for (i, &index) in traits.iter().enumerate() {
    let client = client.clone();
    set.spawn(async move {
      let res = client
        .fetch_json::<TraitResponse>(&format!("traits/{index}"))
        .await;
      (i, res)
    });
  }

  let mut matched = Vec::new();
  let mut reached = 0;
  while let Some(joined) = set.join_next().await {
    let Ok((i, res)) = joined else { continue };
    match res {
      Ok(t) => {
        reached += 1;
        if t.belongs_to(race) {
          matched.push((i, t));
        }
      }
      Err(e) => {
        debug!(trait_index = traits[i], error = %e, "trait lookup failed");
      }
    }
  }

  if reached == 0 && !traits.is_empty() {
    return Err(Error::NoTraitData(race.to_owned()));
  }
  matched.sort_by_key(|(i, _)| *i);
  Ok(matched)
}

impl SrdClient {
  /// Skill proficiencies implied by the race's SRD traits.
  pub async fn racial_skill_proficiencies(
    &self,
    race: &str,
  ) -> Result<Vec<String>> {
    let race = normalize_race(race);
    let indexes: Vec<&'static str> =
      SKILL_TRAITS.iter().map(|(t, _)| *t).collect();

    Ok(
      matching_traits(self, &race, &indexes)
        .await?
        .into_iter()
        .map(|(i, _)| SKILL_TRAITS[i].1.to_owned())
        .collect(),
    )
  }

  /// The race's SRD traits with their descriptions.
  pub async fn racial_traits(&self, race: &str) -> Result<Vec<TraitInfo>> {
    let race = normalize_race(race);
    Ok(
      matching_traits(self, &race, RACIAL_TRAITS)
        .await?
        .into_iter()
        .map(|(_, t)| TraitInfo {
          index: t.index,
          name:  t.name,
          desc:  t.desc,
        })
        .collect(),
    )
  }
}
