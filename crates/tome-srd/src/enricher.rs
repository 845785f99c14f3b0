//! [`Enricher`] for [`SrdClient`].

use std::collections::HashMap;

use tome_core::enrich::{
  ArmorInfo, Enricher, SpellInfo, TraitInfo, WeaponInfo,
};

use crate::{SrdClient, batch::paced};

type CoreResult<T> = tome_core::Result<T>;

impl Enricher for SrdClient {
  async fn get_weapon(&self, name: &str) -> CoreResult<WeaponInfo> {
    Ok(self.weapon(name).await?)
  }

  async fn get_armor(&self, name: &str) -> CoreResult<ArmorInfo> {
    Ok(self.armor(name).await?)
  }

  async fn get_spell(&self, name: &str) -> CoreResult<SpellInfo> {
    Ok(self.spell(name).await?)
  }

  async fn get_racial_skill_proficiencies(
    &self,
    race: &str,
  ) -> CoreResult<Vec<String>> {
    Ok(self.racial_skill_proficiencies(race).await?)
  }

  async fn get_racial_traits(&self, race: &str) -> CoreResult<Vec<TraitInfo>> {
    Ok(self.racial_traits(race).await?)
  }

  async fn get_weapons_batch(
    &self,
    names: &[String],
    max_per_second: u32,
  ) -> HashMap<String, WeaponInfo> {
    paced(names, max_per_second, |name| {
      let client = self.clone();
      async move { client.weapon(&name).await }
    })
    .await
  }

  async fn get_armors_batch(
    &self,
    names: &[String],
    max_per_second: u32,
  ) -> HashMap<String, ArmorInfo> {
    paced(names, max_per_second, |name| {
      let client = self.clone();
      async move { client.armor(&name).await }
    })
    .await
  }

  async fn get_spells_batch(
    &self,
    names: &[String],
    max_per_second: u32,
  ) -> HashMap<String, SpellInfo> {
    paced(names, max_per_second, |name| {
      let client = self.clone();
      async move { client.spell(&name).await }
    })
    .await
  }
}
