//! Async HTTP client for the SRD reference API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tome_core::enrich::{ArmorInfo, SpellInfo, WeaponInfo, lookup_key};
use tracing::debug;

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/2014";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the reference API.
#[derive(Debug, Clone)]
pub struct SrdConfig {
  pub base_url: String,
  /// Per-request timeout.
  pub timeout:  Duration,
}

impl Default for SrdConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_owned(),
      timeout:  DEFAULT_TIMEOUT,
    }
  }
}

/// Async HTTP client for the SRD API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct SrdClient {
  client: Client,
  config: SrdConfig,
}

// ─── Response shapes ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WeaponResponse {
  #[serde(default)]
  name:            String,
  #[serde(default)]
  weapon_category: String,
  #[serde(default)]
  range:           Option<RangeResponse>,
  #[serde(default)]
  two_handed:      bool,
}

#[derive(Debug, Deserialize)]
struct RangeResponse {
  #[serde(default)]
  normal: u32,
}

#[derive(Debug, Deserialize)]
struct ArmorResponse {
  #[serde(default)]
  name:        String,
  armor_class: ArmorClassResponse,
}

#[derive(Debug, Deserialize)]
struct ArmorClassResponse {
  base:      i32,
  #[serde(default)]
  dex_bonus: bool,
}

#[derive(Debug, Deserialize)]
struct SpellResponse {
  #[serde(default)]
  name:   String,
  #[serde(default)]
  range:  String,
  #[serde(default)]
  school: Option<NamedResponse>,
}

#[derive(Debug, Deserialize)]
struct NamedResponse {
  name: String,
}

// ─── Client ──────────────────────────────────────────────────────────────────

impl SrdClient {
  pub fn new(config: SrdConfig) -> Result<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/{}",
      self.config.base_url.trim_end_matches('/'),
      path.trim_start_matches('/')
    )
  }

  /// `GET {base}/{path}`, decoding a JSON body on success.
  pub(crate) async fn fetch_json<T: DeserializeOwned>(
    &self,
    path: &str,
  ) -> Result<T> {
    let url = self.url(path);
    debug!(%url, "srd lookup");

    let resp = self.client.get(&url).send().await?;
    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status { url, status });
    }
    Ok(resp.json().await?)
  }

  /// `GET /equipment/{key}`
  pub async fn weapon(&self, name: &str) -> Result<WeaponInfo> {
    let w: WeaponResponse = self
      .fetch_json(&format!("equipment/{}", lookup_key(name)))
      .await?;
    Ok(WeaponInfo {
      name:       w.name,
      category:   w.weapon_category,
      range:      w.range.map(|r| r.normal).unwrap_or_default(),
      two_handed: w.two_handed,
    })
  }

  /// `GET /equipment/{key}`, expecting an `armor_class` block.
  pub async fn armor(&self, name: &str) -> Result<ArmorInfo> {
    let a: ArmorResponse = self
      .fetch_json(&format!("equipment/{}", lookup_key(name)))
      .await?;
    Ok(ArmorInfo {
      name:      a.name,
      base_ac:   a.armor_class.base,
      dex_bonus: a.armor_class.dex_bonus,
    })
  }

  /// `GET /spells/{key}`
  pub async fn spell(&self, name: &str) -> Result<SpellInfo> {
    let s: SpellResponse =
      self.fetch_json(&format!("spells/{}", lookup_key(name))).await?;
    Ok(SpellInfo {
      name:   s.name,
      range:  s.range,
      school: s.school.map(|n| n.name).unwrap_or_default(),
    })
  }
}
