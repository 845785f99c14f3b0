//! Rate-limited batch lookups.
//!
//! Requests are started no faster than `max_per_second`, each on its own task
//! in a [`JoinSet`], so slow responses overlap while the start rate stays
//! bounded. A failed lookup is logged and left out of the result.

use std::{collections::HashMap, future::Future, time::Duration};

use tokio::{task::JoinSet, time::MissedTickBehavior};
use tome_core::enrich::DEFAULT_MAX_PER_SECOND;
use tracing::warn;

use crate::Result;

pub(crate) async fn paced<T, F, Fut>(
  names: &[String],
  max_per_second: u32,
  fetch: F,
) -> HashMap<String, T>
where
  T: Send + 'static,
  F: Fn(String) -> Fut,
  Fut: Future<Output = Result<T>> + Send + 'static,
{
  let mut ticker = tokio::time::interval(tick_period(max_per_second));
  ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

  let mut set = JoinSet::new();
  for name in names {
    ticker.tick().await;
    let lookup = fetch(name.clone());
    let name = name.clone();
    set.spawn(async move { (name, lookup.await) });
  }

  let mut found = HashMap::with_capacity(names.len());
  while let Some(joined) = set.join_next().await {
    match joined {
      Ok((name, Ok(info))) => {
        found.insert(name, info);
      }
      Ok((name, Err(e))) => warn!(%name, error = %e, "batch lookup failed"),
      Err(e) => warn!(error = %e, "batch lookup task failed"),
    }
  }
  found
}

/// Gap between request starts. Zero means the default rate; the period never
/// rounds down to zero, which `interval` rejects.
pub(crate) fn tick_period(max_per_second: u32) -> Duration {
  let rate = match max_per_second {
    0 => DEFAULT_MAX_PER_SECOND,
    n => n,
  };
  (Duration::from_secs(1) / rate).max(Duration::from_nanos(1))
}
