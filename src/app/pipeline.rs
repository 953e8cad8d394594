//! The collect pipeline shared by `crisis collect` and the tests.
//!
//! fetch/calculate every catalog indicator -> classify -> aggregate -> snapshot
//!
//! Writing and printing are left to the caller.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::info;

use crate::data::{Fetchers, StatSource};
use crate::domain::{Catalog, IndicatorKey, IndicatorResult, ObservedValue, Snapshot};
use crate::error::AppError;
use crate::risk::{aggregate, classify};

/// Observe every catalog indicator through `source` and build the snapshot.
///
/// Provider failures never surface here; they become fallback values inside
/// the fetchers.
pub fn run_collect(source: &dyn StatSource, catalog: &Catalog, now: NaiveDateTime) -> Result<Snapshot, AppError> {
    let fetchers = Fetchers::new(source, catalog, now);
    let observations: BTreeMap<IndicatorKey, ObservedValue> =
        catalog.keys().map(|key| (key, fetchers.observe(key))).collect();

    build_snapshot(catalog, observations, now)
}

/// Classify pre-fetched observations and assemble the snapshot.
///
/// A catalog indicator without an observation gets its fallback value.
pub fn build_snapshot(
    catalog: &Catalog,
    mut observations: BTreeMap<IndicatorKey, ObservedValue>,
    now: NaiveDateTime,
) -> Result<Snapshot, AppError> {
    let mut indicators = BTreeMap::new();

    for key in catalog.keys() {
        let Some(entry) = catalog.entry(key) else {
            continue;
        };
        let observed = observations.remove(&key).unwrap_or_else(|| {
            ObservedValue::fallback(entry.fallback, now.format("%Y%m%d").to_string())
        });
        let class = classify(observed.value, &entry.config);
        indicators.insert(key, IndicatorResult::new(&entry.config, observed, class));
    }

    let overall_risk = aggregate(indicators.values().map(|r| r.risk_class))
        .ok_or_else(|| AppError::new(3, "No indicators configured; nothing to score."))?;

    let fallbacks = indicators.values().filter(|r| r.source == ObservedValue::FALLBACK_SOURCE).count();
    info!(
        risk = ?overall_risk.class,
        score = overall_risk.score,
        indicators = indicators.len(),
        fallbacks,
        "snapshot assembled"
    );

    Ok(Snapshot {
        updated_at: now,
        updated_date: now.format("%Y-%m-%d %H:%M").to_string(),
        overall_risk,
        indicators,
    })
}
