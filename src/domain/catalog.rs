//! The static indicator catalog.
//!
//! Everything a run needs that is not fetched lives here: display metadata,
//! thresholds, fallback values, provider codes and scaling constants. The
//! catalog is built once in `app` and passed by reference to the fetchers and
//! the pipeline.

use std::collections::BTreeMap;

use crate::domain::{Cycle, IndicatorConfig, IndicatorKey};

/// An ECOS statistic plus the look-back window used to query it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcosSeries {
    pub stat_code: &'static str,
    pub item_code: &'static str,
    pub cycle: Cycle,
    /// Days before the run date where the query window starts.
    pub lookback_days: i64,
}

/// A catalog entry for one snapshot indicator.
#[derive(Debug, Clone)]
pub struct IndicatorEntry {
    pub config: IndicatorConfig,
    /// Substituted when the live value cannot be obtained.
    pub fallback: f64,
}

/// A figure that is entered by hand (no public API publishes it).
#[derive(Debug, Clone)]
pub struct ManualEntry {
    pub value: f64,
    pub period: &'static str,
    pub source: &'static str,
}

/// Fallbacks for raw inputs that feed the derived indicators.
#[derive(Debug, Clone, Copy)]
pub struct RawFallbacks {
    /// FX reserves in 100M USD.
    pub foreign_reserve: f64,
    /// Bank of Korea base rate (%).
    pub base_rate: f64,
    /// Fed funds target range upper limit (%).
    pub us_policy_rate: f64,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    indicators: BTreeMap<IndicatorKey, IndicatorEntry>,

    pub usd_krw: EcosSeries,
    pub bond_3y: EcosSeries,
    pub foreign_reserve: EcosSeries,
    pub base_rate: EcosSeries,
    /// FRED series for the US reference rate.
    pub us_policy_series: &'static str,

    pub raw_fallbacks: RawFallbacks,
    pub pf_delinquency: ManualEntry,

    /// Assumed nominal GDP in 100M USD.
    pub gdp_100m_usd: f64,
    /// ECOS reports reserves in thousand USD; dividing by this yields 100M USD.
    pub reserve_unit_divisor: f64,
}

impl Catalog {
    /// The catalog used in production runs.
    pub fn standard() -> Self {
        let mut indicators = BTreeMap::new();

        indicators.insert(
            IndicatorKey::ExchangeRate,
            entry("환율 (USD/KRW)", "원", (1200.0, 1600.0), (1250.0, 1400.0), true, "1,400원 이상: 위험", 1450.0),
        );
        indicators.insert(
            IndicatorKey::BondRate3y,
            entry("국고채 3년 금리", "%", (1.0, 5.0), (2.0, 3.5), true, "3.5% 이상: 위험", 2.8),
        );
        indicators.insert(
            IndicatorKey::FxToGdpRatio,
            entry("GDP 대비 외환보유율", "%", (10.0, 40.0), (20.0, 30.0), false, "20% 이하: 주의", 24.4),
        );
        indicators.insert(
            IndicatorKey::KoreaUsRateGap,
            entry("한미 금리차", "%p", (-3.0, 2.0), (-1.0, 0.5), false, "-1%p 이하: 자본유출 압력", -1.5),
        );
        indicators.insert(
            IndicatorKey::PfDelinquency,
            entry("PF 연체율", "%", (0.0, 10.0), (2.0, 5.0), true, "5% 이상: 위험", 4.49),
        );

        Self {
            indicators,
            usd_krw: EcosSeries {
                stat_code: "731Y001",
                item_code: "0000001",
                cycle: Cycle::Daily,
                lookback_days: 7,
            },
            bond_3y: EcosSeries {
                stat_code: "817Y002",
                item_code: "010200000",
                cycle: Cycle::Daily,
                lookback_days: 7,
            },
            foreign_reserve: EcosSeries {
                stat_code: "732Y001",
                item_code: "99",
                cycle: Cycle::Monthly,
                lookback_days: 90,
            },
            base_rate: EcosSeries {
                stat_code: "722Y001",
                item_code: "0101000",
                cycle: Cycle::Monthly,
                lookback_days: 60,
            },
            us_policy_series: "DFEDTARU",
            raw_fallbacks: RawFallbacks {
                foreign_reserve: 4150.0,
                base_rate: 3.0,
                us_policy_rate: 4.5,
            },
            pf_delinquency: ManualEntry {
                value: 4.49,
                period: "2025.Q1",
                source: "금융감독원",
            },
            gdp_100m_usd: 17_000.0,
            reserve_unit_divisor: 100_000.0,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = IndicatorKey> + '_ {
        self.indicators.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn entry(&self, key: IndicatorKey) -> Option<&IndicatorEntry> {
        self.indicators.get(&key)
    }

    pub fn config(&self, key: IndicatorKey) -> Option<&IndicatorConfig> {
        self.entry(key).map(|e| &e.config)
    }

    /// Fallback value for `key`, or NaN for a key the catalog does not track.
    pub fn fallback(&self, key: IndicatorKey) -> f64 {
        self.entry(key).map(|e| e.fallback).unwrap_or(f64::NAN)
    }

    /// Restrict the catalog to the given keys (used by tests and partial runs).
    pub fn retain(mut self, keep: &[IndicatorKey]) -> Self {
        self.indicators.retain(|k, _| keep.contains(k));
        self
    }
}

fn entry(
    name: &str,
    unit: &str,
    (min, max): (f64, f64),
    (danger_low, danger_high): (f64, f64),
    reverse: bool,
    description: &str,
    fallback: f64,
) -> IndicatorEntry {
    IndicatorEntry {
        config: IndicatorConfig {
            name: name.to_string(),
            unit: unit.to_string(),
            min,
            max,
            danger_low,
            danger_high,
            reverse,
            description: description.to_string(),
        },
        fallback,
    }
}
