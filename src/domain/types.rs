//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while a snapshot is being assembled
//! - written to the snapshot JSON the dashboard reads
//! - reloaded later by `crisis show` or by tests

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One tracked indicator.
///
/// Declaration order is the order indicators appear in the snapshot (the
/// snapshot stores them in a `BTreeMap` keyed by this enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKey {
    ExchangeRate,
    #[serde(rename = "bond_rate_3y")]
    BondRate3y,
    FxToGdpRatio,
    KoreaUsRateGap,
    PfDelinquency,
}

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 5] = [
        IndicatorKey::ExchangeRate,
        IndicatorKey::BondRate3y,
        IndicatorKey::FxToGdpRatio,
        IndicatorKey::KoreaUsRateGap,
        IndicatorKey::PfDelinquency,
    ];

    /// Key as it appears in the snapshot JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorKey::ExchangeRate => "exchange_rate",
            IndicatorKey::BondRate3y => "bond_rate_3y",
            IndicatorKey::FxToGdpRatio => "fx_to_gdp_ratio",
            IndicatorKey::KoreaUsRateGap => "korea_us_rate_gap",
            IndicatorKey::PfDelinquency => "pf_delinquency",
        }
    }
}

impl std::fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk class of a single indicator or of the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskClass {
    Safe,
    Warning,
    Danger,
}

impl RiskClass {
    /// Score used by the aggregator (`safe=1`, `warning=2`, `danger=3`).
    pub fn score(self) -> u8 {
        match self {
            RiskClass::Safe => 1,
            RiskClass::Warning => 2,
            RiskClass::Danger => 3,
        }
    }

    /// Localized label for a single indicator.
    pub fn label(self) -> &'static str {
        match self {
            RiskClass::Safe => "안전",
            RiskClass::Warning => "주의",
            RiskClass::Danger => "위험",
        }
    }

    /// Localized label for the composite risk.
    pub fn composite_label(self) -> &'static str {
        match self {
            RiskClass::Safe => "저위험",
            RiskClass::Warning => "중간위험",
            RiskClass::Danger => "고위험",
        }
    }

    /// Short status marker for terminal output.
    pub fn marker(self) -> &'static str {
        match self {
            RiskClass::Safe => "[OK]",
            RiskClass::Warning => "[!!]",
            RiskClass::Danger => "[XX]",
        }
    }
}

/// Static per-indicator metadata and thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub name: String,
    pub unit: String,
    /// Lower end of the plausible range (used by the dashboard gauge).
    pub min: f64,
    /// Upper end of the plausible range.
    pub max: f64,
    pub danger_low: f64,
    pub danger_high: f64,
    /// `true` means higher values are worse.
    pub reverse: bool,
    pub description: String,
}

impl IndicatorConfig {
    /// Arithmetic mean of the two thresholds.
    pub fn midpoint(&self) -> f64 {
        (self.danger_low + self.danger_high) / 2.0
    }
}

/// Where an observed value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Retrieved (or computed from values retrieved) during this run.
    Live,
    /// Entered by hand; no provider publishes this series.
    Manual,
    /// Hardcoded default substituted after a failed fetch.
    Fallback,
}

/// Result of a fetch or a calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedValue {
    pub value: f64,
    /// Period label as reported by the provider (or derived from the run time).
    pub date: String,
    pub source: String,
    pub provenance: Provenance,
}

impl ObservedValue {
    pub const FALLBACK_SOURCE: &'static str = "default";

    pub fn live(value: f64, date: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            value,
            date: date.into(),
            source: source.into(),
            provenance: Provenance::Live,
        }
    }

    pub fn manual(value: f64, date: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            value,
            date: date.into(),
            source: source.into(),
            provenance: Provenance::Manual,
        }
    }

    pub fn fallback(value: f64, date: impl Into<String>) -> Self {
        Self {
            value,
            date: date.into(),
            source: Self::FALLBACK_SOURCE.to_string(),
            provenance: Provenance::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }

    /// Anything that did not come from a live provider response is reported as manual.
    pub fn is_manual(&self) -> bool {
        self.provenance != Provenance::Live
    }
}

/// One indicator as written to the snapshot: static config plus the observed
/// value and its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    #[serde(flatten)]
    pub config: IndicatorConfig,
    pub value: f64,
    pub date: String,
    pub source: String,
    pub manual: bool,
    pub risk_class: RiskClass,
    pub risk_text: String,
}

impl IndicatorResult {
    pub fn new(config: &IndicatorConfig, observed: ObservedValue, risk_class: RiskClass) -> Self {
        let manual = observed.is_manual();
        Self {
            config: config.clone(),
            value: observed.value,
            date: observed.date,
            source: observed.source,
            manual,
            risk_class,
            risk_text: risk_class.label().to_string(),
        }
    }
}

/// Composite risk across all indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRisk {
    pub class: RiskClass,
    pub text: String,
    /// Mean indicator score, rounded to 2 decimals.
    pub score: f64,
}

/// The single persisted output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub updated_at: NaiveDateTime,
    pub updated_date: String,
    pub overall_risk: OverallRisk,
    pub indicators: BTreeMap<IndicatorKey, IndicatorResult>,
}

/// ECOS reporting cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Daily,
    Monthly,
    Quarterly,
}

impl Cycle {
    /// Cycle code used in ECOS request paths.
    pub fn code(self) -> &'static str {
        match self {
            Cycle::Daily => "D",
            Cycle::Monthly => "M",
            Cycle::Quarterly => "Q",
        }
    }

    /// Format a date as an ECOS period for this cycle (`20250514`, `202505`, `2025Q2`).
    pub fn period(self, date: NaiveDate) -> String {
        match self {
            Cycle::Daily => date.format("%Y%m%d").to_string(),
            Cycle::Monthly => date.format("%Y%m").to_string(),
            Cycle::Quarterly => format!("{}Q{}", date.year(), quarter_of(date.month())),
        }
    }
}

/// Credentials and endpoints for the external providers.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub ecos_base_url: String,
    pub ecos_api_key: String,
    pub fred_base_url: String,
    pub fred_api_key: String,
    pub daum_quote_url: String,
}

impl ProviderConfig {
    pub const DEFAULT_ECOS_BASE_URL: &'static str = "https://ecos.bok.or.kr/api";
    pub const DEFAULT_ECOS_API_KEY: &'static str = "sample";
    pub const DEFAULT_FRED_BASE_URL: &'static str = "https://api.stlouisfed.org/fred/series/observations";
    pub const DEFAULT_FRED_API_KEY: &'static str = "DEMO_API";
    pub const DEFAULT_DAUM_QUOTE_URL: &'static str = "https://finance.daum.net/api/exchanges/FRX.KRWUSD";

    /// Read credentials from the environment (and `.env`), falling back to
    /// placeholder keys. Placeholder keys make the providers reject requests,
    /// which the fetchers turn into fallback values.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            ecos_base_url: get("ECOS_BASE_URL", Self::DEFAULT_ECOS_BASE_URL),
            ecos_api_key: get("ECOS_API_KEY", Self::DEFAULT_ECOS_API_KEY),
            fred_base_url: Self::DEFAULT_FRED_BASE_URL.to_string(),
            fred_api_key: get("FRED_API_KEY", Self::DEFAULT_FRED_API_KEY),
            daum_quote_url: Self::DEFAULT_DAUM_QUOTE_URL.to_string(),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags plus the environment.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub output: PathBuf,
    /// Per-request timeout for every outbound call.
    pub timeout: Duration,
    /// Skip the network entirely; every indicator takes its fallback.
    pub offline: bool,
    /// Do not print the terminal summary.
    pub quiet: bool,
    pub providers: ProviderConfig,
}

/// Calendar quarter (1-4) of a month (1-12).
pub fn quarter_of(month: u32) -> u32 {
    (month.saturating_sub(1)) / 3 + 1
}

/// Fiscal quarter label, e.g. `2025.Q2`.
pub fn quarter_label(date: NaiveDate) -> String {
    format!("{}.Q{}", date.year(), quarter_of(date.month()))
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_keys_serialize_as_snapshot_keys() {
        for key in IndicatorKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn key_order_matches_dashboard_order() {
        let mut keys = IndicatorKey::ALL.to_vec();
        keys.sort();
        assert_eq!(keys, IndicatorKey::ALL.to_vec());
    }

    #[test]
    fn quarter_labels() {
        let d = |m| NaiveDate::from_ymd_opt(2025, m, 15).unwrap();
        assert_eq!(quarter_label(d(1)), "2025.Q1");
        assert_eq!(quarter_label(d(3)), "2025.Q1");
        assert_eq!(quarter_label(d(4)), "2025.Q2");
        assert_eq!(quarter_label(d(9)), "2025.Q3");
        assert_eq!(quarter_label(d(12)), "2025.Q4");
    }

    #[test]
    fn ecos_periods_by_cycle() {
        let d = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();
        assert_eq!(Cycle::Daily.period(d), "20250504");
        assert_eq!(Cycle::Monthly.period(d), "202505");
        assert_eq!(Cycle::Quarterly.period(d), "2025Q2");
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(24.4117, 1), 24.4);
        assert_eq!(round_to(3.0 - 4.5, 2), -1.5);
        assert_eq!(round_to(-0.254, 2), -0.25);
        assert_eq!(round_to(2.0 / 3.0 + 1.0, 2), 1.67);
    }

    #[test]
    fn fallback_values_are_manual_and_tagged_default() {
        let v = ObservedValue::fallback(1450.0, "20250514");
        assert!(v.is_fallback());
        assert!(v.is_manual());
        assert_eq!(v.source, "default");

        let live = ObservedValue::live(1380.5, "20250514", "다음금융");
        assert!(!live.is_manual());
    }

    #[test]
    fn provider_config_uses_placeholders_when_unset() {
        let cfg = ProviderConfig::from_lookup(|name| match name {
            "FRED_API_KEY" => Some("  ".to_string()),
            "ECOS_API_KEY" => Some("real-key".to_string()),
            _ => None,
        });
        assert_eq!(cfg.ecos_api_key, "real-key");
        assert_eq!(cfg.fred_api_key, ProviderConfig::DEFAULT_FRED_API_KEY);
        assert_eq!(cfg.ecos_base_url, ProviderConfig::DEFAULT_ECOS_BASE_URL);
    }
}
