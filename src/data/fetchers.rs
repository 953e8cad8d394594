//! Per-indicator fetchers and the two derived-indicator calculators.
//!
//! Every public indicator routine returns an `ObservedValue` and never fails:
//! a provider error is logged and replaced by the catalog fallback. The raw
//! inputs of the calculators have `try_*` variants so a calculator can fall
//! back as a whole instead of mixing live and default inputs.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::data::ecos::EcosQuery;
use crate::data::source::{RawObservation, StatSource};
use crate::domain::{Catalog, EcosSeries, IndicatorKey, ObservedValue, quarter_label, round_to};
use crate::error::FetchError;

pub const SOURCE_BOK: &str = "한국은행";
pub const SOURCE_DAUM: &str = "다음금융";
pub const SOURCE_FRED: &str = "FRED";
pub const SOURCE_RATE_GAP: &str = "한국은행/FRED(계산)";
pub const SOURCE_RESERVE_RATIO: &str = "한국은행(계산)";

pub struct Fetchers<'a> {
    source: &'a dyn StatSource,
    catalog: &'a Catalog,
    now: NaiveDateTime,
}

impl<'a> Fetchers<'a> {
    /// `now` is the run timestamp; it fixes the query windows and the period
    /// labels of values that carry no date of their own.
    pub fn new(source: &'a dyn StatSource, catalog: &'a Catalog, now: NaiveDateTime) -> Self {
        Self { source, catalog, now }
    }

    fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Observe one snapshot indicator.
    pub fn observe(&self, key: IndicatorKey) -> ObservedValue {
        let observed = match key {
            IndicatorKey::ExchangeRate => self.exchange_rate(),
            IndicatorKey::BondRate3y => self.bond_rate_3y(),
            IndicatorKey::FxToGdpRatio => self.fx_to_gdp_ratio(),
            IndicatorKey::KoreaUsRateGap => self.korea_us_rate_gap(),
            IndicatorKey::PfDelinquency => self.pf_delinquency(),
        };
        info!(
            indicator = %key,
            value = observed.value,
            date = %observed.date,
            source = %observed.source,
            fallback = observed.is_fallback(),
            "indicator observed"
        );
        observed
    }

    /// USD/KRW: Daum spot quote, then the ECOS daily rate, then the fallback.
    pub fn exchange_rate(&self) -> ObservedValue {
        let today = self.today().format("%Y%m%d").to_string();

        match self.source.spot_usd_krw() {
            Ok(raw) => {
                let date = raw.date.unwrap_or_else(|| today.clone());
                return ObservedValue::live(raw.value, date, SOURCE_DAUM);
            }
            Err(e) => log_failure(IndicatorKey::ExchangeRate.as_str(), &e),
        }

        match self.ecos(&self.catalog.usd_krw) {
            Ok(raw) => ObservedValue::live(raw.value, raw.date.unwrap_or(today), SOURCE_BOK),
            Err(e) => {
                log_failure(IndicatorKey::ExchangeRate.as_str(), &e);
                ObservedValue::fallback(self.catalog.fallback(IndicatorKey::ExchangeRate), today)
            }
        }
    }

    /// 3-year treasury yield (ECOS, daily).
    pub fn bond_rate_3y(&self) -> ObservedValue {
        let fallback = self.catalog.fallback(IndicatorKey::BondRate3y);
        self.ecos_or_fallback(IndicatorKey::BondRate3y.as_str(), &self.catalog.bond_3y, fallback)
    }

    /// FX reserves in 100M USD (ECOS reports thousand USD).
    pub fn try_foreign_reserve(&self) -> Result<ObservedValue, FetchError> {
        let series = self.catalog.foreign_reserve;
        let raw = self.ecos(&series)?;
        let period = raw.date.unwrap_or_else(|| series.cycle.period(self.today()));
        Ok(ObservedValue::live(
            raw.value / self.catalog.reserve_unit_divisor,
            period,
            SOURCE_BOK,
        ))
    }

    pub fn foreign_reserve(&self) -> ObservedValue {
        self.try_foreign_reserve().unwrap_or_else(|e| {
            log_failure("foreign_reserve", &e);
            ObservedValue::fallback(
                self.catalog.raw_fallbacks.foreign_reserve,
                self.catalog.foreign_reserve.cycle.period(self.today()),
            )
        })
    }

    /// Bank of Korea base rate (ECOS, monthly).
    pub fn try_base_rate(&self) -> Result<ObservedValue, FetchError> {
        let series = self.catalog.base_rate;
        let raw = self.ecos(&series)?;
        let period = raw.date.unwrap_or_else(|| series.cycle.period(self.today()));
        Ok(ObservedValue::live(raw.value, period, SOURCE_BOK))
    }

    pub fn base_rate(&self) -> ObservedValue {
        self.try_base_rate().unwrap_or_else(|e| {
            log_failure("base_rate", &e);
            ObservedValue::fallback(
                self.catalog.raw_fallbacks.base_rate,
                self.catalog.base_rate.cycle.period(self.today()),
            )
        })
    }

    /// Fed funds target range upper limit (FRED).
    pub fn try_us_policy_rate(&self) -> Result<ObservedValue, FetchError> {
        let raw = self.source.fred_latest(self.catalog.us_policy_series)?;
        let date = raw
            .date
            .unwrap_or_else(|| self.today().format("%Y-%m-%d").to_string());
        Ok(ObservedValue::live(raw.value, date, SOURCE_FRED))
    }

    pub fn us_policy_rate(&self) -> ObservedValue {
        self.try_us_policy_rate().unwrap_or_else(|e| {
            log_failure("us_policy_rate", &e);
            ObservedValue::fallback(
                self.catalog.raw_fallbacks.us_policy_rate,
                self.today().format("%Y-%m-%d").to_string(),
            )
        })
    }

    /// Korea base rate minus the US upper bound, in percentage points.
    pub fn korea_us_rate_gap(&self) -> ObservedValue {
        let period = self.now.format("%Y.%m").to_string();
        let gap = self
            .try_base_rate()
            .and_then(|korea| self.try_us_policy_rate().map(|us| korea.value - us.value));

        match gap {
            Ok(gap) => ObservedValue::live(round_to(gap, 2), period, SOURCE_RATE_GAP),
            Err(e) => {
                log_failure(IndicatorKey::KoreaUsRateGap.as_str(), &e);
                ObservedValue::fallback(self.catalog.fallback(IndicatorKey::KoreaUsRateGap), period)
            }
        }
    }

    /// FX reserves as a percentage of the assumed GDP.
    pub fn fx_to_gdp_ratio(&self) -> ObservedValue {
        let period = quarter_label(self.today());
        match self.try_foreign_reserve() {
            Ok(reserve) => {
                let ratio = reserve.value / self.catalog.gdp_100m_usd * 100.0;
                ObservedValue::live(round_to(ratio, 1), period, SOURCE_RESERVE_RATIO)
            }
            Err(e) => {
                log_failure(IndicatorKey::FxToGdpRatio.as_str(), &e);
                ObservedValue::fallback(self.catalog.fallback(IndicatorKey::FxToGdpRatio), period)
            }
        }
    }

    /// PF loan delinquency rate. The FSS publishes it only in press releases,
    /// so the catalog carries the latest figure by hand.
    pub fn pf_delinquency(&self) -> ObservedValue {
        let entry = &self.catalog.pf_delinquency;
        ObservedValue::manual(entry.value, entry.period, entry.source)
    }

    fn ecos(&self, series: &EcosSeries) -> Result<RawObservation, FetchError> {
        self.source
            .ecos_first_row(&EcosQuery::window(series, self.today()))
    }

    fn ecos_or_fallback(&self, what: &str, series: &EcosSeries, fallback: f64) -> ObservedValue {
        let period = series.cycle.period(self.today());
        match self.ecos(series) {
            Ok(raw) => ObservedValue::live(raw.value, raw.date.unwrap_or(period), SOURCE_BOK),
            Err(e) => {
                log_failure(what, &e);
                ObservedValue::fallback(fallback, period)
            }
        }
    }
}

fn log_failure(what: &str, err: &FetchError) {
    warn!(what, provider = %err.provider(), error = %err, "fetch unavailable");
}
