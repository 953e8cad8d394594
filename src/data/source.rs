//! The seam between the indicator fetchers and the outside world.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::data::daum::DaumClient;
use crate::data::ecos::{EcosClient, EcosQuery};
use crate::data::fred::FredClient;
use crate::domain::ProviderConfig;
use crate::error::{AppError, FetchError, Provider};

/// A value as returned by a provider, before it is turned into an indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub value: f64,
    /// Provider period label (`20250513`, `202504`, `2025-05-13`), when it has one.
    pub date: Option<String>,
    /// Provider's own series name, when it has one.
    pub label: Option<String>,
}

/// Raw access to the external statistics providers.
///
/// One call per method invocation, no retries. Implementations never panic on
/// bad payloads; everything that prevents a number from coming back is a
/// `FetchError`.
pub trait StatSource {
    /// First row of an ECOS `StatisticSearch` query.
    fn ecos_first_row(&self, query: &EcosQuery) -> Result<RawObservation, FetchError>;

    /// Latest observation of a FRED series.
    fn fred_latest(&self, series_id: &str) -> Result<RawObservation, FetchError>;

    /// Spot USD/KRW quote.
    fn spot_usd_krw(&self) -> Result<RawObservation, FetchError>;
}

/// Live providers over a single blocking HTTP client.
pub struct HttpStatSource {
    ecos: EcosClient,
    fred: FredClient,
    daum: DaumClient,
}

impl HttpStatSource {
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            ecos: EcosClient::new(client.clone(), &config.ecos_base_url, &config.ecos_api_key),
            fred: FredClient::new(client.clone(), &config.fred_base_url, &config.fred_api_key),
            daum: DaumClient::new(client, &config.daum_quote_url),
        })
    }
}

impl StatSource for HttpStatSource {
    fn ecos_first_row(&self, query: &EcosQuery) -> Result<RawObservation, FetchError> {
        self.ecos.first_row(query)
    }

    fn fred_latest(&self, series_id: &str) -> Result<RawObservation, FetchError> {
        self.fred.latest(series_id)
    }

    fn spot_usd_krw(&self) -> Result<RawObservation, FetchError> {
        self.daum.usd_krw()
    }
}

/// A source with the network switched off: every call fails, so every
/// indicator takes its fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

impl StatSource for OfflineSource {
    fn ecos_first_row(&self, _query: &EcosQuery) -> Result<RawObservation, FetchError> {
        Err(FetchError::Offline {
            provider: Provider::Ecos,
        })
    }

    fn fred_latest(&self, _series_id: &str) -> Result<RawObservation, FetchError> {
        Err(FetchError::Offline {
            provider: Provider::Fred,
        })
    }

    fn spot_usd_krw(&self) -> Result<RawObservation, FetchError> {
        Err(FetchError::Offline {
            provider: Provider::Daum,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted `StatSource` used by fetcher and pipeline tests.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    pub struct ScriptedSource {
        /// ECOS responses keyed by statistic code.
        pub ecos: HashMap<&'static str, RawObservation>,
        pub fred: HashMap<String, RawObservation>,
        pub spot: Option<RawObservation>,
        /// Every call, in order (`ecos:<code>`, `fred:<series>`, `daum`).
        pub calls: RefCell<Vec<String>>,
    }

    impl ScriptedSource {
        pub fn with_ecos(mut self, stat_code: &'static str, value: f64, date: &str) -> Self {
            self.ecos.insert(stat_code, raw(value, Some(date)));
            self
        }

        pub fn with_fred(mut self, series_id: &str, value: f64, date: &str) -> Self {
            self.fred.insert(series_id.to_string(), raw(value, Some(date)));
            self
        }

        pub fn with_spot(mut self, value: f64) -> Self {
            self.spot = Some(raw(value, None));
            self
        }
    }

    fn raw(value: f64, date: Option<&str>) -> RawObservation {
        RawObservation {
            value,
            date: date.map(str::to_string),
            label: None,
        }
    }

    fn unavailable(provider: Provider) -> FetchError {
        FetchError::Status {
            provider,
            status: 503,
        }
    }

    impl StatSource for ScriptedSource {
        fn ecos_first_row(&self, query: &EcosQuery) -> Result<RawObservation, FetchError> {
            self.calls.borrow_mut().push(format!("ecos:{}", query.stat_code));
            self.ecos
                .get(query.stat_code)
                .cloned()
                .ok_or_else(|| unavailable(Provider::Ecos))
        }

        fn fred_latest(&self, series_id: &str) -> Result<RawObservation, FetchError> {
            self.calls.borrow_mut().push(format!("fred:{series_id}"));
            self.fred
                .get(series_id)
                .cloned()
                .ok_or_else(|| unavailable(Provider::Fred))
        }

        fn spot_usd_krw(&self) -> Result<RawObservation, FetchError> {
            self.calls.borrow_mut().push("daum".to_string());
            self.spot.clone().ok_or_else(|| unavailable(Provider::Daum))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::Catalog;

    #[test]
    fn offline_source_fails_every_call() {
        let catalog = Catalog::standard();
        let today = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
        let query = EcosQuery::window(&catalog.bond_3y, today);

        let src = OfflineSource;
        assert_eq!(src.ecos_first_row(&query).unwrap_err().provider(), Provider::Ecos);
        assert_eq!(src.fred_latest("DFEDTARU").unwrap_err().provider(), Provider::Fred);
        assert_eq!(src.spot_usd_krw().unwrap_err().provider(), Provider::Daum);
    }

    #[test]
    fn http_source_builds_with_placeholder_credentials() {
        let config = ProviderConfig::from_lookup(|_| None);
        assert!(HttpStatSource::new(&config, Duration::from_secs(5)).is_ok());
    }
}
