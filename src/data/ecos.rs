//! Bank of Korea ECOS `StatisticSearch` integration.

use chrono::{Duration, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::data::source::RawObservation;
use crate::domain::{Cycle, EcosSeries};
use crate::error::{FetchError, Provider, parse_number};

/// A single-row `StatisticSearch` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcosQuery {
    pub stat_code: &'static str,
    pub item_code: &'static str,
    pub cycle: Cycle,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl EcosQuery {
    /// Query `series` over its look-back window ending on `today`.
    pub fn window(series: &EcosSeries, today: NaiveDate) -> Self {
        Self {
            stat_code: series.stat_code,
            item_code: series.item_code,
            cycle: series.cycle,
            start: today - Duration::days(series.lookback_days),
            end: today,
        }
    }

    /// Path below the API base, with the key in its ECOS position.
    pub fn path(&self, api_key: &str) -> String {
        format!(
            "StatisticSearch/{api_key}/json/kr/1/1/{}/{}/{}/{}/{}",
            self.stat_code,
            self.cycle.code(),
            self.cycle.period(self.start),
            self.cycle.period(self.end),
            self.item_code,
        )
    }
}

pub struct EcosClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EcosClient {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Fetch the first row returned for `query`.
    pub fn first_row(&self, query: &EcosQuery) -> Result<RawObservation, FetchError> {
        let url = format!("{}/{}", self.base_url, query.path(&self.api_key));
        debug!(
            stat_code = query.stat_code,
            item_code = query.item_code,
            path = %query.path("***"),
            "ECOS request"
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|source| FetchError::Transport {
                provider: Provider::Ecos,
                source,
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                provider: Provider::Ecos,
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().map_err(|source| FetchError::Transport {
            provider: Provider::Ecos,
            source,
        })?;

        parse_statistic_search(&body)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "StatisticSearch")]
    statistic_search: Option<StatisticSearch>,
    /// ECOS answers errors (bad key, no data) with HTTP 200 and a `RESULT` object.
    #[serde(rename = "RESULT")]
    result: Option<EcosResult>,
}

#[derive(Debug, Deserialize)]
struct StatisticSearch {
    #[serde(default)]
    row: Vec<EcosRow>,
}

#[derive(Debug, Deserialize)]
struct EcosRow {
    #[serde(rename = "DATA_VALUE")]
    data_value: Option<String>,
    #[serde(rename = "TIME")]
    time: Option<String>,
    #[serde(rename = "ITEM_NAME1")]
    item_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EcosResult {
    #[serde(rename = "CODE", default)]
    code: String,
    #[serde(rename = "MESSAGE", default)]
    message: String,
}

/// Extract the first row of a `StatisticSearch` response body.
pub fn parse_statistic_search(body: &str) -> Result<RawObservation, FetchError> {
    let parsed: SearchResponse = serde_json::from_str(body).map_err(|e| FetchError::Decode {
        provider: Provider::Ecos,
        reason: e.to_string(),
    })?;

    let Some(search) = parsed.statistic_search else {
        return Err(match parsed.result {
            Some(result) => FetchError::Rejected {
                provider: Provider::Ecos,
                code: result.code,
                message: result.message,
            },
            None => FetchError::MissingField {
                provider: Provider::Ecos,
                field: "StatisticSearch",
            },
        });
    };

    let row = search.row.into_iter().next().ok_or(FetchError::MissingField {
        provider: Provider::Ecos,
        field: "row",
    })?;

    let raw_value = row.data_value.ok_or(FetchError::MissingField {
        provider: Provider::Ecos,
        field: "DATA_VALUE",
    })?;
    let date = row.time.ok_or(FetchError::MissingField {
        provider: Provider::Ecos,
        field: "TIME",
    })?;

    Ok(RawObservation {
        value: parse_number(Provider::Ecos, &raw_value)?,
        date: Some(date),
        label: row.item_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_path_uses_cycle_periods() {
        let series = EcosSeries {
            stat_code: "722Y001",
            item_code: "0101000",
            cycle: Cycle::Monthly,
            lookback_days: 60,
        };
        let today = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
        let query = EcosQuery::window(&series, today);
        assert_eq!(query.start, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert_eq!(
            query.path("KEY"),
            "StatisticSearch/KEY/json/kr/1/1/722Y001/M/202503/202505/0101000"
        );
    }

    #[test]
    fn daily_window_path() {
        let series = EcosSeries {
            stat_code: "817Y002",
            item_code: "010200000",
            cycle: Cycle::Daily,
            lookback_days: 7,
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(
            EcosQuery::window(&series, today).path("k"),
            "StatisticSearch/k/json/kr/1/1/817Y002/D/20241227/20250103/010200000"
        );
    }

    #[test]
    fn parses_first_row() {
        let body = r#"{
            "StatisticSearch": {
                "list_total_count": 2,
                "row": [
                    {"STAT_CODE": "817Y002", "ITEM_NAME1": "국고채(3년)", "TIME": "20250512", "DATA_VALUE": "2.385"},
                    {"STAT_CODE": "817Y002", "ITEM_NAME1": "국고채(3년)", "TIME": "20250513", "DATA_VALUE": "2.401"}
                ]
            }
        }"#;
        let obs = parse_statistic_search(body).unwrap();
        assert_eq!(obs.value, 2.385);
        assert_eq!(obs.date.as_deref(), Some("20250512"));
        assert_eq!(obs.label.as_deref(), Some("국고채(3년)"));
    }

    #[test]
    fn result_object_is_a_rejection() {
        let body = r#"{"RESULT": {"CODE": "INFO-200", "MESSAGE": "해당하는 데이터가 없습니다."}}"#;
        let err = parse_statistic_search(body).unwrap_err();
        match err {
            FetchError::Rejected { code, .. } => assert_eq!(code, "INFO-200"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_rows_and_bad_values_fail() {
        let empty = r#"{"StatisticSearch": {"list_total_count": 0, "row": []}}"#;
        assert!(matches!(
            parse_statistic_search(empty),
            Err(FetchError::MissingField { field: "row", .. })
        ));

        let bad = r#"{"StatisticSearch": {"row": [{"TIME": "202504", "DATA_VALUE": "-"}]}}"#;
        assert!(matches!(
            parse_statistic_search(bad),
            Err(FetchError::NotNumeric { .. })
        ));

        let no_value = r#"{"StatisticSearch": {"row": [{"TIME": "202504"}]}}"#;
        assert!(matches!(
            parse_statistic_search(no_value),
            Err(FetchError::MissingField { field: "DATA_VALUE", .. })
        ));

        assert!(matches!(
            parse_statistic_search("<html>"),
            Err(FetchError::Decode { .. })
        ));
        assert!(matches!(
            parse_statistic_search("{}"),
            Err(FetchError::MissingField { field: "StatisticSearch", .. })
        ));
    }
}
