//! FRED API integration for the US policy-rate reference series.

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::data::source::RawObservation;
use crate::error::{FetchError, Provider, parse_number};

pub struct FredClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FredClient {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Most recent observation of `series_id`.
    pub fn latest(&self, series_id: &str) -> Result<RawObservation, FetchError> {
        debug!(series_id, "FRED request");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("sort_order", "desc"),
                ("limit", "1"),
            ])
            .send()
            .map_err(|source| FetchError::Transport {
                provider: Provider::Fred,
                source,
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                provider: Provider::Fred,
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().map_err(|source| FetchError::Transport {
            provider: Provider::Fred,
            source,
        })?;

        parse_latest_observation(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Option<Vec<Observation>>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

/// Extract the first (latest, with `sort_order=desc`) observation.
pub fn parse_latest_observation(body: &str) -> Result<RawObservation, FetchError> {
    let parsed: ObservationsResponse = serde_json::from_str(body).map_err(|e| FetchError::Decode {
        provider: Provider::Fred,
        reason: e.to_string(),
    })?;

    let obs = parsed
        .observations
        .and_then(|list| list.into_iter().next())
        .ok_or(FetchError::MissingField {
            provider: Provider::Fred,
            field: "observations",
        })?;

    Ok(RawObservation {
        value: parse_number(Provider::Fred, &obs.value)?,
        date: Some(obs.date),
        label: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_latest_observation() {
        let body = r#"{
            "realtime_start": "2025-05-14",
            "count": 3000,
            "limit": 1,
            "observations": [
                {"realtime_start": "2025-05-14", "realtime_end": "2025-05-14", "date": "2025-05-13", "value": "4.50"}
            ]
        }"#;
        let obs = parse_latest_observation(body).unwrap();
        assert_eq!(obs.value, 4.5);
        assert_eq!(obs.date.as_deref(), Some("2025-05-13"));
    }

    #[test]
    fn missing_marker_is_not_numeric() {
        let body = r#"{"observations": [{"date": "2025-05-13", "value": "."}]}"#;
        assert!(matches!(
            parse_latest_observation(body),
            Err(FetchError::NotNumeric { .. })
        ));
    }

    #[test]
    fn error_payload_has_no_observations() {
        // FRED answers a bad key with an error object instead of observations.
        let body = r#"{"error_code": 400, "error_message": "Bad Request.  The value for variable api_key is not registered."}"#;
        assert!(matches!(
            parse_latest_observation(body),
            Err(FetchError::MissingField { field: "observations", .. })
        ));

        let empty = r#"{"observations": []}"#;
        assert!(parse_latest_observation(empty).is_err());
    }
}
