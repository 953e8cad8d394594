//! Daum Finance spot quote for USD/KRW.
//!
//! The endpoint is the one the Daum Finance web page calls itself; it answers
//! only with a browser-like `User-Agent` and a Daum `Referer`.

use reqwest::blocking::Client;
use reqwest::header::{REFERER, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::data::source::RawObservation;
use crate::error::{FetchError, Provider, parse_number};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0";
const DAUM_REFERER: &str = "https://finance.daum.net/";

pub struct DaumClient {
    client: Client,
    quote_url: String,
}

impl DaumClient {
    pub fn new(client: Client, quote_url: &str) -> Self {
        Self {
            client,
            quote_url: quote_url.to_string(),
        }
    }

    /// Current USD/KRW base price. The response carries no usable date, so
    /// `date` is left empty for the caller to stamp.
    pub fn usd_krw(&self) -> Result<RawObservation, FetchError> {
        debug!(url = %self.quote_url, "Daum request");

        let resp = self
            .client
            .get(&self.quote_url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(REFERER, DAUM_REFERER)
            .send()
            .map_err(|source| FetchError::Transport {
                provider: Provider::Daum,
                source,
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                provider: Provider::Daum,
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().map_err(|source| FetchError::Transport {
            provider: Provider::Daum,
            source,
        })?;

        parse_quote(&body)
    }
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "basePrice")]
    base_price: Option<Value>,
}

pub fn parse_quote(body: &str) -> Result<RawObservation, FetchError> {
    let parsed: QuoteResponse = serde_json::from_str(body).map_err(|e| FetchError::Decode {
        provider: Provider::Daum,
        reason: e.to_string(),
    })?;

    let value = match parsed.base_price {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).ok_or_else(|| FetchError::NotNumeric {
            provider: Provider::Daum,
            raw: n.to_string(),
        })?,
        Some(Value::String(s)) => parse_number(Provider::Daum, &s)?,
        Some(other) => {
            return Err(FetchError::NotNumeric {
                provider: Provider::Daum,
                raw: other.to_string(),
            });
        }
        None => {
            return Err(FetchError::MissingField {
                provider: Provider::Daum,
                field: "basePrice",
            });
        }
    };

    Ok(RawObservation {
        value,
        date: None,
        label: None,
    })
}
