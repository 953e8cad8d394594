use thiserror::Error;

/// Fatal application error carrying the process exit code.
///
/// Exit codes: `2` local I/O or input problems, `3` nothing to report,
/// `4` HTTP client setup failures.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// External data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Bank of Korea Economic Statistics System.
    Ecos,
    /// St. Louis Fed FRED.
    Fred,
    /// Daum Finance exchange quotes.
    Daum,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Provider::Ecos => "ECOS",
            Provider::Fred => "FRED",
            Provider::Daum => "Daum",
        })
    }
}

/// A value could not be obtained from a provider.
///
/// Every variant means the same thing to the pipeline (use the fallback); the
/// variants only exist so the log line says what went wrong.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{provider}: request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider}: HTTP status {status}")]
    Status { provider: Provider, status: u16 },
    #[error("{provider}: could not decode response: {reason}")]
    Decode { provider: Provider, reason: String },
    #[error("{provider}: provider rejected the query ({code}: {message})")]
    Rejected {
        provider: Provider,
        code: String,
        message: String,
    },
    #[error("{provider}: response is missing `{field}`")]
    MissingField {
        provider: Provider,
        field: &'static str,
    },
    #[error("{provider}: `{raw}` is not a number")]
    NotNumeric { provider: Provider, raw: String },
    #[error("{provider}: network access disabled for this run")]
    Offline { provider: Provider },
}

impl FetchError {
    pub fn provider(&self) -> Provider {
        match self {
            FetchError::Transport { provider, .. }
            | FetchError::Status { provider, .. }
            | FetchError::Decode { provider, .. }
            | FetchError::Rejected { provider, .. }
            | FetchError::MissingField { provider, .. }
            | FetchError::NotNumeric { provider, .. }
            | FetchError::Offline { provider } => *provider,
        }
    }
}

/// Parse a provider's numeric field.
///
/// Empty strings, FRED's `"."` missing marker and non-finite values are
/// rejected.
pub fn parse_number(provider: Provider, raw: &str) -> Result<f64, FetchError> {
    let trimmed = raw.trim();
    let not_numeric = || FetchError::NotNumeric {
        provider,
        raw: raw.to_string(),
    };
    if trimmed.is_empty() || trimmed == "." {
        return Err(not_numeric());
    }
    // ECOS formats large values with thousands separators in some tables.
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(not_numeric()),
    }
}
