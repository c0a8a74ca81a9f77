use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{FundamentalsSnapshot, Period, PriceSeries, Ticker, ValidationError};

/// Canonical provider identifiers used in report metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Yahoo,
    Sample,
}

impl ProviderId {
    pub const ALL: [Self; 2] = [Self::Yahoo, Self::Sample];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Sample => "sample",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "sample" => Ok(Self::Sample),
            other => Err(ValidationError::InvalidSource {
                value: other.to_owned(),
            }),
        }
    }
}

/// Provider-level error classification.
///
/// Every kind is a fetch failure: any of them voids the whole analysis for
/// the requested ticker. There is no partial-data path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Unavailable,
    UnknownTicker,
    MalformedResponse,
    InvalidRequest,
}

/// Structured error reported by a market-data provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn unknown_ticker(ticker: &Ticker, detail: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::UnknownTicker,
            message: format!("unknown ticker '{ticker}': {}", detail.into()),
        }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::MalformedResponse,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::Unavailable => "provider.unavailable",
            ProviderErrorKind::UnknownTicker => "provider.unknown_ticker",
            ProviderErrorKind::MalformedResponse => "provider.malformed_response",
            ProviderErrorKind::InvalidRequest => "provider.invalid_request",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

/// Request payload for fundamentals snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRequest {
    pub ticker: Ticker,
}

impl SnapshotRequest {
    pub fn new(ticker: Ticker) -> Self {
        Self { ticker }
    }
}

/// Request payload for trailing price history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub ticker: Ticker,
    pub period: Period,
}

impl HistoryRequest {
    pub fn new(ticker: Ticker, period: Period) -> Self {
        Self { ticker, period }
    }
}

/// Market-data provider contract, the only seam to the outside world.
///
/// Both operations are synchronous and uncached: every call re-fetches.
pub trait MarketData: Send + Sync {
    fn id(&self) -> ProviderId;
    fn snapshot(&self, req: &SnapshotRequest) -> Result<FundamentalsSnapshot, ProviderError>;
    fn history(&self, req: &HistoryRequest) -> Result<PriceSeries, ProviderError>;
}
