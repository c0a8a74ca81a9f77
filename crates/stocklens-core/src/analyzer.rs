use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::advisory::{build_advisories, Advisory, AdvisoryThresholds};
use crate::domain::snapshot::fields;
use crate::metrics::{extract_key_metrics, KeyMetrics};
use crate::provider::{HistoryRequest, MarketData, ProviderError, ProviderId, SnapshotRequest};
use crate::{Period, PriceSeries, Ticker, ValidationError};

/// Failure of a whole-ticker analysis. Nothing partial survives: either a
/// complete report or one of these.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] ProviderError),

    #[error("no price history returned for '{ticker}' over {period}")]
    EmptyHistory { ticker: Ticker, period: Period },
}

/// Everything one render cycle needs, assembled from a single pair of
/// provider fetches. Recomputed from scratch on every invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub ticker: Ticker,
    /// Long company name when the provider knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub period: Period,
    pub metrics: KeyMetrics,
    pub series: PriceSeries,
    pub advisories: Vec<Advisory>,
}

impl AnalysisReport {
    /// Display heading: the company name, falling back to the ticker.
    pub fn heading(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.ticker.as_str())
    }
}

/// Stateless orchestrator: two sequential provider fetches, then pure
/// shaping. Holds no data between invocations.
pub struct Analyzer {
    provider: Arc<dyn MarketData>,
    thresholds: AdvisoryThresholds,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn MarketData>) -> Self {
        Self {
            provider,
            thresholds: AdvisoryThresholds::default(),
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: AdvisoryThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn provider_id(&self) -> ProviderId {
        self.provider.id()
    }

    /// Run one full analysis cycle for a ticker.
    ///
    /// Any provider error aborts the whole analysis; an empty price series
    /// is an error, never a silently empty chart.
    pub fn analyze(&self, ticker: &Ticker, period: Period) -> Result<AnalysisReport, AnalyzeError> {
        debug!(ticker = %ticker, provider = %self.provider.id(), "fetching fundamentals snapshot");
        let snapshot = self.provider.snapshot(&SnapshotRequest::new(ticker.clone()))?;

        debug!(ticker = %ticker, %period, "fetching price history");
        let series = self
            .provider
            .history(&HistoryRequest::new(ticker.clone(), period))?;
        if series.is_empty() {
            return Err(AnalyzeError::EmptyHistory {
                ticker: ticker.clone(),
                period,
            });
        }

        let metrics = extract_key_metrics(&snapshot);
        let advisories = build_advisories(&metrics, &self.thresholds);
        let name = snapshot.text(fields::LONG_NAME).map(str::to_owned);

        Ok(AnalysisReport {
            ticker: ticker.clone(),
            name,
            period,
            metrics,
            series,
            advisories,
        })
    }
}
