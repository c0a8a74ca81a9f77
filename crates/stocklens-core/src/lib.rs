//! Core contracts for stocklens.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The replaceable market-data provider seam and its implementations
//! - Pure metric extraction, formatting, and advisory classification
//! - The analyzer that assembles one report per invocation

pub mod advisory;
pub mod analyzer;
pub mod domain;
pub mod error;
pub mod format;
pub mod http;
pub mod metrics;
pub mod provider;
pub mod providers;

pub use advisory::{build_advisories, Advisory, AdvisoryThresholds, Signal, Verdict};
pub use analyzer::{AnalysisReport, AnalyzeError, Analyzer};
pub use domain::{FundamentalsSnapshot, Period, PricePoint, PriceSeries, Ticker, UtcDateTime};
pub use error::ValidationError;
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};
pub use metrics::{extract_key_metrics, GroupName, KeyMetrics, Metric, MetricGroup};
pub use provider::{
    HistoryRequest, MarketData, ProviderError, ProviderErrorKind, ProviderId, SnapshotRequest,
};
pub use providers::{SampleProvider, YahooProvider};
