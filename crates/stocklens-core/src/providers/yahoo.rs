use std::sync::{Arc, Mutex};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::provider::{HistoryRequest, MarketData, ProviderError, ProviderId, SnapshotRequest};
use crate::{FundamentalsSnapshot, PricePoint, PriceSeries, Ticker, UtcDateTime, ValidationError};

const CHART_BASE: &str = "https://query2.finance.yahoo.com/v8/finance/chart";
const QUOTE_SUMMARY_BASE: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";

// quoteSummary modules covering every snapshot field the extractor reads.
const QUOTE_SUMMARY_MODULES: &str = "price,financialData,summaryDetail,defaultKeyStatistics";
const MODULE_MERGE_ORDER: [&str; 4] =
    ["price", "financialData", "summaryDetail", "defaultKeyStatistics"];

/// Yahoo Finance provider over the public chart and quoteSummary endpoints.
///
/// The quoteSummary endpoint requires a session cookie plus a crumb token.
/// The cookie lives in the transport's jar; the crumb is cached here and
/// refreshed exactly once if Yahoo rejects the session mid-flight.
pub struct YahooProvider {
    http: Arc<dyn HttpClient>,
    timeout_ms: u64,
    crumb: Mutex<Option<String>>,
}

impl YahooProvider {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            timeout_ms: 10_000,
            crumb: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
        let request = HttpRequest::get(url)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        self.http
            .get(&request)
            .map_err(|error| ProviderError::unavailable(error.message()))
    }

    fn cached_crumb(&self) -> Option<String> {
        self.crumb.lock().expect("crumb mutex poisoned").clone()
    }

    fn store_crumb(&self, crumb: Option<String>) {
        *self.crumb.lock().expect("crumb mutex poisoned") = crumb;
    }

    fn crumb(&self) -> Result<String, ProviderError> {
        if let Some(crumb) = self.cached_crumb() {
            return Ok(crumb);
        }
        self.refresh_crumb()
    }

    fn refresh_crumb(&self) -> Result<String, ProviderError> {
        debug!("refreshing yahoo session cookie and crumb");

        // The cookie endpoint answers 404; the visit only exists to land a
        // session cookie in the transport's jar.
        let _ = self.get(COOKIE_URL)?;

        let response = self.get(CRUMB_URL)?;
        if !response.is_success() {
            return Err(ProviderError::unavailable(format!(
                "crumb endpoint returned HTTP {}",
                response.status
            )));
        }

        let crumb = response.body.trim().to_owned();
        if crumb.is_empty() || crumb.contains('<') || crumb.contains('{') {
            return Err(ProviderError::malformed_response(
                "crumb endpoint returned no usable token",
            ));
        }

        self.store_crumb(Some(crumb.clone()));
        Ok(crumb)
    }

    fn quote_summary_url(&self, ticker: &Ticker, crumb: &str) -> String {
        format!(
            "{QUOTE_SUMMARY_BASE}/{}?modules={QUOTE_SUMMARY_MODULES}&crumb={}",
            encode(ticker.as_str()),
            encode(crumb)
        )
    }

    fn fetch_quote_summary(&self, ticker: &Ticker) -> Result<HttpResponse, ProviderError> {
        let crumb = self.crumb()?;
        let response = self.get(&self.quote_summary_url(ticker, &crumb))?;

        if matches!(response.status, 401 | 403) {
            warn!(ticker = %ticker, status = response.status, "yahoo session rejected, refreshing crumb");
            self.store_crumb(None);
            let crumb = self.refresh_crumb()?;
            return self.get(&self.quote_summary_url(ticker, &crumb));
        }

        Ok(response)
    }
}

impl MarketData for YahooProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn snapshot(&self, req: &SnapshotRequest) -> Result<FundamentalsSnapshot, ProviderError> {
        debug!(ticker = %req.ticker, "requesting yahoo quoteSummary");
        let response = self.fetch_quote_summary(&req.ticker)?;

        if response.status == 404 {
            return Err(ProviderError::unknown_ticker(
                &req.ticker,
                "quoteSummary endpoint returned HTTP 404",
            ));
        }
        if !response.is_success() {
            return Err(ProviderError::unavailable(format!(
                "quoteSummary endpoint returned HTTP {}",
                response.status
            )));
        }

        let envelope: QuoteSummaryEnvelope = serde_json::from_str(&response.body)
            .map_err(|error| {
                ProviderError::malformed_response(format!(
                    "quoteSummary payload did not parse: {error}"
                ))
            })?;

        if let Some(error) = envelope.quote_summary.error {
            return Err(api_error_to_provider(&req.ticker, &error));
        }

        let result = envelope
            .quote_summary
            .result
            .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
            .ok_or_else(|| {
                ProviderError::malformed_response("quoteSummary payload carried no result")
            })?;

        let Value::Object(modules) = result else {
            return Err(ProviderError::malformed_response(
                "quoteSummary result is not an object",
            ));
        };

        let mut snapshot = FundamentalsSnapshot::new();
        for module_name in MODULE_MERGE_ORDER {
            if let Some(Value::Object(module)) = modules.get(module_name) {
                flatten_module(module, &mut snapshot);
            }
        }

        if snapshot.is_empty() {
            return Err(ProviderError::malformed_response(format!(
                "quoteSummary returned no usable fields for '{}'",
                req.ticker
            )));
        }

        Ok(snapshot)
    }

    fn history(&self, req: &HistoryRequest) -> Result<PriceSeries, ProviderError> {
        let url = format!(
            "{CHART_BASE}/{}?interval=1d&range={}",
            encode(req.ticker.as_str()),
            req.period
        );
        debug!(ticker = %req.ticker, period = %req.period, "requesting yahoo chart");
        let response = self.get(&url)?;

        if response.status == 404 {
            return Err(ProviderError::unknown_ticker(
                &req.ticker,
                "chart endpoint returned HTTP 404",
            ));
        }
        if !response.is_success() {
            return Err(ProviderError::unavailable(format!(
                "chart endpoint returned HTTP {}",
                response.status
            )));
        }

        let envelope: ChartEnvelope = serde_json::from_str(&response.body).map_err(|error| {
            ProviderError::malformed_response(format!("chart payload did not parse: {error}"))
        })?;

        if let Some(error) = envelope.chart.error {
            return Err(api_error_to_provider(&req.ticker, &error));
        }

        let result = envelope
            .chart
            .result
            .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
            .ok_or_else(|| ProviderError::malformed_response("chart payload carried no result"))?;

        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|columns| columns.close)
            .unwrap_or_default();

        let mut points = Vec::with_capacity(result.timestamp.len());
        for (seconds, close) in result.timestamp.iter().zip(closes) {
            // Null slots are non-trading days; skip rather than invent a price.
            let Some(close) = close else { continue };
            let ts = UtcDateTime::from_unix_timestamp(*seconds).map_err(validation_to_error)?;
            points.push(PricePoint::new(ts, close).map_err(validation_to_error)?);
        }

        if points.is_empty() {
            return Err(ProviderError::malformed_response(format!(
                "chart returned no usable close prices for '{}'",
                req.ticker
            )));
        }

        PriceSeries::new(req.ticker.clone(), req.period, points).map_err(validation_to_error)
    }
}

/// Merge one quoteSummary module into the snapshot; earlier modules win.
/// `{raw, fmt}` wrappers contribute their `raw` value, scalars pass
/// through, arrays/nulls/empty wrappers are dropped.
fn flatten_module(module: &serde_json::Map<String, Value>, out: &mut FundamentalsSnapshot) {
    for (name, value) in module {
        match value {
            Value::Number(_) | Value::String(_) | Value::Bool(_) => {
                out.insert_if_absent(name.clone(), value.clone());
            }
            Value::Object(wrapped) => {
                if let Some(raw) = wrapped.get("raw") {
                    if !raw.is_null() {
                        out.insert_if_absent(name.clone(), raw.clone());
                    }
                }
            }
            _ => {}
        }
    }
}

fn api_error_to_provider(ticker: &Ticker, error: &ApiError) -> ProviderError {
    let detail = error
        .description
        .clone()
        .unwrap_or_else(|| error.code.clone());

    if error.code.eq_ignore_ascii_case("not found") {
        ProviderError::unknown_ticker(ticker, detail)
    } else {
        ProviderError::unavailable(format!("{}: {detail}", error.code))
    }
}

fn validation_to_error(error: ValidationError) -> ProviderError {
    ProviderError::malformed_response(error.to_string())
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartNode,
}

#[derive(Debug, Deserialize)]
struct ChartNode {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuoteColumns>,
}

#[derive(Debug, Deserialize)]
struct ChartQuoteColumns {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryNode,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryNode {
    #[serde(default)]
    result: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<ApiError>,
}
