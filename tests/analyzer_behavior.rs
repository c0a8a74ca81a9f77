//! Behavior-driven tests for the analysis pipeline.
//!
//! These verify HOW the system behaves across whole analysis cycles:
//! complete reports on success, single errors with no partial data on
//! failure, and threshold classification driven by real snapshots.

use std::sync::Arc;

use stocklens_core::domain::snapshot::fields;
use stocklens_core::{
    AnalysisReport, AnalyzeError, Analyzer, FundamentalsSnapshot, GroupName, HistoryRequest,
    MarketData, Period, PricePoint, PriceSeries, ProviderError, ProviderId, SampleProvider,
    SnapshotRequest, Ticker, UtcDateTime, ValidationError, Verdict,
};

// =============================================================================
// Test doubles
// =============================================================================

/// Provider double answering with pre-baked results.
struct FixtureProvider {
    snapshot: Result<FundamentalsSnapshot, ProviderError>,
    history: Result<PriceSeries, ProviderError>,
}

impl MarketData for FixtureProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Sample
    }

    fn snapshot(&self, _req: &SnapshotRequest) -> Result<FundamentalsSnapshot, ProviderError> {
        self.snapshot.clone()
    }

    fn history(&self, _req: &HistoryRequest) -> Result<PriceSeries, ProviderError> {
        self.history.clone()
    }
}

fn ticker(symbol: &str) -> Ticker {
    Ticker::parse(symbol).expect("valid ticker")
}

fn series_of(symbol: &str, closes: &[f64]) -> PriceSeries {
    let points = closes
        .iter()
        .enumerate()
        .map(|(index, close)| {
            let ts = UtcDateTime::from_unix_timestamp(1_704_067_200 + index as i64 * 86_400)
                .expect("timestamp");
            PricePoint::new(ts, *close).expect("point")
        })
        .collect();
    PriceSeries::new(ticker(symbol), Period::OneYear, points).expect("series")
}

fn analyze_snapshot(snapshot: FundamentalsSnapshot) -> AnalysisReport {
    let provider = FixtureProvider {
        snapshot: Ok(snapshot),
        history: Ok(series_of("AAPL", &[100.0, 101.5, 99.8])),
    };
    Analyzer::new(Arc::new(provider))
        .analyze(&ticker("AAPL"), Period::OneYear)
        .expect("analysis should succeed")
}

// =============================================================================
// Happy path
// =============================================================================

#[test]
fn user_receives_a_complete_report_from_one_analysis() {
    // Given: An analyzer over the offline sample provider
    let analyzer = Analyzer::new(Arc::new(SampleProvider));

    // When: A ticker is analyzed
    let report = analyzer
        .analyze(&ticker("AAPL"), Period::OneYear)
        .expect("sample analysis succeeds");

    // Then: All four groups arrive in fixed order and shape
    let shapes: Vec<(GroupName, usize)> = report
        .metrics
        .groups
        .iter()
        .map(|group| (group.name, group.metrics.len()))
        .collect();
    assert_eq!(
        shapes,
        vec![
            (GroupName::Valuation, 5),
            (GroupName::Dividend, 3),
            (GroupName::Performance, 3),
            (GroupName::Growth, 3),
        ]
    );

    // And: The chart input and the three advisories are present
    assert!(!report.series.is_empty());
    assert_eq!(report.advisories.len(), 3);
    assert!(report.heading().contains("AAPL"));
}

#[test]
fn report_serializes_for_machine_consumption() {
    let analyzer = Analyzer::new(Arc::new(SampleProvider));
    let report = analyzer
        .analyze(&ticker("MSFT"), Period::ThreeMonths)
        .expect("sample analysis succeeds");

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["period"], "3mo");
    assert_eq!(json["metrics"]["groups"][0]["name"], "valuation");
    assert_eq!(json["advisories"].as_array().expect("advisories").len(), 3);
}

// =============================================================================
// Failure modes
// =============================================================================

#[test]
fn when_snapshot_fetch_fails_nothing_partial_survives() {
    // Given: A provider whose fundamentals endpoint is down
    let provider = FixtureProvider {
        snapshot: Err(ProviderError::unavailable("connection refused")),
        history: Ok(series_of("AAPL", &[100.0])),
    };
    let analyzer = Analyzer::new(Arc::new(provider));

    // When: The analysis runs
    let err = analyzer
        .analyze(&ticker("AAPL"), Period::OneYear)
        .expect_err("must fail");

    // Then: One fetch error, no report
    assert!(matches!(err, AnalyzeError::Fetch(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn when_history_fetch_fails_the_whole_analysis_aborts() {
    let provider = FixtureProvider {
        snapshot: Ok(FundamentalsSnapshot::new().with(fields::TRAILING_PE, 12.0)),
        history: Err(ProviderError::unknown_ticker(
            &ticker("ZZZZZZ"),
            "no data found",
        )),
    };
    let analyzer = Analyzer::new(Arc::new(provider));

    let err = analyzer
        .analyze(&ticker("ZZZZZZ"), Period::OneYear)
        .expect_err("must fail");
    assert!(matches!(err, AnalyzeError::Fetch(_)));
}

#[test]
fn when_history_is_empty_no_chart_is_rendered_silently() {
    let provider = FixtureProvider {
        snapshot: Ok(FundamentalsSnapshot::new()),
        history: Ok(
            PriceSeries::new(ticker("AAPL"), Period::OneYear, Vec::new()).expect("empty series"),
        ),
    };
    let analyzer = Analyzer::new(Arc::new(provider));

    let err = analyzer
        .analyze(&ticker("AAPL"), Period::OneYear)
        .expect_err("must fail");
    assert!(matches!(err, AnalyzeError::EmptyHistory { .. }));
}

#[test]
fn empty_ticker_is_rejected_before_any_fetch() {
    let err = Ticker::parse("   ").expect_err("must fail");
    assert!(matches!(err, ValidationError::EmptyTicker));
}

// =============================================================================
// Threshold classification over real snapshots
// =============================================================================

#[test]
fn rich_snapshot_classifies_across_all_three_signals() {
    // Given: A snapshot that is cheap, high-yield, and fast-growing
    let snapshot = FundamentalsSnapshot::new()
        .with(fields::TRAILING_PE, 12.4)
        .with(fields::DIVIDEND_YIELD, 0.045)
        .with(fields::REVENUE_GROWTH, 0.16);

    // When: The analysis runs
    let report = analyze_snapshot(snapshot);

    // Then: All three advisories come back green
    let verdicts: Vec<Verdict> = report
        .advisories
        .iter()
        .map(|advisory| advisory.verdict)
        .collect();
    assert_eq!(
        verdicts,
        vec![Verdict::Success, Verdict::Success, Verdict::Success]
    );
    assert_eq!(report.advisories[0].message, "Potentially Undervalued");
    assert_eq!(report.advisories[1].message, "High Dividend Yield");
    assert_eq!(report.advisories[2].message, "Strong Growth Potential");
}

#[test]
fn absent_fields_classify_like_the_documented_zero_defaults() {
    // Given: A snapshot missing every advisory input
    let report = analyze_snapshot(FundamentalsSnapshot::new());

    // Then: Zero defaults flow through the thresholds, never a crash
    assert_eq!(report.advisories[0].message, "Potentially Undervalued");
    assert_eq!(report.advisories[0].verdict, Verdict::Success);
    assert_eq!(report.advisories[1].message, "Low Dividend Yield");
    assert_eq!(report.advisories[1].verdict, Verdict::Warning);
    assert_eq!(report.advisories[2].message, "Limited Growth");
    assert_eq!(report.advisories[2].verdict, Verdict::Warning);
}

#[test]
fn boundary_values_land_in_the_middle_branch() {
    let snapshot = FundamentalsSnapshot::new()
        .with(fields::TRAILING_PE, 15.0)
        .with(fields::DIVIDEND_YIELD, 0.03)
        .with(fields::REVENUE_GROWTH, 0.10);

    let report = analyze_snapshot(snapshot);

    assert_eq!(report.advisories[0].message, "Reasonable Valuation");
    assert_eq!(report.advisories[1].message, "Moderate Dividend");
    assert_eq!(report.advisories[2].message, "Moderate Growth");
    assert!(report
        .advisories
        .iter()
        .all(|advisory| advisory.verdict == Verdict::Info));
}

#[test]
fn formatted_displays_never_feed_the_classifier() {
    // A snapshot with a numeric-string yield still classifies, because the
    // metric carries the parsed number, not the rendered "x.xx%" text.
    let snapshot = FundamentalsSnapshot::new().with(fields::DIVIDEND_YIELD, "0.0375");

    let report = analyze_snapshot(snapshot);

    assert_eq!(report.advisories[1].message, "High Dividend Yield");
    let metric = report
        .metrics
        .metric(GroupName::Dividend, "Dividend Yield")
        .expect("present");
    assert_eq!(metric.display, "3.75%");
    assert_eq!(metric.value, Some(3.75));
}
