use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::domain::snapshot::fields;
use crate::format::{
    currency_symbol, format_currency, format_market_cap, format_percent, format_ratio,
};
use crate::FundamentalsSnapshot;

/// Metric display labels, fixed per the dashboard layout.
pub mod labels {
    pub const CURRENT_PRICE: &str = "Current Price";
    pub const MARKET_CAP: &str = "Market Cap";
    pub const PE_RATIO: &str = "P/E Ratio";
    pub const PRICE_TO_BOOK: &str = "Price to Book";
    pub const FORWARD_PE: &str = "Forward P/E";
    pub const DIVIDEND_YIELD: &str = "Dividend Yield";
    pub const DIVIDEND_RATE: &str = "Dividend Rate";
    pub const PAYOUT_RATIO: &str = "Payout Ratio";
    pub const FIFTY_TWO_WEEK_HIGH: &str = "52-Week High";
    pub const FIFTY_TWO_WEEK_LOW: &str = "52-Week Low";
    pub const ONE_YEAR_RETURN: &str = "1Y Return";
    pub const EPS_TRAILING: &str = "EPS (Trailing)";
    pub const EPS_FORWARD: &str = "EPS (Forward)";
    pub const REVENUE_GROWTH: &str = "Revenue Growth";
}

/// Fixed metric categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupName {
    Valuation,
    Dividend,
    Performance,
    Growth,
}

impl GroupName {
    pub const ALL: [Self; 4] = [
        Self::Valuation,
        Self::Dividend,
        Self::Performance,
        Self::Growth,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Valuation => "Valuation",
            Self::Dividend => "Dividend",
            Self::Performance => "Performance",
            Self::Growth => "Growth",
        }
    }
}

impl Display for GroupName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dashboard tile: a label, the final display string, and the numeric
/// value backing it.
///
/// `value` is in display units: percent metrics carry percent points (a
/// yield of 0.0301 reads as `Some(3.01)`), everything else carries the raw
/// number. Display strings are final and never re-parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Named category of metrics in fixed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricGroup {
    pub name: GroupName,
    pub metrics: Vec<Metric>,
}

/// The four dashboard groups: Valuation (5), Dividend (3), Performance (3),
/// Growth (3), always in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub groups: Vec<MetricGroup>,
}

impl KeyMetrics {
    pub fn group(&self, name: GroupName) -> &MetricGroup {
        self.groups
            .iter()
            .find(|group| group.name == name)
            .expect("all four groups are always present")
    }

    pub fn metric(&self, name: GroupName, label: &str) -> Option<&Metric> {
        self.group(name)
            .metrics
            .iter()
            .find(|metric| metric.label == label)
    }

    fn value(&self, name: GroupName, label: &str) -> Option<f64> {
        self.metric(name, label)?.value
    }

    /// Trailing P/E, the valuation advisory input.
    pub fn pe_ratio(&self) -> Option<f64> {
        self.value(GroupName::Valuation, labels::PE_RATIO)
    }

    /// Dividend yield in percent points, the dividend advisory input.
    pub fn dividend_yield_pct(&self) -> Option<f64> {
        self.value(GroupName::Dividend, labels::DIVIDEND_YIELD)
    }

    /// Revenue growth in percent points, the growth advisory input.
    pub fn revenue_growth_pct(&self) -> Option<f64> {
        self.value(GroupName::Growth, labels::REVENUE_GROWTH)
    }
}

/// Shape a provider snapshot into the four fixed metric groups.
///
/// Pure: absent fields substitute their documented default (`0` for
/// ratio/percent fields, `N/A` for currency fields) and never error.
pub fn extract_key_metrics(snapshot: &FundamentalsSnapshot) -> KeyMetrics {
    let symbol = currency_symbol(snapshot.text(fields::CURRENCY).unwrap_or("USD"));

    let currency = |label: &'static str, field: &str| {
        let value = snapshot.number(field);
        Metric {
            label,
            display: format_currency(&symbol, value),
            value,
        }
    };

    // Defaults to 0 when absent, matching the documented default and the
    // verdict the thresholds then produce.
    let ratio = |label: &'static str, field: &str| {
        let value = snapshot.number(field).unwrap_or(0.0);
        Metric {
            label,
            display: format_ratio(value),
            value: Some(value),
        }
    };

    let percent = |label: &'static str, field: &str| {
        let fraction = snapshot.number(field).unwrap_or(0.0);
        Metric {
            label,
            display: format_percent(fraction),
            value: Some(fraction * 100.0),
        }
    };

    let market_cap = snapshot.number(fields::MARKET_CAP);

    KeyMetrics {
        groups: vec![
            MetricGroup {
                name: GroupName::Valuation,
                metrics: vec![
                    currency(labels::CURRENT_PRICE, fields::CURRENT_PRICE),
                    Metric {
                        label: labels::MARKET_CAP,
                        display: format_market_cap(&symbol, market_cap),
                        value: market_cap,
                    },
                    ratio(labels::PE_RATIO, fields::TRAILING_PE),
                    ratio(labels::PRICE_TO_BOOK, fields::PRICE_TO_BOOK),
                    ratio(labels::FORWARD_PE, fields::FORWARD_PE),
                ],
            },
            MetricGroup {
                name: GroupName::Dividend,
                metrics: vec![
                    percent(labels::DIVIDEND_YIELD, fields::DIVIDEND_YIELD),
                    currency(labels::DIVIDEND_RATE, fields::DIVIDEND_RATE),
                    percent(labels::PAYOUT_RATIO, fields::PAYOUT_RATIO),
                ],
            },
            MetricGroup {
                name: GroupName::Performance,
                metrics: vec![
                    currency(labels::FIFTY_TWO_WEEK_HIGH, fields::FIFTY_TWO_WEEK_HIGH),
                    currency(labels::FIFTY_TWO_WEEK_LOW, fields::FIFTY_TWO_WEEK_LOW),
                    percent(labels::ONE_YEAR_RETURN, fields::FIFTY_TWO_WEEK_CHANGE),
                ],
            },
            MetricGroup {
                name: GroupName::Growth,
                metrics: vec![
                    ratio(labels::EPS_TRAILING, fields::TRAILING_EPS),
                    ratio(labels::EPS_FORWARD, fields::FORWARD_EPS),
                    percent(labels::REVENUE_GROWTH, fields::REVENUE_GROWTH),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_snapshot() -> FundamentalsSnapshot {
        FundamentalsSnapshot::new()
            .with(fields::CURRENCY, "INR")
            .with(fields::CURRENT_PRICE, 1543.2)
            .with(fields::MARKET_CAP, 6_412_000_000_000.0_f64)
            .with(fields::TRAILING_PE, 27.447)
            .with(fields::PRICE_TO_BOOK, 7.1)
            .with(fields::FORWARD_PE, 24.9)
            .with(fields::DIVIDEND_YIELD, 0.0215)
            .with(fields::DIVIDEND_RATE, 34.0)
            .with(fields::PAYOUT_RATIO, 0.61)
            .with(fields::FIFTY_TWO_WEEK_HIGH, 1731.0)
            .with(fields::FIFTY_TWO_WEEK_LOW, 1311.3)
            .with(fields::FIFTY_TWO_WEEK_CHANGE, 0.112)
            .with(fields::TRAILING_EPS, 56.23)
            .with(fields::FORWARD_EPS, 61.9)
            .with(fields::REVENUE_GROWTH, 0.041)
    }

    #[test]
    fn groups_have_fixed_shape_and_order() {
        let metrics = extract_key_metrics(&full_snapshot());

        let shapes: Vec<(GroupName, usize)> = metrics
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

        let valuation_labels: Vec<&str> = metrics
            .group(GroupName::Valuation)
            .metrics
            .iter()
            .map(|metric| metric.label)
            .collect();
        assert_eq!(
            valuation_labels,
            vec![
                labels::CURRENT_PRICE,
                labels::MARKET_CAP,
                labels::PE_RATIO,
                labels::PRICE_TO_BOOK,
                labels::FORWARD_PE,
            ]
        );
    }

    #[test]
    fn formats_follow_field_class() {
        let metrics = extract_key_metrics(&full_snapshot());

        assert_eq!(
            metrics
                .metric(GroupName::Valuation, labels::CURRENT_PRICE)
                .expect("present")
                .display,
            "₹1543.20"
        );
        assert_eq!(
            metrics
                .metric(GroupName::Valuation, labels::MARKET_CAP)
                .expect("present")
                .display,
            "₹6,412,000,000,000"
        );
        assert_eq!(
            metrics
                .metric(GroupName::Dividend, labels::DIVIDEND_YIELD)
                .expect("present")
                .display,
            "2.15%"
        );
        assert_eq!(
            metrics
                .metric(GroupName::Growth, labels::EPS_TRAILING)
                .expect("present")
                .display,
            "56.23"
        );
    }

    #[test]
    fn percent_values_carry_percent_points() {
        let metrics = extract_key_metrics(&full_snapshot());

        let yield_pct = metrics.dividend_yield_pct().expect("present");
        assert!((yield_pct - 2.15).abs() < 1e-9);
        assert!((metrics.revenue_growth_pct().expect("present") - 4.1).abs() < 1e-9);
    }

    #[test]
    fn empty_snapshot_yields_documented_defaults() {
        let metrics = extract_key_metrics(&FundamentalsSnapshot::new());

        assert_eq!(
            metrics
                .metric(GroupName::Valuation, labels::CURRENT_PRICE)
                .expect("present")
                .display,
            "N/A"
        );
        assert_eq!(
            metrics
                .metric(GroupName::Performance, labels::FIFTY_TWO_WEEK_HIGH)
                .expect("present")
                .display,
            "N/A"
        );
        assert_eq!(
            metrics
                .metric(GroupName::Valuation, labels::PE_RATIO)
                .expect("present")
                .display,
            "0.00"
        );
        assert_eq!(
            metrics
                .metric(GroupName::Dividend, labels::DIVIDEND_YIELD)
                .expect("present")
                .display,
            "0.00%"
        );

        // Zero-default fields still feed the advisory layer as numbers.
        assert_eq!(metrics.pe_ratio(), Some(0.0));
        assert_eq!(metrics.dividend_yield_pct(), Some(0.0));
        assert_eq!(metrics.revenue_growth_pct(), Some(0.0));
    }

    #[test]
    fn missing_currency_defaults_to_dollar() {
        let snapshot = FundamentalsSnapshot::new().with(fields::CURRENT_PRICE, 12.5);
        let metrics = extract_key_metrics(&snapshot);

        assert_eq!(
            metrics
                .metric(GroupName::Valuation, labels::CURRENT_PRICE)
                .expect("present")
                .display,
            "$12.50"
        );
    }
}
