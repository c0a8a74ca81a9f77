use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::KeyMetrics;

/// Severity attached to a heuristic judgment, for display coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Success,
    Info,
    Warning,
}

/// The three advisory signals, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Valuation,
    DividendHealth,
    GrowthPotential,
}

impl Signal {
    pub const ALL: [Self; 3] = [Self::Valuation, Self::DividendHealth, Self::GrowthPotential];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Valuation => "valuation",
            Self::DividendHealth => "dividend_health",
            Self::GrowthPotential => "growth_potential",
        }
    }

    /// Banner heading shown next to the verdict.
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Valuation => "Valuation Indicator",
            Self::DividendHealth => "Dividend Health",
            Self::GrowthPotential => "Growth Potential",
        }
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One threshold-based judgment over the extracted metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub signal: Signal,
    pub verdict: Verdict,
    pub message: &'static str,
}

const INSUFFICIENT_DATA: &str = "Insufficient Data";

/// Heuristic cutoffs for the three signals.
///
/// These are product-tuned numbers, not derived quantities; `Default`
/// reproduces the shipped constants. Percent thresholds are in percent
/// points, matching `Metric::value` for percent metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisoryThresholds {
    /// P/E strictly below this is undervalued.
    pub pe_undervalued: f64,
    /// P/E strictly above this is overvalued.
    pub pe_overvalued: f64,
    /// Yield strictly above this is high.
    pub yield_high_pct: f64,
    /// Yield strictly above this (but not high) is moderate.
    pub yield_moderate_pct: f64,
    /// Revenue growth strictly above this is strong.
    pub growth_strong_pct: f64,
    /// Revenue growth strictly above this (but not strong) is moderate.
    pub growth_moderate_pct: f64,
}

impl Default for AdvisoryThresholds {
    fn default() -> Self {
        Self {
            pe_undervalued: 15.0,
            pe_overvalued: 25.0,
            yield_high_pct: 3.0,
            yield_moderate_pct: 1.0,
            growth_strong_pct: 10.0,
            growth_moderate_pct: 5.0,
        }
    }
}

/// Classify the extracted metrics into the three fixed advisories.
///
/// Pure, no I/O. Boundary values (P/E of exactly 15 or 25, yield of
/// exactly 3 or 1, growth of exactly 10 or 5) land in the middle branch.
/// A metric with no backing number degrades to a neutral `Info` verdict.
pub fn build_advisories(metrics: &KeyMetrics, thresholds: &AdvisoryThresholds) -> Vec<Advisory> {
    vec![
        classify_valuation(metrics.pe_ratio(), thresholds),
        classify_dividend(metrics.dividend_yield_pct(), thresholds),
        classify_growth(metrics.revenue_growth_pct(), thresholds),
    ]
}

fn classify_valuation(pe_ratio: Option<f64>, thresholds: &AdvisoryThresholds) -> Advisory {
    let (verdict, message) = match pe_ratio {
        Some(pe) if pe < thresholds.pe_undervalued => {
            (Verdict::Success, "Potentially Undervalued")
        }
        Some(pe) if pe > thresholds.pe_overvalued => (Verdict::Warning, "Potentially Overvalued"),
        Some(_) => (Verdict::Info, "Reasonable Valuation"),
        None => (Verdict::Info, INSUFFICIENT_DATA),
    };

    Advisory {
        signal: Signal::Valuation,
        verdict,
        message,
    }
}

fn classify_dividend(yield_pct: Option<f64>, thresholds: &AdvisoryThresholds) -> Advisory {
    let (verdict, message) = match yield_pct {
        Some(y) if y > thresholds.yield_high_pct => (Verdict::Success, "High Dividend Yield"),
        Some(y) if y > thresholds.yield_moderate_pct => (Verdict::Info, "Moderate Dividend"),
        Some(_) => (Verdict::Warning, "Low Dividend Yield"),
        None => (Verdict::Info, INSUFFICIENT_DATA),
    };

    Advisory {
        signal: Signal::DividendHealth,
        verdict,
        message,
    }
}

fn classify_growth(growth_pct: Option<f64>, thresholds: &AdvisoryThresholds) -> Advisory {
    let (verdict, message) = match growth_pct {
        Some(g) if g > thresholds.growth_strong_pct => {
            (Verdict::Success, "Strong Growth Potential")
        }
        Some(g) if g > thresholds.growth_moderate_pct => (Verdict::Info, "Moderate Growth"),
        Some(_) => (Verdict::Warning, "Limited Growth"),
        None => (Verdict::Info, INSUFFICIENT_DATA),
    };

    Advisory {
        signal: Signal::GrowthPotential,
        verdict,
        message,
    }
}
