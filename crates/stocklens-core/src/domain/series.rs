use serde::{Deserialize, Serialize};

use crate::{Period, Ticker, UtcDateTime, ValidationError};

/// Single (date, closing price) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub ts: UtcDateTime,
    pub close: f64,
}

impl PricePoint {
    pub fn new(ts: UtcDateTime, close: f64) -> Result<Self, ValidationError> {
        if !close.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "close" });
        }
        if close < 0.0 {
            return Err(ValidationError::NegativeValue { field: "close" });
        }

        Ok(Self { ts, close })
    }
}

/// Chronologically ordered closing-price series over a trailing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: Ticker,
    pub period: Period,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, enforcing chronological (non-decreasing) ordering.
    pub fn new(
        ticker: Ticker,
        period: Period,
        points: Vec<PricePoint>,
    ) -> Result<Self, ValidationError> {
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].ts < pair[0].ts {
                return Err(ValidationError::UnorderedSeries { index: index + 1 });
            }
        }

        Ok(Self {
            ticker,
            period,
            points,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn min_close(&self) -> Option<f64> {
        self.points.iter().map(|p| p.close).reduce(f64::min)
    }

    pub fn max_close(&self) -> Option<f64> {
        self.points.iter().map(|p| p.close).reduce(f64::max)
    }
}
