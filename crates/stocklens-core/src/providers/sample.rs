use time::Duration;

use crate::domain::snapshot::fields;
use crate::provider::{HistoryRequest, MarketData, ProviderError, ProviderId, SnapshotRequest};
use crate::{FundamentalsSnapshot, PricePoint, PriceSeries, Ticker, UtcDateTime, ValidationError};

/// Deterministic offline provider.
///
/// Values are seeded from the ticker string, so the same ticker always
/// produces the same snapshot and series. Backs the test suite and
/// `--source sample` demos without a live feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleProvider;

impl MarketData for SampleProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Sample
    }

    fn snapshot(&self, req: &SnapshotRequest) -> Result<FundamentalsSnapshot, ProviderError> {
        let seed = ticker_seed(&req.ticker);

        let price = 80.0 + (seed % 4200) as f64 / 10.0;
        let pe = 8.0 + (seed % 280) as f64 / 10.0;
        let dividend_yield = (seed % 55) as f64 / 1000.0;
        let trailing_eps = price / pe;

        let mut snapshot = FundamentalsSnapshot::new();
        snapshot.insert(
            fields::LONG_NAME,
            format!("{} Sample Corporation", req.ticker),
        );
        snapshot.insert(fields::CURRENCY, "USD");
        snapshot.insert(fields::CURRENT_PRICE, price);
        snapshot.insert(
            fields::MARKET_CAP,
            20_000_000_000.0 + (seed % 900_000) as f64 * 1_000_000.0,
        );
        snapshot.insert(fields::TRAILING_PE, pe);
        snapshot.insert(fields::PRICE_TO_BOOK, 1.0 + (seed % 120) as f64 / 10.0);
        snapshot.insert(fields::FORWARD_PE, pe * 0.9);
        snapshot.insert(fields::DIVIDEND_YIELD, dividend_yield);
        snapshot.insert(fields::DIVIDEND_RATE, price * dividend_yield);
        snapshot.insert(fields::PAYOUT_RATIO, 0.2 + (seed % 50) as f64 / 100.0);
        snapshot.insert(fields::FIFTY_TWO_WEEK_HIGH, price * 1.18);
        snapshot.insert(fields::FIFTY_TWO_WEEK_LOW, price * 0.78);
        snapshot.insert(
            fields::FIFTY_TWO_WEEK_CHANGE,
            ((seed % 80) as f64 - 30.0) / 100.0,
        );
        snapshot.insert(fields::TRAILING_EPS, trailing_eps);
        snapshot.insert(fields::FORWARD_EPS, trailing_eps * 1.08);
        snapshot.insert(fields::REVENUE_GROWTH, ((seed % 28) as f64 - 5.0) / 100.0);

        Ok(snapshot)
    }

    fn history(&self, req: &HistoryRequest) -> Result<PriceSeries, ProviderError> {
        let seed = ticker_seed(&req.ticker);
        let days = req.period.trading_days();
        let base = 80.0 + (seed % 4200) as f64 / 10.0;
        let now = UtcDateTime::now().into_inner();

        let mut points = Vec::with_capacity(days);
        for index in 0..days {
            let offset = Duration::days((days - 1 - index) as i64);
            let ts = UtcDateTime::from_offset_datetime(now - offset)
                .map_err(validation_to_error)?;

            // Bounded deterministic wiggle around the base price.
            let wiggle = ((seed + index as u64 * 7) % 300) as f64 / 10.0 - 15.0;
            let close = (base + wiggle).max(1.0);

            points.push(PricePoint::new(ts, close).map_err(validation_to_error)?);
        }

        PriceSeries::new(req.ticker.clone(), req.period, points).map_err(validation_to_error)
    }
}

fn ticker_seed(ticker: &Ticker) -> u64 {
    ticker.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}

fn validation_to_error(error: ValidationError) -> ProviderError {
    ProviderError::malformed_response(error.to_string())
}
