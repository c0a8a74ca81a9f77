mod period;
mod series;
pub mod snapshot;
mod ticker;
mod timestamp;

pub use period::Period;
pub use series::{PricePoint, PriceSeries};
pub use snapshot::FundamentalsSnapshot;
pub use ticker::Ticker;
pub use timestamp::UtcDateTime;
