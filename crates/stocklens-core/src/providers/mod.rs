mod sample;
mod yahoo;

pub use sample::SampleProvider;
pub use yahoo::YahooProvider;
