mod chart;
mod cli;
mod error;
mod output;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stocklens_core::{
    Analyzer, MarketData, Period, ReqwestHttpClient, SampleProvider, Ticker, YahooProvider,
};

use crate::cli::{Cli, SourceSelector};
use crate::error::CliError;
use crate::output::ReportEnvelope;

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ticker = Ticker::parse(&cli.ticker)?;
    let period = Period::from_str(&cli.period)?;

    let provider = build_provider(&cli)?;
    let analyzer = Analyzer::new(provider);

    let started = Instant::now();
    let report = analyzer.analyze(&ticker, period)?;
    let latency_ms = started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64;

    let envelope = ReportEnvelope::new(report, analyzer.provider_id(), latency_ms);
    output::render(&envelope, cli.format, cli.pretty, !cli.no_color)
}

fn build_provider(cli: &Cli) -> Result<Arc<dyn MarketData>, CliError> {
    match cli.source {
        SourceSelector::Yahoo => {
            let http = Arc::new(ReqwestHttpClient::new()?);
            Ok(Arc::new(
                YahooProvider::new(http).with_timeout_ms(cli.timeout_ms),
            ))
        }
        SourceSelector::Sample => Ok(Arc::new(SampleProvider)),
    }
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "stocklens_core=debug,stocklens=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
