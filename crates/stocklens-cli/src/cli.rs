//! CLI argument definitions for stocklens.
//!
//! One primary action: analyze a ticker and render the snapshot dashboard.
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--period` | `1y` | Trailing history window (1mo, 3mo, 6mo, 1y, 2y, 5y) |
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--source` | `yahoo` | Market-data source (yahoo, sample) |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//! | `--no-color` | `false` | Disable ANSI colors in table output |
//!
//! # Examples
//!
//! ```bash
//! # Full dashboard for a ticker
//! stocklens AAPL
//!
//! # Five years of history, machine-readable output
//! stocklens INFY.NS --period 5y --format json --pretty
//!
//! # Offline demo data, no network access
//! stocklens AAPL --source sample
//! ```

use clap::{ArgAction, Parser, ValueEnum};

/// Retail-investor stock snapshot for the terminal.
///
/// Fetches valuation, dividend, performance, and growth metrics for a
/// ticker, renders them alongside a trailing price chart, and attaches
/// three threshold-based insights.
#[derive(Debug, Parser)]
#[command(
    name = "stocklens",
    version,
    about = "Retail-investor stock snapshot for the terminal"
)]
pub struct Cli {
    /// Ticker symbol to analyze (e.g., AAPL, INFY.NS).
    pub ticker: String,

    /// Trailing history window for the price chart.
    ///
    /// Supported windows: 1mo, 3mo, 6mo, 1y, 2y, 5y.
    #[arg(long, default_value = "1y")]
    pub period: String,

    /// Output format for results.
    ///
    /// - table: metric tiles, chart, and advisory banners (default)
    /// - json: response envelope for machine consumption
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Market-data source backing the analysis.
    #[arg(long, value_enum, default_value_t = SourceSelector::Yahoo)]
    pub source: SourceSelector,

    /// Request timeout budget in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Disable ANSI colors in table output.
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Increase log verbosity on stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable dashboard for terminal display.
    Table,
    /// Single JSON envelope output.
    Json,
}

/// Market-data source selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceSelector {
    /// Yahoo Finance public endpoints.
    Yahoo,
    /// Deterministic offline sample data.
    Sample,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["stocklens", "AAPL"]).expect("must parse");
        assert_eq!(cli.ticker, "AAPL");
        assert_eq!(cli.period, "1y");
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.source, SourceSelector::Yahoo);
        assert!(!cli.pretty);
    }

    #[test]
    fn requires_a_ticker() {
        assert!(Cli::try_parse_from(["stocklens"]).is_err());
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "stocklens",
            "infy.ns",
            "--period",
            "5y",
            "--format",
            "json",
            "--pretty",
            "--source",
            "sample",
            "-vv",
        ])
        .expect("must parse");

        assert_eq!(cli.period, "5y");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.source, SourceSelector::Sample);
        assert!(cli.pretty);
        assert_eq!(cli.verbose, 2);
    }
}
