use serde::Serialize;
use uuid::Uuid;

use stocklens_core::{
    Advisory, AnalysisReport, Period, ProviderId, Ticker, UtcDateTime, Verdict,
};

use crate::chart;
use crate::cli::OutputFormat;
use crate::error::CliError;

/// Response envelope for machine-readable output.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope {
    pub meta: ReportMeta,
    pub data: AnalysisReport,
}

/// Metadata attached to every envelope.
#[derive(Debug, Serialize)]
pub struct ReportMeta {
    pub request_id: String,
    pub generated_at: UtcDateTime,
    pub source: ProviderId,
    pub ticker: Ticker,
    pub period: Period,
    pub latency_ms: u64,
}

impl ReportEnvelope {
    pub fn new(report: AnalysisReport, source: ProviderId, latency_ms: u64) -> Self {
        let meta = ReportMeta {
            request_id: Uuid::new_v4().to_string(),
            generated_at: UtcDateTime::now(),
            source,
            ticker: report.ticker.clone(),
            period: report.period,
            latency_ms,
        };

        Self { meta, data: report }
    }
}

pub fn render(
    envelope: &ReportEnvelope,
    format: OutputFormat,
    pretty: bool,
    color: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => {
            println!("{}", render_table(&envelope.data, color));
        }
    }

    Ok(())
}

const RESET: &str = "\x1b[0m";

const fn verdict_style(verdict: Verdict) -> (&'static str, &'static str) {
    match verdict {
        Verdict::Success => (" OK ", "\x1b[32m"),
        Verdict::Info => ("INFO", "\x1b[36m"),
        Verdict::Warning => ("WARN", "\x1b[33m"),
    }
}

/// Assemble the full dashboard: header, four tile sections, price chart,
/// and the three advisory banners.
fn render_table(report: &AnalysisReport, color: bool) -> String {
    let mut out = String::new();

    match &report.name {
        Some(name) => out.push_str(&format!("{name} ({})\n", report.ticker)),
        None => out.push_str(&format!("{}\n", report.ticker)),
    }

    for group in &report.metrics.groups {
        out.push('\n');
        out.push_str(&format!("{}\n", group.name));

        let label_width = group
            .metrics
            .iter()
            .map(|metric| metric.label.len())
            .max()
            .unwrap_or(0);
        for metric in &group.metrics {
            out.push_str(&format!(
                "  {:<label_width$}  {}\n",
                metric.label, metric.display
            ));
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "Price History: closing price by date ({}, {} closes)\n",
        report.period,
        report.series.len()
    ));
    out.push_str(&chart::render_line_chart(
        &report.series,
        chart::DEFAULT_WIDTH,
        chart::DEFAULT_HEIGHT,
    ));
    out.push('\n');

    out.push('\n');
    out.push_str("Quick Insights\n");
    for advisory in &report.advisories {
        out.push_str(&format!("  {}\n", banner(advisory, color)));
    }

    out
}

fn banner(advisory: &Advisory, color: bool) -> String {
    let (tag, style) = verdict_style(advisory.verdict);
    let heading = advisory.signal.heading();

    if color {
        format!("{style}[{tag}]{RESET} {heading:<20} {}", advisory.message)
    } else {
        format!("[{tag}] {heading:<20} {}", advisory.message)
    }
}
