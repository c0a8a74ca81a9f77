use stocklens_core::PriceSeries;

pub const DEFAULT_WIDTH: usize = 72;
pub const DEFAULT_HEIGHT: usize = 12;

/// Render a closing-price series as a plain ASCII line chart.
///
/// The y axis carries the max/min closes, the x axis the first and last
/// dates. Points are bucketed into columns by taking the bucket mean, so
/// long series compress to the requested width.
pub fn render_line_chart(series: &PriceSeries, width: usize, height: usize) -> String {
    let closes: Vec<f64> = series.points.iter().map(|point| point.close).collect();
    if closes.is_empty() || height < 2 {
        return String::from("(no price data)");
    }

    let columns = bucket_means(&closes, width.max(1));
    let min = columns.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = columns.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let span = max - min;

    let mut grid = vec![vec![' '; columns.len()]; height];
    for (col, value) in columns.iter().enumerate() {
        let row = if span > f64::EPSILON {
            ((value - min) / span * (height - 1) as f64).round() as usize
        } else {
            height / 2
        };
        grid[row.min(height - 1)][col] = '*';
    }

    let max_label = format!("{max:.2}");
    let min_label = format!("{min:.2}");
    let label_width = max_label.len().max(min_label.len());

    let mut lines = Vec::with_capacity(height + 2);
    for (row, cells) in grid.iter().enumerate().rev() {
        let label = if row == height - 1 {
            max_label.as_str()
        } else if row == 0 {
            min_label.as_str()
        } else {
            ""
        };
        let body: String = cells.iter().collect();
        lines.push(format!("{label:>label_width$} |{body}"));
    }
    lines.push(format!(
        "{:>label_width$} +{}",
        "",
        "-".repeat(columns.len())
    ));

    let first_date = series
        .first()
        .map(|point| point.ts.date_string())
        .unwrap_or_default();
    let last_date = series
        .last()
        .map(|point| point.ts.date_string())
        .unwrap_or_default();
    let gap = columns
        .len()
        .saturating_sub(first_date.len() + last_date.len());
    lines.push(format!(
        "{:>label_width$}  {first_date}{}{last_date}",
        "",
        " ".repeat(gap)
    ));

    lines.join("\n")
}

fn bucket_means(closes: &[f64], width: usize) -> Vec<f64> {
    let count = closes.len();
    let width = width.min(count);

    (0..width)
        .map(|col| {
            let start = col * count / width;
            let end = (((col + 1) * count / width).max(start + 1)).min(count);
            let bucket = &closes[start..end];
            bucket.iter().sum::<f64>() / bucket.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocklens_core::{Period, PricePoint, PriceSeries, Ticker, UtcDateTime};

    fn series(closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(index, close)| {
                let ts = UtcDateTime::from_unix_timestamp(1_704_067_200 + index as i64 * 86_400)
                    .expect("timestamp");
                PricePoint::new(ts, *close).expect("point")
            })
            .collect();
        PriceSeries::new(Ticker::parse("AAPL").expect("ticker"), Period::OneYear, points)
            .expect("series")
    }

    #[test]
    fn chart_carries_min_max_labels_and_dates() {
        let chart = render_line_chart(&series(&[10.0, 12.5, 11.0, 14.0]), 40, 8);

        assert!(chart.contains("14.00"));
        assert!(chart.contains("10.00"));
        assert!(chart.contains("2024-01-01"));
        assert!(chart.contains("2024-01-04"));
        assert!(chart.contains('*'));
    }

    #[test]
    fn long_series_compress_to_requested_width() {
        let closes: Vec<f64> = (0..500).map(|i| 100.0 + (i % 37) as f64).collect();
        let chart = render_line_chart(&series(&closes), 60, 10);

        let widest = chart.lines().map(str::len).max().unwrap_or(0);
        assert!(widest <= 60 + 10, "chart too wide: {widest}");
    }

    #[test]
    fn flat_series_renders_without_panicking() {
        let chart = render_line_chart(&series(&[50.0, 50.0, 50.0]), 20, 6);
        assert!(chart.contains("50.00"));
    }
}
