//! Builds the chart set for a normalized table.

use super::ChartSpec;
use crate::error::Result;
use crate::normalizer::NormalizedTable;
use crate::ranking::{region_totals, top_n_by};
use crate::utils::string_values;
use serde::Serialize;
use tracing::debug;

/// One histogram bin covering `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Split values into `bins` equal-width bins over their range.
///
/// When every value is equal the range is widened by 0.5 on each side.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

/// Charts for the table, in display order.
///
/// The region chart is only produced when a region column resolved.
pub fn build_charts(table: &NormalizedTable, top_n: usize, bins: usize) -> Result<Vec<ChartSpec>> {
    let columns = &table.columns;
    let countries = table.countries()?;
    let confirmed = table.counts(&columns.confirmed)?;
    let deaths = table.counts(&columns.deaths)?;

    let top_bar = |title: &str, y_label: &str, values: &[f64]| {
        let ranked = top_n_by(&values.iter().copied().map(Some).collect::<Vec<_>>(), top_n);
        ChartSpec::Bar {
            title: title.to_string(),
            x_label: "Country".to_string(),
            y_label: y_label.to_string(),
            labels: ranked.iter().map(|&i| countries[i].clone()).collect(),
            values: ranked.iter().map(|&i| values[i]).collect(),
        }
    };

    let mut charts = vec![
        top_bar(
            &format!("Top {} Countries by Confirmed Cases", top_n),
            "Confirmed Cases",
            &confirmed,
        ),
        top_bar(&format!("Top {} Countries by Deaths", top_n), "Deaths", &deaths),
        ChartSpec::Histogram {
            title: "Distribution of Confirmed Cases".to_string(),
            x_label: "Confirmed Cases".to_string(),
            y_label: "Frequency".to_string(),
            values: confirmed.clone(),
            bins,
        },
        ChartSpec::Scatter {
            title: "Deaths vs Confirmed Cases".to_string(),
            x_label: "Confirmed Cases".to_string(),
            y_label: "Deaths".to_string(),
            points: confirmed.iter().copied().zip(deaths.iter().copied()).collect(),
        },
    ];

    if let Some(region_col) = &columns.region {
        let regions = string_values(table.df.column(region_col)?.as_materialized_series())?;
        let totals = region_totals(&regions, &confirmed, &deaths);
        debug!("Aggregated {} region(s) from '{}'", totals.len(), region_col);
        charts.push(ChartSpec::Bar {
            title: "Total Confirmed by Region".to_string(),
            x_label: "Region".to_string(),
            y_label: "Confirmed Cases".to_string(),
            labels: totals.iter().map(|t| t.region.clone()).collect(),
            values: totals.iter().map(|t| t.confirmed).collect(),
        });
    }

    Ok(charts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::resolve_columns;
    use crate::normalizer::normalize;
    use polars::prelude::*;

    fn table(df: DataFrame) -> NormalizedTable {
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        normalize(df, resolve_columns(&headers).unwrap()).unwrap()
    }

    // ==================== histogram_bins tests ====================

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (0..100).map(|v| v as f64).collect();
        let bins = histogram_bins(&values, 20);

        assert_eq!(bins.len(), 20);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[19].upper, 99.0);
    }

    #[test]
    fn test_histogram_max_lands_in_last_bin() {
        let bins = histogram_bins(&[0.0, 10.0], 2);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 1);
        assert_eq!(bins[0].upper, 5.0);
    }

    #[test]
    fn test_histogram_constant_values() {
        let bins = histogram_bins(&[3.0, 3.0, 3.0], 4);
        assert_eq!(bins.first().unwrap().lower, 2.5);
        assert_eq!(bins.last().unwrap().upper, 3.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_histogram_empty() {
        assert!(histogram_bins(&[], 20).is_empty());
    }

    // ==================== build_charts tests ====================

    #[test]
    fn test_four_charts_without_region() {
        let df = df! {
            "Country" => ["A", "B", "C"],
            "Confirmed" => [5i64, 50, 20],
            "Deaths" => [1i64, 2, 3],
        }
        .unwrap();
        let charts = build_charts(&table(df), 10, 20).unwrap();

        let titles: Vec<&str> = charts.iter().map(ChartSpec::title).collect();
        assert_eq!(
            titles,
            vec![
                "Top 10 Countries by Confirmed Cases",
                "Top 10 Countries by Deaths",
                "Distribution of Confirmed Cases",
                "Deaths vs Confirmed Cases",
            ]
        );

        match &charts[0] {
            ChartSpec::Bar { labels, values, .. } => {
                assert_eq!(labels, &vec!["B", "C", "A"]);
                assert_eq!(values, &vec![50.0, 20.0, 5.0]);
            }
            other => panic!("expected bar chart, got {:?}", other),
        }
        match &charts[1] {
            ChartSpec::Bar { labels, .. } => assert_eq!(labels, &vec!["C", "B", "A"]),
            other => panic!("expected bar chart, got {:?}", other),
        }
    }

    #[test]
    fn test_region_chart_when_region_resolves() {
        let df = df! {
            "Country" => ["A", "B", "C"],
            "Confirmed" => [5i64, 50, 20],
            "Deaths" => [1i64, 2, 3],
            "WHO Region" => ["Europe", "Americas", "Europe"],
        }
        .unwrap();
        let charts = build_charts(&table(df), 10, 20).unwrap();

        assert_eq!(charts.len(), 5);
        match &charts[4] {
            ChartSpec::Bar { title, labels, values, .. } => {
                assert_eq!(title, "Total Confirmed by Region");
                assert_eq!(labels, &vec!["Americas", "Europe"]);
                assert_eq!(values, &vec![50.0, 25.0]);
            }
            other => panic!("expected bar chart, got {:?}", other),
        }
    }
}
