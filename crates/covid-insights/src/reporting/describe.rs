//! Descriptive statistics for numeric columns.

use super::table::{Align, TextTable};
use crate::error::Result;
use crate::utils::{float_values, format_optional, is_numeric_dtype};
use polars::prelude::*;
use serde::Serialize;

/// Summary statistics of one numeric column. Nulls are ignored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1); undefined below two values.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnStats {
    /// Compute statistics over the non-null values.
    pub fn from_values(name: impl Into<String>, values: &[Option<f64>]) -> Self {
        let mut present: Vec<f64> = values.iter().flatten().copied().collect();
        present.sort_by(f64::total_cmp);

        let count = present.len();
        let mean = (count > 0).then(|| present.iter().sum::<f64>() / count as f64);
        let std = mean.filter(|_| count > 1).map(|m| {
            let variance =
                present.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        });

        Self {
            name: name.into(),
            count,
            mean,
            std,
            min: present.first().copied(),
            q25: quantile(&present, 0.25),
            median: quantile(&present, 0.5),
            q75: quantile(&present, 0.75),
            max: present.last().copied(),
        }
    }

    fn rows(&self) -> [(&'static str, String); 8] {
        [
            ("count", self.count.to_string()),
            ("mean", format_optional(self.mean)),
            ("std", format_optional(self.std)),
            ("min", format_optional(self.min)),
            ("25%", format_optional(self.q25)),
            ("50%", format_optional(self.median)),
            ("75%", format_optional(self.q75)),
            ("max", format_optional(self.max)),
        ]
    }
}

/// Quantile of sorted values using linear interpolation between ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Statistics for every numeric column, in table order.
pub fn describe(df: &DataFrame) -> Result<Vec<ColumnStats>> {
    let mut stats = Vec::new();
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if !is_numeric_dtype(series.dtype()) {
            continue;
        }
        let values = float_values(series)?;
        stats.push(ColumnStats::from_values(series.name().as_str(), &values));
    }
    Ok(stats)
}

/// Render statistics with one row per statistic and one column per input column.
pub fn render_describe(stats: &[ColumnStats]) -> String {
    let headers = std::iter::once(String::new()).chain(stats.iter().map(|s| s.name.clone()));
    let mut table = TextTable::new(headers).with_align(0, Align::Left);

    let per_column: Vec<_> = stats.iter().map(ColumnStats::rows).collect();
    for row_idx in 0..8 {
        let label = per_column
            .first()
            .map(|rows| rows[row_idx].0)
            .unwrap_or_default();
        let mut row = vec![label.to_string()];
        row.extend(per_column.iter().map(|rows| rows[row_idx].1.clone()));
        table.push_row(row);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== quantile tests ====================

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 0.75), Some(3.25));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
    }

    #[test]
    fn test_quantile_empty() {
        assert_eq!(quantile(&[], 0.5), None);
    }

    // ==================== ColumnStats tests ====================

    #[test]
    fn test_stats_basic() {
        let values = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)];
        let stats = ColumnStats::from_values("v", &values);

        assert_eq!(stats.count, 5);
        assert_eq!(stats.mean, Some(3.0));
        assert!((stats.std.unwrap() - 2.5f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.q25, Some(2.0));
        assert_eq!(stats.median, Some(3.0));
        assert_eq!(stats.q75, Some(4.0));
        assert_eq!(stats.max, Some(5.0));
    }

    #[test]
    fn test_stats_ignore_nulls() {
        let values = [Some(10.0), None, Some(20.0)];
        let stats = ColumnStats::from_values("rate", &values);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, Some(15.0));
    }

    #[test]
    fn test_stats_single_value_has_no_std() {
        let stats = ColumnStats::from_values("v", &[Some(7.0)]);
        assert_eq!(stats.std, None);
        assert_eq!(stats.median, Some(7.0));
    }

    #[test]
    fn test_stats_all_null() {
        let stats = ColumnStats::from_values("v", &[None, None]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.max, None);
    }

    // ==================== describe tests ====================

    #[test]
    fn test_describe_skips_text_columns() {
        let df = df! {
            "Country" => ["A", "B"],
            "Confirmed" => [10.0f64, 30.0],
            "Deaths" => [1i64, 3],
        }
        .unwrap();

        let stats = describe(&df).unwrap();
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Confirmed", "Deaths"]);
        assert_eq!(stats[0].mean, Some(20.0));
    }

    #[test]
    fn test_render_describe_layout() {
        let stats = [ColumnStats::from_values("Deaths", &[Some(1.0), Some(3.0)])];
        let rendered = render_describe(&stats);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0].trim(), "Deaths");
        assert!(lines[1].starts_with("count"));
        assert!(lines[1].ends_with('2'));
        assert!(lines[8].starts_with("max"));
    }
}
