//! Dataset overview rendering.

use super::describe::{ColumnStats, describe, render_describe};
use super::table::{Align, TextTable};
use crate::error::Result;
use polars::prelude::*;
use serde::Serialize;

/// Read-only snapshot of a table, rendered to the console after normalization.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    /// Preview of the first rows, as polars formats it.
    pub head: String,
    pub null_counts: Vec<(String, usize)>,
    pub stats: Vec<ColumnStats>,
}

impl DatasetOverview {
    /// Collect the overview of `df`, previewing `preview_rows` rows.
    pub fn from_frame(df: &DataFrame, preview_rows: usize) -> Result<Self> {
        let (rows, columns) = df.shape();
        Ok(Self {
            rows,
            columns,
            column_names: df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            head: format!("{}", df.head(Some(preview_rows))),
            null_counts: null_counts(df),
            stats: describe(df)?,
        })
    }

    /// Render the overview as console text.
    pub fn render(&self) -> String {
        let mut out = Vec::new();
        out.push(format!("Shape: ({}, {})", self.rows, self.columns));
        out.push(format!("Columns: {:?}", self.column_names));

        out.push("\nHead:".to_string());
        out.push(self.head.clone());

        out.push("\nMissing values per column:".to_string());
        let mut nulls = TextTable::new(["Column", "Missing"]).with_align(0, Align::Left);
        for (name, count) in &self.null_counts {
            nulls.push_row(vec![name.clone(), count.to_string()]);
        }
        out.push(nulls.render());

        out.push("\nBasic stats for numeric columns:".to_string());
        if self.stats.is_empty() {
            out.push("(no numeric columns)".to_string());
        } else {
            out.push(render_describe(&self.stats));
        }

        out.join("\n")
    }
}

/// Number of null cells per column, in table order.
pub fn null_counts(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df! {
            "Country" => ["A", "B", "C"],
            "Confirmed" => [100.0f64, 0.0, 50.0],
            "Death Rate (%)" => [Some(10.0f64), None, Some(2.0)],
        }
        .unwrap()
    }

    #[test]
    fn test_null_counts() {
        let counts = null_counts(&sample());
        assert_eq!(
            counts,
            vec![
                ("Country".to_string(), 0),
                ("Confirmed".to_string(), 0),
                ("Death Rate (%)".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_overview_shape_and_stats() {
        let overview = DatasetOverview::from_frame(&sample(), 5).unwrap();
        assert_eq!(overview.rows, 3);
        assert_eq!(overview.columns, 3);
        assert_eq!(overview.stats.len(), 2);
        assert_eq!(overview.stats[1].count, 2);
    }

    #[test]
    fn test_overview_render_sections() {
        let rendered = DatasetOverview::from_frame(&sample(), 2).unwrap().render();
        assert!(rendered.starts_with("Shape: (3, 3)"));
        assert!(rendered.contains("Columns: [\"Country\", \"Confirmed\", \"Death Rate (%)\"]"));
        assert!(rendered.contains("Head:"));
        assert!(rendered.contains("Missing values per column:"));
        assert!(rendered.contains("Basic stats for numeric columns:"));
    }
}
