//! Insights summary.
//!
//! The summary collects the ranking tables and renders them into the flat
//! text file written at the end of every run. Rendering is deterministic:
//! the same table always produces byte-identical output.

use crate::error::{Result, ResultExt};
use crate::normalizer::{NormalizedTable, RECOVERY_RATE_COLUMN};
use crate::ranking::{RegionTotal, region_totals, top_n_by};
use crate::reporting::TextTable;
use crate::utils::{format_number, string_values};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Heading line of the summary file.
pub const SUMMARY_TITLE: &str = "COVID-19 Country-Level Snapshot Summary";

/// A labeled ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub label: String,
    pub table: TextTable,
}

impl SummaryTable {
    /// Build a two-column table of the ranked rows.
    fn ranked(
        label: impl Into<String>,
        headers: [&str; 2],
        countries: &[String],
        values: &[Option<f64>],
        rows: &[usize],
    ) -> Self {
        let mut table = TextTable::new(headers);
        for &idx in rows {
            let value = values[idx].map(format_number).unwrap_or_default();
            table.push_row(vec![countries[idx].clone(), value]);
        }
        Self {
            label: label.into(),
            table,
        }
    }

    /// The table body without its label.
    pub fn render(&self) -> String {
        self.table.render()
    }
}

/// Everything written to the insights file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsSummary {
    pub top_confirmed: SummaryTable,
    pub top_deaths: SummaryTable,
    /// Present only when a recovery rate was derived.
    pub best_recovery: Option<SummaryTable>,
    /// Present only when a region column resolved.
    pub region_totals: Option<Vec<RegionTotal>>,
}

impl InsightsSummary {
    /// Rank the normalized table.
    pub fn from_table(table: &NormalizedTable, top_n: usize, recovery_top_n: usize) -> Result<Self> {
        let columns = &table.columns;
        let countries = table.countries()?;
        let confirmed = table.numeric(&columns.confirmed)?;
        let deaths = table.numeric(&columns.deaths)?;

        let top_confirmed = SummaryTable::ranked(
            format!("Top {} Countries by Confirmed Cases:", top_n),
            [columns.country.as_str(), columns.confirmed.as_str()],
            &countries,
            &confirmed,
            &top_n_by(&confirmed, top_n),
        );
        let top_deaths = SummaryTable::ranked(
            format!("Top {} Countries by Deaths:", top_n),
            [columns.country.as_str(), columns.deaths.as_str()],
            &countries,
            &deaths,
            &top_n_by(&deaths, top_n),
        );

        let best_recovery = if table.has_recovery_rate() {
            let rates = table.numeric(RECOVERY_RATE_COLUMN)?;
            Some(SummaryTable::ranked(
                "Best Recovery Rates (%):",
                [columns.country.as_str(), RECOVERY_RATE_COLUMN],
                &countries,
                &rates,
                &top_n_by(&rates, recovery_top_n),
            ))
        } else {
            None
        };

        let region_totals = match &columns.region {
            Some(region_col) => {
                let regions = string_values(table.df.column(region_col)?.as_materialized_series())?;
                let filled = |values: &[Option<f64>]| -> Vec<f64> {
                    values.iter().map(|v| v.unwrap_or(0.0)).collect()
                };
                Some(region_totals(&regions, &filled(&confirmed), &filled(&deaths)))
            }
            None => None,
        };

        Ok(Self {
            top_confirmed,
            top_deaths,
            best_recovery,
            region_totals,
        })
    }

    /// Lines of the summary file, before joining.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{}\n", SUMMARY_TITLE)];
        let sections = [Some(&self.top_confirmed), Some(&self.top_deaths), self.best_recovery.as_ref()];
        for (i, section) in sections.into_iter().flatten().enumerate() {
            let lead = if i == 0 { "" } else { "\n" };
            lines.push(format!("{}{}\n", lead, section.label));
            lines.extend(section.render().lines().map(str::to_string));
        }
        lines
    }

    /// The full file body; lines joined by `\n`, no trailing newline.
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    /// Write the summary, replacing any previous file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .context(format!("Creating directory {}", parent.display()))?;
        }
        std::fs::write(path, self.render())
            .context(format!("Writing summary to {}", path.display()))?;
        info!("Summary written: {}", path.display());
        Ok(())
    }
}
