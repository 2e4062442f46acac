//! Data normalization.
//!
//! Count columns go through an explicit two-step conversion: every cell is
//! parsed to `f64` with unparseable cells becoming null, then nulls are
//! filled with zero. The rate metrics are derived afterwards and appended to
//! the table once.

use crate::columns::ResolvedColumns;
use crate::error::{InsightsError, Result, ResultExt};
use crate::utils::{float_values, is_numeric_dtype, parse_numeric_cell};
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Name of the derived death rate column.
pub const DEATH_RATE_COLUMN: &str = "Death Rate (%)";

/// Name of the derived recovery rate column.
pub const RECOVERY_RATE_COLUMN: &str = "Recovery Rate (%)";

/// Placeholder for countries with no name.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// A normalized table together with the headers it was resolved from.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub df: DataFrame,
    pub columns: ResolvedColumns,
}

impl NormalizedTable {
    /// Whether the recovery rate column was derived.
    pub fn has_recovery_rate(&self) -> bool {
        self.df.column(RECOVERY_RATE_COLUMN).is_ok()
    }

    /// Country names in row order.
    pub fn countries(&self) -> Result<Vec<String>> {
        let series = self.series(&self.columns.country)?;
        Ok(series
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or(UNKNOWN_COUNTRY).to_string())
            .collect())
    }

    /// Values of a numeric column in row order, nulls as `None`.
    pub fn numeric(&self, name: &str) -> Result<Vec<Option<f64>>> {
        Ok(float_values(self.series(name)?)?)
    }

    /// Values of a filled count column in row order.
    pub fn counts(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self
            .numeric(name)?
            .into_iter()
            .map(|v| v.unwrap_or(0.0))
            .collect())
    }

    fn series(&self, name: &str) -> Result<&Series> {
        self.df
            .column(name)
            .map(|c| c.as_materialized_series())
            .map_err(|_| InsightsError::ColumnNotFound(name.to_string()))
    }
}

/// Per-column record of what coercion did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoercionStats {
    /// Cells that were already null, blank, or non-finite.
    pub missing: usize,
    /// Non-empty cells that could not be parsed.
    pub unparseable: usize,
}

/// Step one: convert a column to `Float64`.
///
/// Unparseable and non-finite cells (`NaN`, `inf`) become null.
pub fn coerce_numeric(series: &Series) -> Result<(Series, CoercionStats)> {
    let mut stats = CoercionStats::default();

    if is_numeric_dtype(series.dtype()) {
        let cast = series.cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = cast
            .f64()?
            .into_iter()
            .map(|cell| {
                let finite = cell.filter(|v| v.is_finite());
                if finite.is_none() {
                    stats.missing += 1;
                }
                finite
            })
            .collect();
        return Ok((Series::new(series.name().clone(), values), stats));
    }

    let as_text = series.cast(&DataType::String)?;
    let values: Vec<Option<f64>> = as_text
        .str()?
        .into_iter()
        .map(|cell| match cell {
            None => {
                stats.missing += 1;
                None
            }
            Some(raw) => {
                let parsed = parse_numeric_cell(raw);
                if parsed.is_none() {
                    if raw.trim().is_empty() {
                        stats.missing += 1;
                    } else {
                        stats.unparseable += 1;
                    }
                }
                parsed
            }
        })
        .collect();

    Ok((Series::new(series.name().clone(), values), stats))
}

/// Step two: replace nulls (and any remaining non-finite values) with zero.
pub fn fill_missing_zero(series: &Series) -> Result<Series> {
    let filled: Vec<f64> = series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()).unwrap_or(0.0))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Stringify the country column and trim surrounding whitespace.
pub fn trim_country(series: &Series) -> Result<Series> {
    let as_text = series.cast(&DataType::String)?;
    let trimmed: Vec<String> = as_text
        .str()?
        .into_iter()
        .map(|v| v.map_or_else(|| UNKNOWN_COUNTRY.to_string(), |s| s.trim().to_string()))
        .collect();
    Ok(Series::new(series.name().clone(), trimmed))
}

/// `numerator / denominator * 100` where the denominator is positive.
///
/// Rows with a zero or negative denominator have no defined rate and yield
/// `None`.
pub fn rate(numerator: &[f64], denominator: &[f64]) -> Vec<Option<f64>> {
    numerator
        .iter()
        .zip(denominator)
        .map(|(&n, &d)| (d > 0.0).then(|| n / d * 100.0))
        .collect()
}

/// Normalize the table: trim countries, coerce and fill counts, derive rates.
pub fn normalize(mut df: DataFrame, columns: ResolvedColumns) -> Result<NormalizedTable> {
    let country = df.column(&columns.country)?.as_materialized_series().clone();
    df.replace(&columns.country, trim_country(&country)?)
        .context("Trimming country names")?;

    for name in columns.numeric_columns() {
        let raw = df.column(name)?.as_materialized_series().clone();
        let (coerced, stats) = coerce_numeric(&raw)?;
        if stats.unparseable > 0 {
            warn!(
                "Column '{}': {} non-numeric value(s) treated as missing",
                name, stats.unparseable
            );
        }
        debug!(
            "Column '{}': {} missing value(s) filled with 0",
            name,
            stats.missing + stats.unparseable
        );
        let filled = fill_missing_zero(&coerced)?;
        df.replace(name, filled)
            .context(format!("Replacing column '{}'", name))?;
    }

    let confirmed = column_values(&df, &columns.confirmed)?;

    if let Some(recovered_col) = &columns.recovered {
        let recovered = column_values(&df, recovered_col)?;
        let recovery = Series::new(RECOVERY_RATE_COLUMN.into(), rate(&recovered, &confirmed));
        df.with_column(recovery)?;
    } else {
        info!("No recovered column; skipping '{}'", RECOVERY_RATE_COLUMN);
    }

    let deaths = column_values(&df, &columns.deaths)?;
    let death_rate = Series::new(DEATH_RATE_COLUMN.into(), rate(&deaths, &confirmed));
    df.with_column(death_rate)?;

    debug!("Normalized table shape: {:?}", df.shape());
    Ok(NormalizedTable { df, columns })
}

fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df.column(name)?.as_materialized_series();
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect())
}
