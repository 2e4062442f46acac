//! Shared utilities for the analysis.
//!
//! This module contains dtype checks, cell parsing, and number formatting
//! used by the normalizer, the reporter, and the summary.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Collect a numeric series as `f64` values, nulls kept as `None`.
pub fn float_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().collect())
}

/// Collect a series as display strings, nulls kept as `None`.
pub fn string_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let strings = series.cast(&DataType::String)?;
    Ok(strings
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Parse a single cell as a finite `f64`.
///
/// Surrounding whitespace is ignored. Empty cells, text, and non-finite
/// values (`inf`, `NaN`) yield `None`.
pub fn parse_numeric_cell(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Formatting Utilities
// =============================================================================

/// Format a value for text tables.
///
/// Whole numbers print without a fractional part; everything else prints
/// with up to six decimals and trailing zeros removed.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{:.6}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Format an optional value, rendering missing values as `NaN`.
pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "NaN".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_parse_numeric_cell() {
        assert_eq!(parse_numeric_cell("42"), Some(42.0));
        assert_eq!(parse_numeric_cell("  -3.5 "), Some(-3.5));
        assert_eq!(parse_numeric_cell("1e3"), Some(1000.0));
        assert_eq!(parse_numeric_cell(""), None);
        assert_eq!(parse_numeric_cell("   "), None);
        assert_eq!(parse_numeric_cell("n/a"), None);
        assert_eq!(parse_numeric_cell("1,234"), None);
        assert_eq!(parse_numeric_cell("inf"), None);
        assert_eq!(parse_numeric_cell("NaN"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4290259.0), "4290259");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(10.5), "10.5");
        assert_eq!(format_number(2.0 / 3.0 * 100.0), "66.666667");
        assert_eq!(format_number(-1.25), "-1.25");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_float_values_keeps_nulls() {
        let series = Series::new("v".into(), &[Some(1i64), None, Some(3)]);
        assert_eq!(float_values(&series).unwrap(), vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_string_values() {
        let series = Series::new("v".into(), &[Some("a"), None]);
        assert_eq!(
            string_values(&series).unwrap(),
            vec![Some("a".to_string()), None]
        );
    }
}
