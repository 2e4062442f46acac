//! Configuration types for the snapshot analysis.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the fixed relative paths the analysis has always
//! used, so a default configuration needs no input at all.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default CSV input path (relative to the working directory).
pub const DEFAULT_INPUT_PATH: &str = "country_wise_latest.csv";

/// Default summary output path (relative to the working directory).
pub const DEFAULT_SUMMARY_PATH: &str = "insights_summary.txt";

/// Default directory for rendered charts.
pub const DEFAULT_CHARTS_DIR: &str = "charts";

/// Configuration for the analysis.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use covid_insights::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .input_path("data/latest.csv")
///     .render_charts(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// CSV file to analyze.
    /// Default: "country_wise_latest.csv"
    pub input_path: PathBuf,

    /// Where the plain-text summary is written (overwritten on every run).
    /// Default: "insights_summary.txt"
    pub summary_path: PathBuf,

    /// Directory receiving the rendered chart files.
    /// Default: "charts"
    pub charts_dir: PathBuf,

    /// Whether charts are rendered at all.
    /// Default: true
    pub render_charts: bool,

    /// Number of rows in the top-by-confirmed and top-by-deaths rankings.
    /// Default: 10
    pub top_n: usize,

    /// Number of rows in the best recovery rate ranking.
    /// Default: 5
    pub recovery_top_n: usize,

    /// Number of bins in the confirmed-cases histogram.
    /// Default: 20
    pub histogram_bins: usize,

    /// Number of rows shown in the dataset preview.
    /// Default: 5
    pub preview_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            summary_path: PathBuf::from(DEFAULT_SUMMARY_PATH),
            charts_dir: PathBuf::from(DEFAULT_CHARTS_DIR),
            render_charts: true,
            top_n: 10,
            recovery_top_n: 5,
            histogram_bins: 20,
            preview_rows: 5,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("top_n", self.top_n),
            ("recovery_top_n", self.recovery_top_n),
            ("histogram_bins", self.histogram_bins),
        ] {
            if value == 0 {
                return Err(ConfigValidationError::ZeroCount {
                    field: field.to_string(),
                });
            }
        }

        for (field, path) in [
            ("input_path", &self.input_path),
            ("summary_path", &self.summary_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigValidationError::EmptyPath {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': 0 (must be at least 1)")]
    ZeroCount { field: String },

    #[error("Invalid path for '{field}': must not be empty")]
    EmptyPath { field: String },
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    input_path: Option<PathBuf>,
    summary_path: Option<PathBuf>,
    charts_dir: Option<PathBuf>,
    render_charts: Option<bool>,
    top_n: Option<usize>,
    recovery_top_n: Option<usize>,
    histogram_bins: Option<usize>,
    preview_rows: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Set the CSV file to analyze.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set where the summary text file is written.
    pub fn summary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_path = Some(path.into());
        self
    }

    /// Set the directory for chart files.
    pub fn charts_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.charts_dir = Some(path.into());
        self
    }

    /// Enable or disable chart rendering.
    pub fn render_charts(mut self, render: bool) -> Self {
        self.render_charts = Some(render);
        self
    }

    /// Set the size of the confirmed/deaths rankings.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the size of the recovery rate ranking.
    pub fn recovery_top_n(mut self, n: usize) -> Self {
        self.recovery_top_n = Some(n);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the number of preview rows printed by the reporter.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            summary_path: self.summary_path.unwrap_or(defaults.summary_path),
            charts_dir: self.charts_dir.unwrap_or(defaults.charts_dir),
            render_charts: self.render_charts.unwrap_or(defaults.render_charts),
            top_n: self.top_n.unwrap_or(defaults.top_n),
            recovery_top_n: self.recovery_top_n.unwrap_or(defaults.recovery_top_n),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_path, PathBuf::from("country_wise_latest.csv"));
        assert_eq!(config.summary_path, PathBuf::from("insights_summary.txt"));
        assert_eq!(config.top_n, 10);
        assert_eq!(config.recovery_top_n, 5);
        assert_eq!(config.histogram_bins, 20);
        assert!(config.render_charts);
    }

    #[test]
    fn test_builder_defaults() {
        let config = AnalysisConfig::builder().build().unwrap();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.charts_dir, PathBuf::from("charts"));
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .input_path("data/latest.csv")
            .summary_path("out/summary.txt")
            .render_charts(false)
            .top_n(3)
            .histogram_bins(8)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("data/latest.csv"));
        assert_eq!(config.summary_path, PathBuf::from("out/summary.txt"));
        assert!(!config.render_charts);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.histogram_bins, 8);
    }

    #[test]
    fn test_validation_zero_bins() {
        let result = AnalysisConfig::builder().histogram_bins(0).build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ZeroCount { field } if field == "histogram_bins"
        ));
    }

    #[test]
    fn test_validation_empty_summary_path() {
        let result = AnalysisConfig::builder().summary_path("").build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyPath { .. }
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AnalysisConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.input_path, deserialized.input_path);
        assert_eq!(config.top_n, deserialized.top_n);
    }
}
