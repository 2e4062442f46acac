//! COVID-19 Snapshot Analysis Library
//!
//! One-shot exploratory analysis of a country-level COVID-19 table, built on
//! Polars.
//!
//! # Overview
//!
//! A run goes through four sequential stages:
//!
//! - **Column Resolution**: header aliases are matched case-insensitively to
//!   logical fields (country, confirmed, deaths, recovered, active, region)
//! - **Normalization**: count columns are coerced to numbers with missing
//!   values filled with zero, and death/recovery rates are derived
//! - **Reporting**: shape, preview, null counts and descriptive statistics
//! - **Charts & Summary**: five charts (the region chart only when a region
//!   column exists) and a plain-text ranking summary
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use covid_insights::{AnalysisConfig, Pipeline};
//!
//! let config = AnalysisConfig::builder()
//!     .input_path("country_wise_latest.csv")
//!     .summary_path("insights_summary.txt")
//!     .build()?;
//!
//! let outcome = Pipeline::builder()
//!     .config(config)
//!     .on_console(|text| println!("{}", text))
//!     .build()?
//!     .run()?;
//!
//! println!("Rendered {} charts", outcome.charts.len());
//! ```
//!
//! # Missing columns
//!
//! Country, confirmed and deaths are mandatory. When any of them has no
//! matching header the run stops with
//! [`InsightsError::MissingRequiredColumns`], naming every missing field.

pub mod charts;
pub mod columns;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod ranking;
pub mod reporting;
pub mod summary;
pub mod utils;

// Re-exports for convenient access
pub use charts::{ChartRenderer, ChartSpec, NullRenderer, SvgChartRenderer};
pub use columns::{LogicalField, ResolvedColumns, pick_first_matching, resolve_columns};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{InsightsError, Result as InsightsResult, ResultExt};
pub use normalizer::{DEATH_RATE_COLUMN, NormalizedTable, RECOVERY_RATE_COLUMN, normalize};
pub use pipeline::{AnalysisOutcome, Pipeline, PipelineBuilder, load_csv};
pub use ranking::{RegionTotal, top_n_by};
pub use reporting::DatasetOverview;
pub use summary::{InsightsSummary, SummaryTable};
