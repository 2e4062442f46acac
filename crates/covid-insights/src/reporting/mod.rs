//! Console reporting module.
//!
//! This module renders the read-only dataset overview printed after
//! normalization: shape, column names, a preview of the first rows, null
//! counts, and descriptive statistics for every numeric column.
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_insights::reporting::DatasetOverview;
//!
//! let overview = DatasetOverview::from_frame(&table.df, 5)?;
//! println!("{}", overview.render());
//! ```

mod describe;
mod overview;
mod table;

pub use describe::{ColumnStats, describe, quantile};
pub use overview::{DatasetOverview, null_counts};
pub use table::{Align, TextTable};
