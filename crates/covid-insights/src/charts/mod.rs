//! Chart generation.
//!
//! Charts are described as plain data ([`ChartSpec`]) and handed to a
//! [`ChartRenderer`]. The default renderer writes SVG files with `plotters`;
//! [`NullRenderer`] discards them when rendering is turned off.
//!
//! # Implementing a renderer
//!
//! ```rust,ignore
//! use covid_insights::charts::{ChartRenderer, ChartSpec};
//!
//! struct TitlePrinter;
//!
//! impl ChartRenderer for TitlePrinter {
//!     fn render(&mut self, chart: &ChartSpec) -> covid_insights::error::Result<()> {
//!         println!("{}", chart.title());
//!         Ok(())
//!     }
//! }
//! ```

mod builder;
mod svg;

pub use builder::{HistogramBin, build_charts, histogram_bins};
pub use svg::SvgChartRenderer;

use crate::error::Result;
use serde::Serialize;

/// A chart, described independently of how it is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    /// One bar per label.
    Bar {
        title: String,
        x_label: String,
        y_label: String,
        labels: Vec<String>,
        values: Vec<f64>,
    },
    /// Equal-width bins over the value range.
    Histogram {
        title: String,
        x_label: String,
        y_label: String,
        values: Vec<f64>,
        bins: usize,
    },
    /// One point per `(x, y)` pair.
    Scatter {
        title: String,
        x_label: String,
        y_label: String,
        points: Vec<(f64, f64)>,
    },
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            Self::Bar { title, .. } | Self::Histogram { title, .. } | Self::Scatter { title, .. } => {
                title
            }
        }
    }

    /// Filesystem-friendly name derived from the title.
    pub fn file_stem(&self) -> String {
        let mut stem = String::new();
        for c in self.title().chars() {
            if c.is_ascii_alphanumeric() {
                stem.push(c.to_ascii_lowercase());
            } else if !stem.is_empty() && !stem.ends_with('_') {
                stem.push('_');
            }
        }
        stem.trim_end_matches('_').to_string()
    }
}

/// Destination for charts.
pub trait ChartRenderer {
    /// Draw one chart.
    fn render(&mut self, chart: &ChartSpec) -> Result<()>;
}

/// Renderer that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl ChartRenderer for NullRenderer {
    fn render(&mut self, _chart: &ChartSpec) -> Result<()> {
        Ok(())
    }
}
