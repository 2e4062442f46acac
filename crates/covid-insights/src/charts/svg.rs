//! SVG chart rendering with `plotters`.

use super::builder::histogram_bins;
use super::{ChartRenderer, ChartSpec};
use crate::error::{InsightsError, Result, ResultExt};
use crate::utils::format_number;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);
const LABEL_FONT: (&str, u32) = ("sans-serif", 12);

/// Writes every chart as a numbered SVG file into a directory.
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    out_dir: PathBuf,
    size: (u32, u32),
    written: Vec<PathBuf>,
}

impl SvgChartRenderer {
    /// Create a renderer writing into `out_dir` (created on first render).
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            size: (1024, 768),
            written: Vec::new(),
        }
    }

    /// Set the image size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Files written so far, in render order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&self, chart: &ChartSpec) -> PathBuf {
        self.out_dir
            .join(format!("{:02}_{}.svg", self.written.len() + 1, chart.file_stem()))
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&mut self, chart: &ChartSpec) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir)
            .context(format!("Creating chart directory {}", self.out_dir.display()))?;

        let path = self.next_path(chart);
        let drawn = match chart {
            ChartSpec::Bar {
                title,
                x_label,
                y_label,
                labels,
                values,
            } => draw_bar(&path, self.size, title, x_label, y_label, labels, values),
            ChartSpec::Histogram {
                title,
                x_label,
                y_label,
                values,
                bins,
            } => draw_histogram(&path, self.size, title, x_label, y_label, values, *bins),
            ChartSpec::Scatter {
                title,
                x_label,
                y_label,
                points,
            } => draw_scatter(&path, self.size, title, x_label, y_label, points),
        };

        drawn.map_err(|reason| InsightsError::ChartRendering {
            title: chart.title().to_string(),
            reason,
        })?;

        info!("Chart saved: {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

type DrawResult = std::result::Result<(), String>;

/// Axis range from zero (or the minimum, if negative) to just above the maximum.
fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if max > min {
        min..max + (max - min) * 0.05
    } else {
        min..min + 1.0
    }
}

fn draw_bar(
    path: &Path,
    size: (u32, u32),
    title: &str,
    x_label: &str,
    y_label: &str,
    labels: &[String],
    values: &[f64],
) -> DrawResult {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let slots = labels.len().max(1);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d((0..slots).into_segmented(), value_range(values.iter().copied()))
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_labels(slots)
        .x_label_style(LABEL_FONT)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| format_number(*v))
        .draw()
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, &v)| {
            Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), v)],
                BLUE.mix(0.7).filled(),
            )
        }))
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())
}

fn draw_histogram(
    path: &Path,
    size: (u32, u32),
    title: &str,
    x_label: &str,
    y_label: &str,
    values: &[f64],
    bins: usize,
) -> DrawResult {
    let bins = histogram_bins(values, bins);
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let x_range = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => first.lower..last.upper,
        _ => 0.0..1.0,
    };
    let y_range = value_range(bins.iter().map(|b| b.count as f64));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_label_style(LABEL_FONT)
        .x_label_formatter(&|v| format_number(*v))
        .y_label_formatter(&|v| format_number(v.round()))
        .draw()
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], BLUE.mix(0.6).filled())
        }))
        .map_err(|e| e.to_string())?;
    chart
        .draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], BLACK.stroke_width(1))
        }))
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())
}

fn draw_scatter(
    path: &Path,
    size: (u32, u32),
    title: &str,
    x_label: &str,
    y_label: &str,
    points: &[(f64, f64)],
) -> DrawResult {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(
            value_range(points.iter().map(|p| p.0)),
            value_range(points.iter().map(|p| p.1)),
        )
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_label_style(LABEL_FONT)
        .x_label_formatter(&|v| format_number(*v))
        .y_label_formatter(&|v| format_number(*v))
        .draw()
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, BLUE.mix(0.7).filled())),
        )
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())
}
