//! Analysis pipeline.
//!
//! Runs the stages strictly in order: load, resolve, normalize, report,
//! chart, summarize. The first failing stage aborts the run.

use crate::charts::{ChartRenderer, NullRenderer, SvgChartRenderer, build_charts};
use crate::columns::resolve_columns;
use crate::config::AnalysisConfig;
use crate::error::{InsightsError, Result, ResultExt};
use crate::normalizer::{NormalizedTable, normalize};
use crate::reporting::DatasetOverview;
use crate::summary::InsightsSummary;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, error, info};

/// Callback receiving console text in the order it is produced.
pub type ConsoleSink = Box<dyn Fn(&str)>;

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub table: NormalizedTable,
    pub overview: DatasetOverview,
    pub summary: InsightsSummary,
    /// Titles of the rendered charts, in render order.
    pub charts: Vec<String>,
}

/// Load a CSV file with a header row.
///
/// The schema is inferred over the whole file so a stray text cell turns its
/// column into text instead of failing the load.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(InsightsError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file not found: {}", path.display()),
        )));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .context(format!("Reading {}", path.display()))?;

    debug!("Loaded {:?} from {}", df.shape(), path.display());
    Ok(df)
}

/// The snapshot analysis.
///
/// # Example
///
/// ```rust,ignore
/// use covid_insights::{AnalysisConfig, Pipeline};
///
/// let outcome = Pipeline::builder()
///     .config(AnalysisConfig::default())
///     .on_console(|text| println!("{}", text))
///     .build()?
///     .run()?;
/// ```
pub struct Pipeline {
    config: AnalysisConfig,
    renderer: Box<dyn ChartRenderer>,
    console: Option<ConsoleSink>,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Load the configured input file and analyze it.
    pub fn run(&mut self) -> Result<AnalysisOutcome> {
        let result = load_csv(&self.config.input_path).and_then(|df| self.analyze(df));
        if let Err(e) = &result {
            error!("Analysis failed: {}", e);
        }
        result
    }

    /// Analyze an already loaded table.
    pub fn analyze(&mut self, df: DataFrame) -> Result<AnalysisOutcome> {
        info!("Analyzing {} rows x {} columns", df.height(), df.width());

        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let columns = resolve_columns(&headers)?;

        let table = normalize(df, columns)?;

        let overview = DatasetOverview::from_frame(&table.df, self.config.preview_rows)?;
        self.emit(&overview.render());

        let charts = build_charts(&table, self.config.top_n, self.config.histogram_bins)?;
        let mut rendered = Vec::with_capacity(charts.len());
        for chart in &charts {
            self.renderer
                .render(chart)
                .context(format!("Rendering '{}'", chart.title()))?;
            rendered.push(chart.title().to_string());
        }
        info!("Rendered {} chart(s)", rendered.len());

        let summary = InsightsSummary::from_table(
            &table,
            self.config.top_n,
            self.config.recovery_top_n,
        )?;
        for section in [&summary.top_confirmed, &summary.top_deaths] {
            self.emit(&format!("\n{}\n{}", section.label, section.render()));
        }
        summary.write_to(&self.config.summary_path)?;
        self.emit(&format!(
            "\nSaved summary to {}",
            self.config.summary_path.display()
        ));

        Ok(AnalysisOutcome {
            table,
            overview,
            summary,
            charts: rendered,
        })
    }

    fn emit(&self, text: &str) {
        if let Some(console) = &self.console {
            console(text);
        }
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<AnalysisConfig>,
    renderer: Option<Box<dyn ChartRenderer>>,
    console: Option<ConsoleSink>,
}

impl PipelineBuilder {
    /// Set the configuration.
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom chart renderer instead of the configured default.
    pub fn renderer(mut self, renderer: impl ChartRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Receive console output (overview, top tables, save notice).
    pub fn on_console<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        self.console = Some(Box::new(f));
        self
    }

    /// Build the pipeline.
    ///
    /// Without an explicit renderer, charts go to SVG files in the configured
    /// directory, or nowhere when rendering is disabled.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| InsightsError::InvalidConfig(e.to_string()))?;

        let renderer: Box<dyn ChartRenderer> = match self.renderer {
            Some(renderer) => renderer,
            None if config.render_charts => Box::new(SvgChartRenderer::new(&config.charts_dir)),
            None => Box::new(NullRenderer),
        };

        Ok(Pipeline {
            config,
            renderer,
            console: self.console,
        })
    }
}
