//! CLI entry point for the snapshot analysis.

use anyhow::{Context, Result};
use clap::Parser;
use covid_insights::config::{DEFAULT_CHARTS_DIR, DEFAULT_INPUT_PATH, DEFAULT_SUMMARY_PATH};
use covid_insights::{AnalysisConfig, Pipeline};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "COVID-19 country-level snapshot analysis",
    long_about = "Loads a country-level COVID-19 CSV, derives death and recovery rates,\n\
                  prints descriptive statistics, renders charts, and writes a ranking summary.\n\n\
                  Every option has a default, so running without arguments analyzes\n\
                  ./country_wise_latest.csv and writes ./insights_summary.txt.\n\n\
                  EXAMPLES:\n  \
                  # Default paths\n  \
                  covid-insights\n\n  \
                  # Another dataset, no charts\n  \
                  covid-insights -i data/latest.csv --no-charts\n\n  \
                  # Summary as JSON\n  \
                  covid-insights --json | jq .top_confirmed"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: String,

    /// Path of the summary text file (overwritten)
    #[arg(short, long, default_value = DEFAULT_SUMMARY_PATH)]
    output: String,

    /// Directory for rendered SVG charts
    #[arg(long, default_value = DEFAULT_CHARTS_DIR)]
    charts_dir: String,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Print the summary as JSON to stdout instead of the console report
    ///
    /// Disables all logging so stdout only contains the JSON document.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = AnalysisConfig::builder()
        .input_path(&args.input)
        .summary_path(&args.output)
        .charts_dir(&args.charts_dir)
        .render_charts(!args.no_charts)
        .build()?;

    info!("Loading dataset from: {}", args.input);

    let mut builder = Pipeline::builder().config(config);
    if !args.json {
        // Console report is user-facing output, independent of the log level
        builder = builder.on_console(|text| println!("{}", text));
    }

    let outcome = builder
        .build()?
        .run()
        .with_context(|| format!("Analysis of {} failed", args.input))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
    }

    Ok(())
}
