//! CLI entry point for the table profiling report generator.

use anyhow::{Result, anyhow};
use clap::Parser;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use table_profiler::{CsvDirectorySink, Profiler, ProfilerConfig, ReportSink};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Automated Tabular Data Profiling",
    long_about = "Profiles a CSV table and writes a structured report: column type\n\
                  classification, numeric and categorical summaries, monthly\n\
                  aggregations, outliers and identifier candidates.\n\n\
                  EXAMPLES:\n  \
                  # Profile a single file\n  \
                  table-profiler -i sales.csv\n\n  \
                  # Profile every CSV in a directory\n  \
                  table-profiler --data-dir ./data --output-dir ./reports\n\n  \
                  # Wider frequency tables\n  \
                  table-profiler -i sales.csv --top-values 25"
)]
struct Args {
    /// Path to a single CSV file to profile
    ///
    /// When omitted, every *.csv under --data-dir is profiled instead
    #[arg(short, long)]
    input: Option<String>,

    /// Report directory for single-file mode
    ///
    /// Defaults to <output-dir>/<input_stem>_report
    #[arg(short, long)]
    output: Option<String>,

    /// Directory scanned for CSV files in batch mode
    #[arg(long, default_value = "data")]
    data_dir: String,

    /// Parent directory for generated reports
    #[arg(long, default_value = "reports")]
    output_dir: String,

    /// Rows kept in each categorical frequency table
    #[arg(long, default_value = "10")]
    top_values: usize,

    /// Example values recorded per outlier column
    #[arg(long, default_value = "5")]
    max_outlier_examples: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet);

    let config = ProfilerConfig::builder()
        .top_values(args.top_values)
        .max_outlier_examples(args.max_outlier_examples)
        .build()?;
    let profiler = Profiler::new(config)?;

    match args.input {
        Some(ref input) => run_single(&profiler, input, &args),
        None => run_batch(&profiler, &args),
    }
}

/// Profile one CSV file into one report directory.
fn run_single(profiler: &Profiler, input: &str, args: &Args) -> Result<()> {
    let input_path = Path::new(input);
    if !input_path.exists() {
        return Err(anyhow!("Input file not found: {}", input));
    }

    let report_dir = match args.output {
        Some(ref output) => PathBuf::from(output),
        None => Path::new(&args.output_dir).join(format!("{}_report", file_stem(input_path))),
    };

    profile_file(profiler, input_path, &report_dir)
}

/// Profile every CSV file under the data directory, one report each.
fn run_batch(profiler: &Profiler, args: &Args) -> Result<()> {
    let data_dir = Path::new(&args.data_dir);
    if !data_dir.is_dir() {
        return Err(anyhow!("Data directory not found: {}", args.data_dir));
    }

    let mut csv_files: Vec<PathBuf> = std::fs::read_dir(data_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    csv_files.sort();

    if csv_files.is_empty() {
        return Err(anyhow!("No CSV files found in {}", args.data_dir));
    }

    info!("Found {} CSV files in {}", csv_files.len(), args.data_dir);

    for path in &csv_files {
        let report_dir =
            Path::new(&args.output_dir).join(format!("{}_report", file_stem(path)));
        profile_file(profiler, path, &report_dir)?;
    }

    Ok(())
}

fn profile_file(profiler: &Profiler, path: &Path, report_dir: &Path) -> Result<()> {
    info!("Loading dataset from: {}", path.display());
    let df = load_csv(path)?;
    debug!("Dataset loaded: {:?}", df.shape());

    let report = profiler.generate(&df)?;
    CsvDirectorySink::new(report_dir).persist(&report)?;

    info!("Report written to: {}", report_dir.display());
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Load a CSV file with header and schema inference over the first rows.
fn load_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))
}
