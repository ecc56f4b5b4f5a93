//! CLI entry point for the dataset cleaning pipeline.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use limpia::{CleaningPipeline, CleaningReport, FormatHint, OperationRequest, PipelineConfig, io};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// CLI-compatible format hint enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    /// Comma-delimited text with a header row
    Csv,
    /// JSON array of key-value records
    JsonRecords,
}

impl From<CliFormat> for FormatHint {
    fn from(cli: CliFormat) -> Self {
        match cli {
            CliFormat::Csv => FormatHint::Csv,
            CliFormat::JsonRecords => FormatHint::JsonRecords,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Multi-step tabular dataset cleaning pipeline",
    long_about = "Applies an ordered list of cleaning operations to a CSV or JSON\n\
                  record-list dataset and writes the cleaned result.\n\n\
                  EXAMPLES:\n  \
                  # Clean with an operation list\n  \
                  limpia -i ventas.csv --ops ops.json\n\n  \
                  # JSON report on stdout for piping\n  \
                  limpia -i ventas.csv --ops ops.json --json | jq .total_afectados"
)]
struct Args {
    /// Path to the dataset to clean
    #[arg(short, long)]
    input: String,

    /// Path to the operation list (JSON array; entries are bare tags or
    /// {tipo, parametros} objects)
    #[arg(long)]
    ops: String,

    /// Output directory for the cleaned dataset
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Input format
    ///
    /// If not specified, inferred from the input file extension
    #[arg(long, value_enum)]
    format: Option<CliFormat>,

    /// Fail on malformed rows and unknown columns instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output the JSON report to stdout instead of a human-readable summary
    ///
    /// Disables all progress logs so stdout only contains the report
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled so stdout
/// only contains the JSON report.
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
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let requests: Vec<OperationRequest> = serde_json::from_slice(&fs::read(&args.ops)?)?;
    if requests.is_empty() {
        return Err(anyhow!("Operation list is empty: {}", args.ops));
    }

    let format = args
        .format
        .map(FormatHint::from)
        .unwrap_or_else(|| FormatHint::from_path(&args.input));

    info!("Loading dataset from: {}", args.input);
    let bytes = fs::read(&args.input)?;
    let loaded = io::load(&bytes, format, args.strict)?;
    if loaded.skipped_rows > 0 {
        warn!("Skipped {} malformed input rows", loaded.skipped_rows);
    }
    info!("Dataset loaded successfully: {:?}", loaded.df.shape());

    let config = PipelineConfig::builder().strict(args.strict).build()?;
    let pipeline = CleaningPipeline::new(config);
    let (cleaned, report) = pipeline.run(loaded.df, &requests)?;

    fs::create_dir_all(&args.output)?;
    let out_path = Path::new(&args.output).join(output_name(&args.input, format));
    fs::write(&out_path, io::write(&cleaned, format)?)?;
    info!("Cleaned dataset written to: {}", out_path.display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&args.input, &out_path, &report, loaded.skipped_rows);
    }
    Ok(())
}

/// Cleaned-file name: the input's base name with the cleaning prefix.
fn output_name(input: &str, format: FormatHint) -> String {
    let base = Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    let extension = match format {
        FormatHint::Csv => "csv",
        FormatHint::JsonRecords => "json",
    };
    format!("clean_multi_{}.{}", base, extension)
}

/// Human-readable run summary.
///
/// Uses `println!` intentionally: this is the primary CLI output and should
/// be visible regardless of log level.
fn print_summary(input: &str, out_path: &Path, report: &CleaningReport, skipped_rows: usize) {
    println!("\n{}", "=".repeat(80));
    println!("CLEANING SUMMARY");
    println!("{}\n", "=".repeat(80));

    println!("  Input:  {}", input);
    println!("  Output: {}", out_path.display());
    if skipped_rows > 0 {
        println!("  Skipped input rows: {}", skipped_rows);
    }
    println!();

    println!("OPERATIONS");
    println!("{}", "-".repeat(40));
    for op in &report.operaciones {
        if op.celdas_modificadas > 0 {
            println!(
                "  {:<16} {} rows removed, {} cells modified",
                op.tipo, op.afectados, op.celdas_modificadas
            );
        } else {
            println!("  {:<16} {} rows removed", op.tipo, op.afectados);
        }
    }
    println!("  Total rows affected: {}", report.total_afectados);
    println!();

    println!("FINAL DATASET");
    println!("{}", "-".repeat(40));
    println!("  Rows:       {}", report.stats.total_filas);
    println!("  Columns:    {}", report.stats.total_columnas);
    println!("  Null cells: {}", report.stats.nulls);
    println!("  Duplicates: {}", report.stats.duplicados);
    println!("  Outliers removed: {}", report.stats.outliers);
    println!("{}", "=".repeat(80));
}
