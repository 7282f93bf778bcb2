//! CLI entry point for the issue statistics tool.
//!
//! Provides subcommands for running the full descriptive analysis of a
//! bug-tracker CSV export and for surveying a raw export before
//! cleaning.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use issue_stats::{
    analyzers::{analyzer::run_analysis, inspect::inspect_path},
    config::{AnalysisConfig, SampleStrategy},
    output::{print_json, print_pretty, write_json},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "issue_stats")]
#[command(about = "A tool to analyze bug-tracker issue exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SampleStrategyArg {
    /// Keep the first N data rows in file order.
    FirstN,
    /// Seeded uniform sample without replacement, order-preserving.
    Random,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full severity analysis over a CSV export
    Analyze {
        /// Path to the CSV file to analyze
        #[arg(value_name = "FILE")]
        source: String,

        /// JSON config file; CLI flags override its values
        #[arg(short, long)]
        config: Option<String>,

        /// File to write the JSON report to (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Number of projects kept before collapsing into "Other"
        #[arg(short = 'p', long)]
        top_projects: Option<usize>,

        /// Cap on rows read from the source
        #[arg(short = 'n', long)]
        sample_size: Option<usize>,

        /// How to reduce an oversized source to the sample size
        #[arg(long, value_enum)]
        sample_strategy: Option<SampleStrategyArg>,

        /// Seed for the random sampling strategy
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Fail on severity labels outside the canonical set
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Produce an empty report instead of failing when cleaning
        /// removes every row
        #[arg(long, default_value_t = false)]
        allow_empty: bool,
    },
    /// Survey a raw CSV export: row count, columns, missing values
    Inspect {
        /// Path to the CSV file to survey
        #[arg(value_name = "FILE")]
        source: String,

        /// File to write the JSON survey to (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/issue_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("issue_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            config,
            output,
            top_projects,
            sample_size,
            sample_strategy,
            seed,
            strict,
            allow_empty,
        } => {
            let mut config = match config {
                Some(path) => AnalysisConfig::load(&path)?,
                None => AnalysisConfig::default(),
            };
            if let Some(k) = top_projects {
                config.top_project_count = k;
            }
            if let Some(n) = sample_size {
                config.sample_size = Some(n);
            }
            if let Some(strategy) = sample_strategy {
                config.sample_strategy = match strategy {
                    SampleStrategyArg::FirstN => SampleStrategy::FirstN,
                    SampleStrategyArg::Random => SampleStrategy::Random { seed },
                };
            }
            if strict {
                config.strict_labels = true;
            }
            if allow_empty {
                config.allow_empty = true;
            }

            let report = run_analysis(&source, &config)?;
            print_pretty(&report);

            match output {
                Some(path) => {
                    write_json(&path, &report)?;
                    info!(path = %path, "Report written");
                }
                None => print_json(&report)?,
            }
        }
        Commands::Inspect { source, output } => {
            let report = inspect_path(&source)?;

            match output {
                Some(path) => {
                    write_json(&path, &report)?;
                    info!(path = %path, "Survey written");
                }
                None => print_json(&report)?,
            }
        }
    }

    Ok(())
}
