//! CLI entry point for the bike-share trip analyzer.
//!
//! Provides subcommands for cleaning a raw trip log and for producing
//! descriptive reports segmented by user type.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use bikeshare_analyzer::{
    analyzers::aggregate::build_report,
    output::{write_csv, write_json},
    parser::load_trips,
    prepare::prepare_trips,
};

#[derive(Parser)]
#[command(name = "bikeshare_analyzer")]
#[command(about = "A tool to clean and analyze bike-share trip logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a raw trip log and write the enriched record set
    Prepare {
        /// Path to the raw trip log CSV
        #[arg(value_name = "TRIP_LOG")]
        input: PathBuf,

        /// CSV file to write cleaned records to
        #[arg(short, long, default_value = "cleaned.csv")]
        output: PathBuf,
    },
    /// Clean a raw trip log and write aggregate reports
    Report {
        /// Path to the raw trip log CSV
        #[arg(value_name = "TRIP_LOG")]
        input: PathBuf,

        /// Directory to write report CSVs and summary JSON to
        #[arg(short = 'd', long, default_value = "reports")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare { input, output } => {
            let rows = load_trips(&input)?;
            let prepared = prepare_trips(&rows)?;

            write_csv(&output, &prepared.trips)?;
            info!(
                output = %output.display(),
                retained = prepared.counts.retained,
                "Cleaned record set written"
            );
        }
        Commands::Report { input, output_dir } => {
            let rows = load_trips(&input)?;
            let prepared = prepare_trips(&rows)?;
            let report = build_report(&prepared.trips, prepared.counts);

            std::fs::create_dir_all(&output_dir)?;
            write_csv(&output_dir.join("duration_stats.csv"), &report.duration_stats)?;
            write_csv(&output_dir.join("rides_per_day.csv"), &report.rides_per_day)?;
            write_csv(&output_dir.join("rides_per_month.csv"), &report.rides_per_month)?;
            write_csv(&output_dir.join("rides_per_hour.csv"), &report.rides_per_hour)?;
            write_csv(
                &output_dir.join("top_start_stations.csv"),
                &report.top_start_stations,
            )?;
            write_csv(
                &output_dir.join("bike_type_counts.csv"),
                &report.bike_type_counts,
            )?;
            write_json(&output_dir.join("summary.json"), &report)?;

            info!(output_dir = %output_dir.display(), "Reports written");
        }
    }

    Ok(())
}
