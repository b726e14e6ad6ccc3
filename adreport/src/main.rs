use adreport_core::{ReportConfig, Reporter};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod formatter;

#[derive(Parser)]
#[command(name = "adreport")]
#[command(about = "Weekly advertising and sales performance report from a spreadsheet export", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the workbook (defaults to the data directory lookup)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Directory searched for latest.xlsx and the legacy export
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Print only wins and alerts
    #[arg(long)]
    alerts_only: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for downstream rendering
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        ReportConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("adreport.toml");
        if default_config_path.exists() {
            ReportConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            ReportConfig::default()
        }
    };

    if let Some(data_dir) = cli.data_dir {
        config.input.data_dir = data_dir;
    }
    config.validate().context("Invalid configuration")?;

    let reporter = Reporter::with_config(config);
    let file = match cli.file {
        Some(file) => file,
        None => reporter.data_file()?,
    };
    tracing::debug!(path = %file.display(), "building report");

    let report = reporter
        .build_report(&file)
        .with_context(|| format!("Failed to build report from {}", file.display()))?;

    match cli.format {
        OutputFormat::Human => {
            if cli.alerts_only {
                formatter::print_insights(&report.insights);
            } else {
                formatter::print_human(&file, &report);
            }
        }
        OutputFormat::Json => {
            formatter::print_json(&file, &report, cli.alerts_only)?;
        }
    }

    Ok(())
}
