//! migrate-validate CLI - cross-engine database migration validation.

use clap::{Parser, Subcommand};
use migrate_validate::{
    aggregate, normalize, run_all, CatalogConnector, Config, FileConnector, Overall, Side,
    ValidateError, ValidationResult,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

/// Exit code when validation itself fails (distinct from tool errors).
const EXIT_VALIDATION_FAILED: u8 = 4;

#[derive(Parser)]
#[command(name = "migrate-validate")]
#[command(about = "Validate structure and content fidelity of a database migration")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the validation and write the report
    Run {
        /// Override the report output path from the config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load and validate the configuration and both extracts, without
    /// comparing anything
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, ValidateError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format)
        .map_err(ValidateError::Config)?;

    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    let source = FileConnector::open(
        Side::Source,
        config.source.engine_kind()?,
        &config.source.extract,
        config.source.schema.as_deref(),
    )?;
    let target = FileConnector::open(
        Side::Target,
        config.target.engine_kind()?,
        &config.target.extract,
        config.target.schema.as_deref(),
    )?;
    info!("Source: {}", source.describe());
    info!("Target: {}", target.describe());

    let (src_raw, tgt_raw) = tokio::join!(source.fetch_catalog(), target.fetch_catalog());
    let src_raw = src_raw?;
    let tgt_raw = tgt_raw?;

    let src = normalize(Side::Source, source.engine(), &src_raw, &config.validation)?;
    let tgt = normalize(Side::Target, target.engine(), &tgt_raw, &config.validation)?;
    info!(
        "Normalized catalogs: source {} tables / {} routines, target {} tables / {} routines",
        src.table_count(),
        src.routine_count(),
        tgt.table_count(),
        tgt.routine_count()
    );

    match cli.command {
        Commands::Check => {
            println!("Configuration and extracts OK");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run { output } => {
            let result = aggregate(run_all(&src, &tgt, &config.validation));

            let report_path = output.unwrap_or_else(|| config.report.output.clone());
            std::fs::write(&report_path, result.to_json()?)?;
            info!("Report written to {:?}", report_path);

            if cli.output_json {
                println!("{}", result.to_json()?);
            } else {
                print_summary(&result);
            }

            if result.passed() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_VALIDATION_FAILED))
            }
        }
    }
}

fn print_summary(result: &ValidationResult) {
    let verdict = match result.summary.overall {
        Overall::Pass => "Validation passed!",
        Overall::Fail => "Validation FAILED",
    };
    println!("\n{}", verdict);
    println!("  Findings: {}", result.summary.total_findings);
    for (category, summary) in &result.summary.categories {
        println!(
            "  {}: {} checked, {} matched, {} mismatched, {} missing",
            category.sheet_name(),
            summary.total,
            summary.matched,
            summary.mismatched,
            summary.missing
        );
    }
    for (severity, count) in &result.summary.severities {
        println!("  {}: {}", severity, count);
    }
    println!("  Overall: {}", result.summary.overall);
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
