//! Fasting CLI - Command-line interface for Fasting Flux
//!
//! Commands:
//! - validate: Validate a discrete fasting log
//! - continuous: Expand a discrete log into a per-minute signal
//! - streaks: Consecutive fasting minutes per sample
//! - daily: Cumulative and maximum consecutive hours per day
//! - summary: Full fasting report

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fasting_flux::types::{ContinuousSignal, FastRecord, ReportDay};
use fasting_flux::{
    DailyAggregator, FastingError, LogAdapter, ReportEncoder, StreakComputer, ValidationError,
    ValidationErrorKind, FASTING_VERSION,
};

/// Fasting - Derive continuous fasting metrics from a fasting log
#[derive(Parser)]
#[command(name = "fasting")]
#[command(version = FASTING_VERSION)]
#[command(about = "Turn a fasting log into per-minute signals and daily statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a discrete fasting log
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Expand a discrete log into a per-minute fasting signal
    Continuous {
        #[command(flatten)]
        input: LogInput,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },

    /// Consecutive fasting minutes at every sample
    Streaks {
        #[command(flatten)]
        input: SignalInput,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },

    /// Cumulative and maximum consecutive fasting hours per day
    Daily {
        #[command(flatten)]
        input: SignalInput,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },

    /// Full fasting report
    Summary {
        #[command(flatten)]
        input: LogInput,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },
}

#[derive(clap::Args)]
struct LogInput {
    /// Input file path (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Input format
    #[arg(long, default_value = "json")]
    input_format: InputFormat,
}

#[derive(clap::Args)]
struct SignalInput {
    #[command(flatten)]
    log: LogInput,

    /// Treat the input as a continuous signal (JSON array of {time, value})
    #[arg(long)]
    signal: bool,
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one fast per line)
    Ndjson,
    /// JSON array of fasts
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.exit_code();
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            code
        }
    }
}

fn run(cli: Cli) -> Result<(), FastingCliError> {
    match cli.command {
        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Continuous {
            input,
            output_format,
        } => {
            let records = read_log(&input)?;
            let signal = fasting_flux::build_continuous(&records)?;
            print!("{}", format_output(signal.samples(), &output_format)?);
            Ok(())
        }

        Commands::Streaks {
            input,
            output_format,
        } => {
            let signal = read_signal(&input)?;
            let streaks = StreakComputer::streaks(&signal)?;
            print!("{}", format_output(streaks.samples(), &output_format)?);
            Ok(())
        }

        Commands::Daily {
            input,
            output_format,
        } => {
            let signal = read_signal(&input)?;
            let cumulative = DailyAggregator::cumulative_hours_per_day(&signal)?;
            let max = DailyAggregator::max_consecutive_hours_per_day(&signal)?;

            let days: Vec<ReportDay> = cumulative
                .entries()
                .iter()
                .zip(max.entries())
                .map(|(c, m)| ReportDay {
                    date: c.date,
                    cumulative_hours: c.hours,
                    max_consecutive_hours: m.hours,
                })
                .collect();
            print!("{}", format_output(&days, &output_format)?);
            Ok(())
        }

        Commands::Summary {
            input,
            output_format,
        } => {
            let records = read_log(&input)?;
            let summary = fasting_flux::summarize(&records)?;
            let report = ReportEncoder::new().encode(&summary);
            let output = match output_format {
                OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)? + "\n",
                OutputFormat::Json | OutputFormat::Ndjson => serde_json::to_string(&report)? + "\n",
            };
            print!("{}", output);
            Ok(())
        }
    }
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), FastingCliError> {
    let records = parse_records(&read_input(input)?, &input_format)?;
    let result = fasting_flux::validate_discrete(&records);

    let report = ValidationReport {
        total_fasts: records.len(),
        valid: result.is_ok(),
        error: result.as_ref().err().map(|e| ValidationErrorDetail {
            kind: e.kind().as_str().to_string(),
            rows: e.offending().to_vec(),
            message: e.to_string(),
        }),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total fasts: {}", report.total_fasts);
        println!("Valid:       {}", report.valid);

        if let Some(err) = &report.error {
            println!("\nError ({}): {}", err.kind, err.message);
        }
    }

    result.map_err(FastingCliError::from)
}

// Helper functions

fn read_input(input: &Path) -> Result<String, FastingCliError> {
    if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            log::warn!("reading fasting log from an interactive terminal; end input with Ctrl-D");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_records(data: &str, format: &InputFormat) -> Result<Vec<FastRecord>, FastingCliError> {
    let records = match format {
        InputFormat::Ndjson => LogAdapter::parse_ndjson(data)?,
        InputFormat::Json => LogAdapter::parse_array(data)?,
    };
    log::debug!("parsed {} fast records", records.len());
    Ok(records)
}

fn read_log(input: &LogInput) -> Result<Vec<FastRecord>, FastingCliError> {
    parse_records(&read_input(&input.input)?, &input.input_format)
}

fn read_signal(input: &SignalInput) -> Result<ContinuousSignal, FastingCliError> {
    if input.signal {
        let data = read_input(&input.log.input)?;
        Ok(LogAdapter::parse_signal(&data)?)
    } else {
        let records = read_log(&input.log)?;
        Ok(fasting_flux::build_continuous(&records)?)
    }
}

fn format_output<T: Serialize>(items: &[T], format: &OutputFormat) -> Result<String, FastingCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for item in items {
                lines.push(serde_json::to_string(item)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(items)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(items)? + "\n"),
    }
}

// Error types

#[derive(Debug)]
enum FastingCliError {
    Io(io::Error),
    Compute(FastingError),
    Json(serde_json::Error),
}

impl FastingCliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            FastingCliError::Compute(FastingError::Validation(_)) => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

impl From<io::Error> for FastingCliError {
    fn from(e: io::Error) -> Self {
        FastingCliError::Io(e)
    }
}

impl From<FastingError> for FastingCliError {
    fn from(e: FastingError) -> Self {
        FastingCliError::Compute(e)
    }
}

impl From<ValidationError> for FastingCliError {
    fn from(e: ValidationError) -> Self {
        FastingCliError::Compute(FastingError::Validation(e))
    }
}

impl From<serde_json::Error> for FastingCliError {
    fn from(e: serde_json::Error) -> Self {
        FastingCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<FastingCliError> for CliError {
    fn from(e: FastingCliError) -> Self {
        match e {
            FastingCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            FastingCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            FastingCliError::Compute(FastingError::Validation(e)) => {
                let (code, hint) = match e.kind() {
                    ValidationErrorKind::MissingEndpoint => {
                        ("MISSING_ENDPOINT", "Remove or complete fasts that are still ongoing")
                    }
                    ValidationErrorKind::Order => ("ORDER_ERROR", "Check that each start precedes its end"),
                    ValidationErrorKind::Overlap => ("OVERLAP_ERROR", "Merge or remove overlapping fasts"),
                    ValidationErrorKind::Frequency => {
                        ("FREQUENCY_ERROR", "Signals must be sampled every minute")
                    }
                    ValidationErrorKind::InvalidValue => {
                        ("INVALID_VALUE", "Signal values must be 0 or 1")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            FastingCliError::Compute(FastingError::EmptyLog) => CliError {
                code: "EMPTY_LOG".to_string(),
                message: FastingError::EmptyLog.to_string(),
                hint: Some("Ensure input contains at least one completed fast".to_string()),
            },
            FastingCliError::Compute(FastingError::JsonError(e)) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            FastingCliError::Compute(FastingError::ParseError(msg)) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct ValidationReport {
    total_fasts: usize,
    valid: bool,
    error: Option<ValidationErrorDetail>,
}

#[derive(Serialize)]
struct ValidationErrorDetail {
    kind: String,
    rows: Vec<usize>,
    message: String,
}
