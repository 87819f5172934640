//! slam CLI - Command-line interface for SLAM Features
//!
//! Commands:
//! - build: Run the full pipeline and write the feature table
//! - validate: Check an exercise log for malformed lines
//! - doctor: Check that every configured input file is present
//! - schema: Print the output columns

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use slam_features::config::load_config_from;
use slam_features::parser::{LogParser, LogValidation};
use slam_features::{FeatureError, PipelineConfig, Track, OUTPUT_COLUMNS};
use slam_features::{PRODUCER_NAME, VERSION};

/// slam - Feature table builder for second-language-acquisition logs
#[derive(Parser)]
#[command(name = "slam")]
#[command(version = VERSION)]
#[command(about = "Build a learner feature table from SLAM exercise logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and write the feature table
    Build {
        /// Config file path (defaults to ./slam.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the logs and lexical tables
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum rows per user (inclusive)
        #[arg(long)]
        min_activity: Option<usize>,

        /// Maximum rows per user (inclusive)
        #[arg(long)]
        max_activity: Option<usize>,

        /// Write a leading row-index column
        #[arg(long)]
        row_index: bool,

        /// Write the run report as JSON (use - for stdout)
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Check an exercise log for malformed lines
    Validate {
        /// Log file path
        #[arg(short, long)]
        input: PathBuf,

        /// Track the log belongs to
        #[arg(long, value_enum, default_value = "en_es")]
        track: TrackArg,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that every configured input file is present
    Doctor {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the logs and lexical tables
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the output columns
    Schema {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TrackArg {
    /// Spanish speakers learning English
    #[value(name = "en_es")]
    EnEs,
    /// English speakers learning Spanish
    #[value(name = "es_en")]
    EsEn,
    /// English speakers learning French
    #[value(name = "fr_en")]
    FrEn,
}

impl From<TrackArg> for Track {
    fn from(arg: TrackArg) -> Self {
        match arg {
            TrackArg::EnEs => Track::EnEs,
            TrackArg::EsEn => Track::EsEn,
            TrackArg::FrEn => Track::FrEn,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("slam_features=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), SlamCliError> {
    match cli.command {
        Commands::Build {
            config,
            data_dir,
            output,
            min_activity,
            max_activity,
            row_index,
            report,
        } => {
            let mut config = resolve_config(config.as_deref(), data_dir)?;
            if let Some(output) = output {
                config.output = output;
            }
            if let Some(min) = min_activity {
                config.activity.min = min;
            }
            if let Some(max) = max_activity {
                config.activity.max = max;
            }
            if row_index {
                config.write_row_index = true;
            }
            cmd_build(&config, report.as_deref())
        }

        Commands::Validate { input, track, json } => cmd_validate(&input, track.into(), json),

        Commands::Doctor {
            config,
            data_dir,
            json,
        } => {
            let config = resolve_config(config.as_deref(), data_dir)?;
            cmd_doctor(&config, json)
        }

        Commands::Schema { json } => cmd_schema(json),
    }
}

fn resolve_config(
    path: Option<&Path>,
    data_dir: Option<PathBuf>,
) -> Result<PipelineConfig, SlamCliError> {
    let mut config = load_config_from(path)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

fn cmd_build(config: &PipelineConfig, report_path: Option<&Path>) -> Result<(), SlamCliError> {
    config.validate()?;
    let report = slam_features::run(config)?;

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        if path.to_string_lossy() == "-" {
            println!("{json}");
        } else {
            fs::write(path, json)?;
        }
    }

    eprintln!(
        "Wrote {} rows to {} ({} users dropped, {} incomplete rows)",
        report.rows_kept,
        config.output.display(),
        report.activity.dropped_users.len(),
        report.incomplete_rows
    );
    Ok(())
}

fn cmd_validate(input: &Path, track: Track, json: bool) -> Result<(), SlamCliError> {
    let report: LogValidation = LogParser::new(track).validate_file(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Track:          {track}");
        println!("Lines:          {}", report.lines);
        println!("Exercises:      {}", report.exercises);
        println!("Instances:      {}", report.instances);
        println!("Issues:         {}", report.issues.len());

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                println!("  - line {}: {}", issue.line, issue.reason);
            }
        }
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(SlamCliError::ValidationFailed(report.issues.len()))
    }
}

fn cmd_doctor(config: &PipelineConfig, json: bool) -> Result<(), SlamCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{PRODUCER_NAME} {VERSION}"),
    });

    checks.push(match config.validate() {
        Ok(()) => DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Ok,
            message: format!(
                "activity range [{}, {}], delimiter {:?}",
                config.activity.min, config.activity.max, config.delimiter
            ),
        },
        Err(e) => DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Error,
            message: e.to_string(),
        },
    });

    for (name, path) in config.input_files() {
        let check = if path.is_file() {
            DoctorCheck {
                name,
                status: CheckStatus::Ok,
                message: format!("found {}", path.display()),
            }
        } else {
            DoctorCheck {
                name,
                status: CheckStatus::Error,
                message: format!("missing {}", path.display()),
            }
        };
        checks.push(check);
    }

    if config.output.exists() {
        checks.push(DoctorCheck {
            name: "output".to_string(),
            status: CheckStatus::Warning,
            message: format!("{} exists and will be overwritten", config.output.display()),
        });
    }

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("slam Doctor Report");
        println!("==================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(SlamCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(json: bool) -> Result<(), SlamCliError> {
    if json {
        println!("{}", serde_json::to_string(&OUTPUT_COLUMNS)?);
    } else {
        println!("Output columns:");
        for (i, column) in OUTPUT_COLUMNS.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, column);
        }
    }
    Ok(())
}

// Error types

#[derive(Debug)]
enum SlamCliError {
    Io(io::Error),
    Feature(FeatureError),
    Json(serde_json::Error),
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for SlamCliError {
    fn from(e: io::Error) -> Self {
        SlamCliError::Io(e)
    }
}

impl From<FeatureError> for SlamCliError {
    fn from(e: FeatureError) -> Self {
        SlamCliError::Feature(e)
    }
}

impl From<serde_json::Error> for SlamCliError {
    fn from(e: serde_json::Error) -> Self {
        SlamCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<SlamCliError> for CliError {
    fn from(e: SlamCliError) -> Self {
        match e {
            SlamCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            SlamCliError::Feature(e) => {
                let (code, hint) = match &e {
                    FeatureError::MalformedLine { .. } => {
                        ("MALFORMED_LOG", "Run 'slam validate' on the log for details")
                    }
                    FeatureError::FileNotFound(_) => {
                        ("FILE_NOT_FOUND", "Run 'slam doctor' to list missing inputs")
                    }
                    FeatureError::Config(_) => ("CONFIG_ERROR", "Check slam.toml and CLI flags"),
                    FeatureError::EmptyInput => {
                        ("NO_INSTANCES", "Ensure the exercise logs are not empty")
                    }
                    _ => ("PIPELINE_ERROR", "Check the input files"),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            SlamCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            SlamCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} malformed lines", count),
                hint: Some("Fix the listed lines and retry".to_string()),
            },
            SlamCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
