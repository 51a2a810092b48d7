//! Command-line interface module for fimov.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing into an [`OrganizeRequest`]
//! - Profile lookup and path validation
//! - Date range and folder name defaults
//! - Organization orchestration and the final summary
//! - Mapping every failure to a distinct exit code

use crate::config::{ConfigError, ProfileConfig};
use crate::date_range::{DateError, DateRange};
use crate::file_organizer::{FileOrganizer, OrganizeError, OrganizeReport};
use crate::output::OutputFormatter;
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// One-line usage shown with argument errors.
pub const USAGE: &str =
    "Usage: fimov <keyword> --start <start-date> [--end <end-date>] [--name <folder-name>]";

/// Exit code used when some files could not be moved but the walk completed.
pub const EXIT_PARTIAL_MOVE: u8 = 10;

#[derive(Debug, Parser)]
#[command(
    name = "fimov",
    version,
    about = "Move images modified between two dates into a dated folder"
)]
struct CliArgs {
    /// Profile from the configuration file (e.g. camera, whatsapp)
    keyword: Option<String>,

    /// Start date, exclusive (format: YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// End date, exclusive (format: YYYY-MM-DD); defaults to today
    #[arg(long)]
    end: Option<String>,

    /// Folder name; defaults to <start>_<end>
    #[arg(long)]
    name: Option<String>,

    /// Configuration file; defaults to ./.fimov.json, then ~/.fimov.json
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// The parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeRequest {
    /// Profile keyword, looked up in the configuration.
    pub keyword: String,
    /// Start date text as given.
    pub start: String,
    /// End date text, if given.
    pub end: Option<String>,
    /// Destination folder name, if given.
    pub name: Option<String>,
    /// Explicit configuration file, if given.
    pub config_path: Option<PathBuf>,
}

/// Errors produced while parsing the command line.
#[derive(Debug)]
pub enum CliError {
    /// No keyword was given.
    MissingKeyword,
    /// `--start` was missing or empty.
    MissingStart { keyword: String },
    /// `--name` would place the folder outside the profile destination.
    InvalidName { name: String },
    /// clap rejected the arguments, or help/version was requested.
    Clap(clap::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::MissingKeyword => write!(f, "keyword is required"),
            CliError::MissingStart { keyword } => {
                write!(f, "--start flag is required for {}", keyword)
            }
            CliError::InvalidName { name } => {
                write!(
                    f,
                    "--name must be a relative folder name without '..', got {}",
                    name
                )
            }
            CliError::Clap(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

/// Any error that ends a run, with the exit code it maps to.
#[derive(Debug)]
pub enum AppError {
    Usage(CliError),
    Config(ConfigError),
    Date(DateError),
    Organize(OrganizeError),
}

impl AppError {
    /// Process exit code for this error. Every kind has its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) => 2,
            AppError::Config(ConfigError::ConfigRead { .. }) => 3,
            AppError::Config(ConfigError::ConfigParse { .. }) => 4,
            AppError::Config(ConfigError::UnknownKeyword { .. }) => 5,
            AppError::Config(ConfigError::PathNotFound { .. }) => 6,
            AppError::Date(_) => 7,
            AppError::Organize(OrganizeError::WalkFailed { .. }) => 8,
            AppError::Organize(OrganizeError::DirectoryCreationFailed { .. }) => 9,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Usage(e) => write!(f, "{}", e),
            AppError::Config(e) => write!(f, "{}", e),
            AppError::Date(e) => write!(f, "{}", e),
            AppError::Organize(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<CliError> for AppError {
    fn from(error: CliError) -> Self {
        AppError::Usage(error)
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        AppError::Config(error)
    }
}

impl From<DateError> for AppError {
    fn from(error: DateError) -> Self {
        AppError::Date(error)
    }
}

impl From<OrganizeError> for AppError {
    fn from(error: OrganizeError) -> Self {
        AppError::Organize(error)
    }
}

/// Parses a full argument list, program name first.
///
/// # Examples
///
/// ```
/// use fimov::cli::parse_args;
///
/// let request = parse_args(["fimov", "camera", "--start", "2020-01-01"]).unwrap();
/// assert_eq!(request.keyword, "camera");
/// assert_eq!(request.end, None);
/// ```
pub fn parse_args<I, T>(args: I) -> Result<OrganizeRequest, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let parsed = CliArgs::try_parse_from(args).map_err(CliError::Clap)?;

    let keyword = non_empty(parsed.keyword).ok_or(CliError::MissingKeyword)?;
    let start = non_empty(parsed.start).ok_or_else(|| CliError::MissingStart {
        keyword: keyword.clone(),
    })?;
    let name = non_empty(parsed.name);
    if let Some(name) = &name {
        check_folder_name(name)?;
    }

    Ok(OrganizeRequest {
        keyword,
        start,
        end: non_empty(parsed.end),
        name,
        config_path: parsed.config,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Accepts names made only of plain components, so the folder always lands
/// under the profile destination.
pub fn check_folder_name(name: &str) -> Result<(), CliError> {
    let path = Path::new(name);
    let plain = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    let has_folder = path.components().any(|c| matches!(c, Component::Normal(_)));

    if plain && has_folder {
        Ok(())
    } else {
        Err(CliError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Runs an organization request against today's local date.
///
/// # Examples
///
/// ```no_run
/// use fimov::cli::{parse_args, run_cli};
///
/// let request = parse_args(["fimov", "camera", "--start", "2020-01-01"])?;
/// let report = run_cli(&request)?;
/// println!("Moved {} files", report.moved.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn run_cli(request: &OrganizeRequest) -> Result<OrganizeReport, AppError> {
    run_cli_at(request, Local::now().date_naive())
}

/// Runs an organization request, using `today` as the default end date.
///
/// This function:
/// 1. Loads the profile configuration
/// 2. Resolves the keyword to its source/destination pair
/// 3. Validates that both directories exist
/// 4. Fills in the end date and folder name defaults
/// 5. Parses the date range
/// 6. Moves matching files into `<destination>/<name>`
/// 7. Prints a summary
pub fn run_cli_at(request: &OrganizeRequest, today: NaiveDate) -> Result<OrganizeReport, AppError> {
    if let Some(name) = &request.name {
        check_folder_name(name)?;
    }

    let config = ProfileConfig::load(request.config_path.as_deref())?;
    let profile = config.profile(&request.keyword)?;
    profile.validate()?;

    let (range, end) = DateRange::resolve(&request.start, request.end.as_deref(), today)?;
    let name = request
        .name
        .clone()
        .unwrap_or_else(|| format!("{}_{}", request.start, end));

    if range.is_empty() {
        OutputFormatter::warning(&format!(
            "Start date {} is not before end date {}; no files can match.",
            request.start, end
        ));
    }

    let destination = profile.destination.join(&name);
    OutputFormatter::info(&format!(
        "Moving files from {} modified between {} and {} into {}",
        profile.source.display(),
        request.start,
        end,
        destination.display()
    ));

    let report = FileOrganizer::organize(&profile.source, &destination, &range)?;

    if report.is_complete_success() {
        OutputFormatter::success("Images organized successfully.");
    } else {
        OutputFormatter::warning(&format!(
            "{} file(s) could not be moved. Please review errors above.",
            report.failed.len()
        ));
    }
    OutputFormatter::summary_table(&report);

    Ok(report)
}
