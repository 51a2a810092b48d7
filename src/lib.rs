//! fimov - move images into dated folders
//!
//! This library loads keyword profiles from a JSON configuration, parses a
//! date window from the command line, and moves every file in a profile's
//! source tree whose modification time falls inside that window into a folder
//! under the profile's destination.

pub mod cli;
pub mod config;
pub mod date_range;
pub mod file_organizer;
pub mod output;

pub use config::{ConfigError, PathConfig, ProfileConfig};
pub use date_range::{DateError, DateRange};
pub use file_organizer::{FileOrganizer, OrganizeError, OrganizeReport};

pub use cli::{AppError, CliError, OrganizeRequest, parse_args, run_cli};
