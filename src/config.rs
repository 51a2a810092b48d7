//! Keyword profiles and path validation.
//!
//! The configuration is a JSON object mapping each keyword to the pair of
//! directories it organizes:
//!
//! ```json
//! {
//!   "camera":   {"source": "/media/camera/import", "destination": "/photos/camera"},
//!   "whatsapp": {"source": "/media/whatsapp",      "destination": "/photos/whatsapp"}
//! }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working and home directories.
pub const CONFIG_FILE_NAME: &str = ".fimov.json";

/// Which side of a profile a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    Source,
    Destination,
}

impl std::fmt::Display for PathRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathRole::Source => write!(f, "source"),
            PathRole::Destination => write!(f, "destination"),
        }
    }
}

/// Errors that can occur while loading the configuration or resolving a profile.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The configuration file could not be read (missing, permission denied, ...).
    ConfigRead {
        /// The file that was tried.
        path: PathBuf,
        /// The underlying IO error message.
        reason: String,
    },
    /// The file is not valid JSON of the expected shape.
    ConfigParse {
        path: PathBuf,
        reason: String,
    },
    /// The keyword has no entry in the configuration.
    UnknownKeyword {
        /// The keyword given on the command line.
        keyword: String,
        /// Keywords the configuration does define, sorted.
        known: Vec<String>,
    },
    /// A profile directory does not exist.
    PathNotFound { role: PathRole, path: PathBuf },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigRead { path, reason } => {
                write!(
                    f,
                    "could not read configuration file {}: {}",
                    path.display(),
                    reason
                )
            }
            ConfigError::ConfigParse { path, reason } => {
                write!(
                    f,
                    "malformed configuration file {}: {}",
                    path.display(),
                    reason
                )
            }
            ConfigError::UnknownKeyword { keyword, known } => {
                if known.is_empty() {
                    write!(f, "unknown keyword {} (no profiles configured)", keyword)
                } else {
                    write!(
                        f,
                        "unknown keyword {} (expected one of: {})",
                        keyword,
                        known.join(", ")
                    )
                }
            }
            ConfigError::PathNotFound { role, path } => {
                write!(f, "{} path does not exist: {}", role, path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A source/destination directory pair selected by a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathConfig {
    /// Directory tree the files are taken from.
    pub source: PathBuf,
    /// Directory under which the dated folder is created.
    pub destination: PathBuf,
}

impl PathConfig {
    /// Checks that both directories exist, source first.
    ///
    /// Only existence is checked, not that the paths are directories or writable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.source.exists() {
            return Err(ConfigError::PathNotFound {
                role: PathRole::Source,
                path: self.source.clone(),
            });
        }

        if !self.destination.exists() {
            return Err(ConfigError::PathNotFound {
                role: PathRole::Destination,
                path: self.destination.clone(),
            });
        }

        Ok(())
    }
}

/// All profiles, keyed by keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ProfileConfig {
    profiles: BTreeMap<String, PathConfig>,
}

impl ProfileConfig {
    /// Load the configuration.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.fimov.json` in the current directory
    /// 3. Look for `~/.fimov.json` in the home directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigRead` if no file can be read and
    /// `ConfigError::ConfigParse` if its content is malformed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home).join(CONFIG_FILE_NAME);
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        // Report the primary location so the message tells the user where to put it
        Self::load_from_file(&local_config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_json(&content).map_err(|reason| ConfigError::ConfigParse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parses configuration text.
    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// Returns the profile for `keyword`.
    pub fn profile(&self, keyword: &str) -> Result<&PathConfig, ConfigError> {
        self.profiles
            .get(keyword)
            .ok_or_else(|| ConfigError::UnknownKeyword {
                keyword: keyword.to_string(),
                known: self.keywords().map(str::to_string).collect(),
            })
    }

    /// Configured keywords in sorted order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
