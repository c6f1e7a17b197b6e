//! Load and linkage configuration.
//!
//! # Responsibility
//! - Name the two feed files and the linkage policies in one place.
//! - Allow JSON config files with every field optional.
//!
//! # Invariants
//! - `Default` is always a usable configuration.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_NEO_CSV: &str = "data/neos.csv";
pub const DEFAULT_CAD_JSON: &str = "data/cad.json";

/// What linkage does when the catalog repeats a designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the load with `LinkError::DuplicateDesignation`.
    #[default]
    Reject,
    /// Keep the earliest row, report the rest.
    FirstWins,
    /// Keep the latest row, report the rest.
    LastWins,
}

/// What linkage does with an approach whose designation has no NEO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Leave the approach out of the database and report it.
    #[default]
    Drop,
    /// Fail the load with `LinkError::UnresolvedApproach`.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub duplicate_designations: DuplicatePolicy,
    pub unresolved_approaches: UnresolvedPolicy,
}

impl LinkConfig {
    /// Rejects both kinds of feed inconsistency.
    pub fn strict() -> Self {
        Self {
            duplicate_designations: DuplicatePolicy::Reject,
            unresolved_approaches: UnresolvedPolicy::Reject,
        }
    }
}

/// Feed locations plus linkage policy for `load_database`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub neo_csv: PathBuf,
    pub cad_json: PathBuf,
    pub link: LinkConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            neo_csv: PathBuf::from(DEFAULT_NEO_CSV),
            cad_json: PathBuf::from(DEFAULT_CAD_JSON),
            link: LinkConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl CoreConfig {
    /// Parses a JSON config; absent fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(ConfigError::Parse)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
