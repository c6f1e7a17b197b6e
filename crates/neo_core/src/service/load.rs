//! Load use-case: parse both feeds, then link them.
//!
//! # Invariants
//! - Linkage runs once, only after both feeds parsed completely.
//! - Any parse failure aborts the load before linkage starts.

use crate::config::CoreConfig;
use crate::database::{LinkError, NeoDatabase};
use crate::extract::{load_approaches, load_neos, ExtractError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

#[derive(Debug)]
pub enum LoadError {
    /// The NEO catalog could not be parsed.
    Neos(ExtractError),
    /// The close-approach feed could not be parsed.
    Approaches(ExtractError),
    Link(LinkError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neos(err) => write!(f, "failed to load NEO catalog: {err}"),
            Self::Approaches(err) => write!(f, "failed to load close approaches: {err}"),
            Self::Link(err) => write!(f, "failed to link feeds: {err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Neos(err) => Some(err),
            Self::Approaches(err) => Some(err),
            Self::Link(err) => Some(err),
        }
    }
}

impl From<LinkError> for LoadError {
    fn from(value: LinkError) -> Self {
        Self::Link(value)
    }
}

/// Builds a `NeoDatabase` from the feeds named in `config`.
///
/// Tolerated inconsistencies are available through `NeoDatabase::report()`.
pub fn load_database(config: &CoreConfig) -> Result<NeoDatabase, LoadError> {
    let started_at = Instant::now();

    let result = load_neos(&config.neo_csv)
        .map_err(LoadError::Neos)
        .and_then(|neos| {
            let approaches = load_approaches(&config.cad_json).map_err(LoadError::Approaches)?;
            Ok(NeoDatabase::link_with(neos, approaches, &config.link)?)
        });

    match &result {
        Ok(database) => info!(
            "event=load_database module=service status=ok neos={} inconsistencies={} duration_ms={}",
            database.neos().len(),
            database.report().inconsistency_count(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=load_database module=service status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}
