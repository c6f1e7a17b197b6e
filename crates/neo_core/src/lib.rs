//! Extraction and linkage core for near-Earth object feeds.
//! Parses the NEO catalog and close-approach feed into typed records and links
//! each approach to the object that produced it.

pub mod config;
pub mod database;
pub mod extract;
pub mod logging;
pub mod model;
pub mod service;
pub mod time;

pub use config::{ConfigError, CoreConfig, DuplicatePolicy, LinkConfig, UnresolvedPolicy};
pub use database::{LinkError, LinkReport, LinkResult, NeoDatabase, UnresolvedApproach};
pub use extract::{
    load_approaches, load_neos, read_approaches, read_neos, ExtractError, ExtractResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::approach::{ApproachRecord, CloseApproach, LinkedApproach};
pub use model::measure::{is_unknown, UNKNOWN};
pub use model::neo::{NearEarthObject, NeoRecord};
pub use model::{ApproachId, NeoId};
pub use service::load::{load_database, LoadError};
pub use time::{cd_to_datetime, datetime_to_str, TimeParseError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
