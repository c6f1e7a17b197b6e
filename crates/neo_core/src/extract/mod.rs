//! Feed parsers for the NEO catalog (CSV) and close-approach data (JSON).
//!
//! # Responsibility
//! - Turn each raw feed into canonical records in file order.
//! - Normalize empty optional fields to their sentinels.
//!
//! # Invariants
//! - Any malformed non-empty field aborts the whole load; no partial output.
//! - Only genuinely empty fields become `None`/NaN.
//! - Parsers never deduplicate or link; that belongs to `crate::database`.

use crate::time::TimeParseError;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

mod cad_json;
mod neo_csv;

pub use cad_json::{load_approaches, read_approaches};
pub use neo_csv::{load_neos, read_neos, NEO_COLUMNS};

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Feed extraction error.
///
/// `row` values are 1-based positions of data rows (headers excluded).
#[derive(Debug)]
pub enum ExtractError {
    /// The feed file does not exist or cannot be opened.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv(csv::Error),
    Json(serde_json::Error),
    /// A required CSV column is absent from the header row.
    MissingColumn(&'static str),
    /// A required field is empty.
    MissingField { row: usize, field: &'static str },
    /// A non-empty field cannot be coerced to its expected type.
    MalformedField {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },
    /// A structured-feed row does not have the documented shape.
    MalformedRow { row: usize, message: String },
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read feed `{}`: {source}", path.display())
            }
            Self::Csv(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::MissingColumn(column) => write!(f, "missing required column `{column}`"),
            Self::MissingField { row, field } => {
                write!(f, "row {row}: required field `{field}` is empty")
            }
            Self::MalformedField {
                row,
                field,
                value,
                reason,
            } => write!(f, "row {row}: malformed `{field}` value `{value}`: {reason}"),
            Self::MalformedRow { row, message } => write!(f, "row {row}: {message}"),
        }
    }
}

impl Error for ExtractError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::MissingColumn(_) => None,
            Self::MissingField { .. } => None,
            Self::MalformedField { .. } => None,
            Self::MalformedRow { .. } => None,
        }
    }
}

impl From<csv::Error> for ExtractError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Parses an optional measurement field.
///
/// Empty text is the unknown sentinel; anything else must be a finite float.
pub(crate) fn parse_measure(row: usize, field: &'static str, raw: &str) -> ExtractResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(crate::model::measure::UNKNOWN);
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|err| ExtractError::MalformedField {
            row,
            field,
            value: raw.to_string(),
            reason: err.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ExtractError::MalformedField {
            row,
            field,
            value: raw.to_string(),
            reason: "value must be finite".to_string(),
        });
    }
    Ok(value)
}

pub(crate) fn malformed_time(row: usize, field: &'static str, err: TimeParseError) -> ExtractError {
    ExtractError::MalformedField {
        row,
        field,
        value: err.input.clone(),
        reason: err.to_string(),
    }
}

/// Opens a feed file and runs `read` over it, logging `event=<event>` with
/// duration and record count.
pub(crate) fn load_with<T>(
    path: &Path,
    event: &'static str,
    read: impl FnOnce(BufReader<File>) -> ExtractResult<Vec<T>>,
) -> ExtractResult<Vec<T>> {
    let started_at = Instant::now();
    info!(
        "event={event} module=extract status=start path={}",
        path.display()
    );

    let result = File::open(path)
        .map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|file| read(BufReader::new(file)));

    match &result {
        Ok(records) => info!(
            "event={event} module=extract status=ok path={} records={} duration_ms={}",
            path.display(),
            records.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event={event} module=extract status=error path={} duration_ms={} error={}",
            path.display(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}
