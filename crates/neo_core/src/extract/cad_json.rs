//! Close-approach reader (positional JSON rows).
//!
//! The feed is `{"fields": [...], "data": [[...], ...]}`. Rows are positional;
//! only `des`, `cd`, `dist` and `v_rel` are consumed.

use super::{load_with, malformed_time, parse_measure, ExtractError, ExtractResult};
use crate::model::approach::CloseApproach;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

const DES_POS: usize = 0;
const CD_POS: usize = 3;
const DIST_POS: usize = 4;
const V_REL_POS: usize = 7;

#[derive(Debug, Deserialize)]
struct CadDocument {
    data: Vec<Vec<Value>>,
}

/// Reads close approaches from JSON text.
///
/// # Errors
/// - `Json` when the document is not valid JSON or has no `data` array.
/// - `MalformedRow` when a row is too short or a consumed cell is not a
///   string, number or null.
/// - `MissingField` when `des` or `cd` is empty.
/// - `MalformedField` when `cd`, `dist` or `v_rel` cannot be parsed.
pub fn read_approaches<R: Read>(reader: R) -> ExtractResult<Vec<CloseApproach>> {
    let document: CadDocument = serde_json::from_reader(reader)?;

    document
        .data
        .iter()
        .enumerate()
        .map(|(row_idx, cells)| parse_approach_row(cells, row_idx + 1))
        .collect()
}

/// Loads close approaches from a JSON file.
pub fn load_approaches(path: impl AsRef<Path>) -> ExtractResult<Vec<CloseApproach>> {
    load_with(path.as_ref(), "load_approaches", read_approaches)
}

fn parse_approach_row(cells: &[Value], row: usize) -> ExtractResult<CloseApproach> {
    if cells.len() <= V_REL_POS {
        return Err(ExtractError::MalformedRow {
            row,
            message: format!(
                "expected at least {} positional fields, found {}",
                V_REL_POS + 1,
                cells.len()
            ),
        });
    }

    let designation = cell_text(cells, DES_POS, row)?;
    if designation.trim().is_empty() {
        return Err(ExtractError::MissingField { row, field: "des" });
    }

    let cd = cell_text(cells, CD_POS, row)?;
    if cd.trim().is_empty() {
        return Err(ExtractError::MissingField { row, field: "cd" });
    }

    let distance = parse_measure(row, "dist", &cell_text(cells, DIST_POS, row)?)?;
    let velocity = parse_measure(row, "v_rel", &cell_text(cells, V_REL_POS, row)?)?;

    CloseApproach::from_feed(designation.trim(), &cd, distance, velocity)
        .map_err(|err| malformed_time(row, "cd", err))
}

fn cell_text(cells: &[Value], position: usize, row: usize) -> ExtractResult<String> {
    match cells.get(position) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(Value::Null) | None => Ok(String::new()),
        Some(other) => Err(ExtractError::MalformedRow {
            row,
            message: format!("field at position {position} has unsupported value `{other}`"),
        }),
    }
}
