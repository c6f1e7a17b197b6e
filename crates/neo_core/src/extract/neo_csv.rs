//! NEO catalog reader (header-named CSV).

use super::{load_with, parse_measure, ExtractError, ExtractResult};
use crate::model::neo::NearEarthObject;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;

/// Columns consumed from the catalog, in `[pdes, name, diameter, pha]` order.
pub const NEO_COLUMNS: [&str; 4] = ["pdes", "name", "diameter", "pha"];

const HAZARDOUS_MARKER: &str = "Y";

struct ColumnIndex {
    width: usize,
    pdes: usize,
    name: usize,
    diameter: usize,
    pha: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> ExtractResult<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|header| header.trim() == column)
                .ok_or(ExtractError::MissingColumn(column))
        };

        let [pdes, name, diameter, pha] = NEO_COLUMNS;
        Ok(Self {
            width: headers.len(),
            pdes: find(pdes)?,
            name: find(name)?,
            diameter: find(diameter)?,
            pha: find(pha)?,
        })
    }
}

/// Reads NEO records from CSV text.
///
/// # Errors
/// - `MissingColumn` when a required header is absent.
/// - `MissingField` when `pdes` is empty.
/// - `MalformedRow` when a row has a different cell count than the header.
/// - `MalformedField` when `diameter` is non-empty and not a positive finite
///   float.
/// - `Csv` for malformed CSV syntax.
pub fn read_neos<R: Read>(reader: R) -> ExtractResult<Vec<NearEarthObject>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut neos = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        neos.push(parse_neo_row(&record, &columns, row_idx + 1)?);
    }
    Ok(neos)
}

/// Loads NEO records from a CSV file.
pub fn load_neos(path: impl AsRef<Path>) -> ExtractResult<Vec<NearEarthObject>> {
    load_with(path.as_ref(), "load_neos", read_neos)
}

fn parse_neo_row(
    record: &StringRecord,
    columns: &ColumnIndex,
    row: usize,
) -> ExtractResult<NearEarthObject> {
    if record.len() != columns.width {
        return Err(ExtractError::MalformedRow {
            row,
            message: format!(
                "expected {} fields to match the header, found {}",
                columns.width,
                record.len()
            ),
        });
    }
    let field = |index: usize| record.get(index).unwrap_or_default();

    let designation = field(columns.pdes).trim();
    if designation.is_empty() {
        return Err(ExtractError::MissingField { row, field: "pdes" });
    }

    let diameter = parse_diameter(row, field(columns.diameter))?;
    let hazardous = field(columns.pha) == HAZARDOUS_MARKER;

    Ok(NearEarthObject::new(designation)
        .with_name(field(columns.name))
        .with_diameter(diameter)
        .with_hazardous(hazardous))
}

// A physical size of zero or less is bad data, not a known value.
fn parse_diameter(row: usize, raw: &str) -> ExtractResult<f64> {
    let diameter = parse_measure(row, "diameter", raw)?;
    if diameter <= 0.0 {
        return Err(ExtractError::MalformedField {
            row,
            field: "diameter",
            value: raw.to_string(),
            reason: "diameter must be positive".to_string(),
        });
    }
    Ok(diameter)
}
