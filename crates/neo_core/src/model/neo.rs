//! Near-Earth object record.
//!
//! # Responsibility
//! - Hold identity, physical parameters and hazard flag of one NEO.
//! - Render the display sentence and the serialized output row.
//!
//! # Invariants
//! - `designation` is `None` only for the placeholder returned by `Default`.
//! - `name` is never `Some("")`; an empty name is the "no name" sentinel `None`.
//! - `approaches` is appended only by `crate::database` during linkage.

use super::measure::{is_unknown, UNKNOWN};
use super::ApproachId;
use serde::Serialize;
use std::fmt::{Display, Formatter};

const NO_MATCH_SENTENCE: &str = "No matching NEOs exist in the database.";

/// A near-Earth object (NEO).
///
/// Carries the primary designation (unique), an optional IAU name, the
/// diameter in kilometers (NaN when unknown) and the potentially-hazardous flag.
#[derive(Debug, Clone, PartialEq)]
pub struct NearEarthObject {
    /// Primary designation, e.g. `433`. Unique across a database.
    pub designation: Option<String>,
    /// IAU name, e.g. `Eros`.
    pub name: Option<String>,
    /// Diameter in kilometers; `f64::NAN` when unknown.
    pub diameter: f64,
    /// Whether the object is flagged potentially hazardous.
    pub hazardous: bool,
    pub(crate) approaches: Vec<ApproachId>,
}

impl Default for NearEarthObject {
    /// Placeholder object standing for "no match".
    fn default() -> Self {
        Self {
            designation: None,
            name: None,
            diameter: UNKNOWN,
            hazardous: false,
            approaches: Vec::new(),
        }
    }
}

impl NearEarthObject {
    /// Creates an object with the given designation and all optional fields
    /// at their defaults: no name, unknown diameter, not hazardous.
    pub fn new(designation: impl Into<String>) -> Self {
        Self {
            designation: Some(designation.into()),
            ..Self::default()
        }
    }

    /// Sets the IAU name, trimmed. Empty or whitespace-only input means "no name".
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Sets the diameter in kilometers. Pass `measure::UNKNOWN` for unknown.
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = diameter;
        self
    }

    pub fn with_hazardous(mut self, hazardous: bool) -> Self {
        self.hazardous = hazardous;
        self
    }

    /// Returns whether this is the "no match" placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.designation.is_none()
    }

    pub fn diameter_is_unknown(&self) -> bool {
        is_unknown(self.diameter)
    }

    /// Linked approaches in feed order. Empty until linkage.
    pub fn approaches(&self) -> &[ApproachId] {
        &self.approaches
    }

    /// Designation alone, or `"{designation} ({name})"` when named.
    pub fn fullname(&self) -> String {
        let designation = self.designation.as_deref().unwrap_or_default();
        match self.name.as_deref() {
            Some(name) => format!("{designation} ({name})"),
            None => designation.to_string(),
        }
    }

    /// Output row for report writers.
    pub fn serialize(&self) -> NeoRecord {
        NeoRecord {
            designation: self.designation.clone(),
            name: self.name.clone(),
            diameter_km: self.diameter,
            potentially_hazardous: self.hazardous,
        }
    }
}

impl Display for NearEarthObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_placeholder() {
            return f.write_str(NO_MATCH_SENTENCE);
        }

        write!(f, "A NearEarthObject {} has a ", self.fullname())?;
        if self.diameter_is_unknown() {
            f.write_str("unknown diameter")?;
        } else {
            write!(f, "diameter of {:.3} km", self.diameter)?;
        }
        let hazard = if self.hazardous { "is" } else { "is not" };
        write!(f, " and {hazard} potentially hazardous.")
    }
}

/// Serialized NEO fields in output column order.
///
/// `diameter_km` keeps the NaN sentinel; writers decide how to print it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoRecord {
    pub designation: Option<String>,
    pub name: Option<String>,
    pub diameter_km: f64,
    pub potentially_hazardous: bool,
}
