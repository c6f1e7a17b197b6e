//! Close approach record and its linked view.
//!
//! # Responsibility
//! - Hold time, distance and velocity of one close approach to Earth.
//! - Keep the raw designation until linkage resolves it into a `NeoId`.
//! - Render approaches only through `LinkedApproach`, which always has an NEO.
//!
//! # Invariants
//! - `time` is `None` only for the placeholder returned by `Default`.
//! - `neo` is set once, by `crate::database`, and always points at the object
//!   whose designation equals this approach's designation.

use super::measure::{is_unknown, UNKNOWN};
use super::neo::NearEarthObject;
use super::NeoId;
use crate::time::{cd_to_datetime, datetime_to_str, TimeParseError};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// A close approach to Earth by an NEO.
///
/// `time` is the UTC instant of closest approach (minute precision),
/// `distance` the nominal approach distance in au and `velocity` the relative
/// approach velocity in km/s.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    pub(crate) designation: Option<String>,
    pub time: Option<NaiveDateTime>,
    /// Nominal distance in astronomical units; `f64::NAN` when unknown.
    pub distance: f64,
    /// Relative velocity in km/s; `f64::NAN` when unknown.
    pub velocity: f64,
    pub(crate) neo: Option<NeoId>,
}

impl Default for CloseApproach {
    fn default() -> Self {
        Self {
            designation: None,
            time: None,
            distance: UNKNOWN,
            velocity: UNKNOWN,
            neo: None,
        }
    }
}

impl CloseApproach {
    /// Creates an unlinked approach with unknown distance and velocity.
    pub fn new(designation: impl Into<String>, time: NaiveDateTime) -> Self {
        Self {
            designation: Some(designation.into()),
            time: Some(time),
            ..Self::default()
        }
    }

    /// Creates an unlinked approach from the feed's raw `des` and `cd` text.
    ///
    /// # Errors
    /// - Returns `TimeParseError` when `cd` is not `YYYY-Mon-DD HH:MM`.
    pub fn from_feed(
        designation: impl Into<String>,
        cd: &str,
        distance: f64,
        velocity: f64,
    ) -> Result<Self, TimeParseError> {
        let time = cd_to_datetime(cd)?;
        Ok(Self::new(designation, time)
            .with_distance(distance)
            .with_velocity(velocity))
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Raw designation of the object this approach belongs to.
    pub fn designation(&self) -> Option<&str> {
        self.designation.as_deref()
    }

    /// Linked object handle; `None` before linkage.
    pub fn neo(&self) -> Option<NeoId> {
        self.neo
    }

    pub fn is_linked(&self) -> bool {
        self.neo.is_some()
    }

    pub fn distance_is_unknown(&self) -> bool {
        is_unknown(self.distance)
    }

    pub fn velocity_is_unknown(&self) -> bool {
        is_unknown(self.velocity)
    }

    /// Approach time as `YYYY-MM-DD HH:MM`, or empty when unset.
    pub fn time_str(&self) -> String {
        self.time.as_ref().map(datetime_to_str).unwrap_or_default()
    }

    /// Output row for report writers.
    pub fn serialize(&self) -> ApproachRecord {
        ApproachRecord {
            datetime_utc: self.time_str(),
            distance_au: self.distance,
            velocity_km_s: self.velocity,
        }
    }
}

/// Serialized approach fields in output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproachRecord {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
}

/// A linked approach together with the NEO it belongs to.
///
/// Obtained from `NeoDatabase`; borrowing both records keeps rendering total.
#[derive(Debug, Clone, Copy)]
pub struct LinkedApproach<'db> {
    approach: &'db CloseApproach,
    neo: &'db NearEarthObject,
}

impl<'db> LinkedApproach<'db> {
    pub(crate) fn new(approach: &'db CloseApproach, neo: &'db NearEarthObject) -> Self {
        Self { approach, neo }
    }

    pub fn approach(&self) -> &'db CloseApproach {
        self.approach
    }

    pub fn neo(&self) -> &'db NearEarthObject {
        self.neo
    }

    pub fn time(&self) -> Option<NaiveDateTime> {
        self.approach.time
    }

    pub fn distance(&self) -> f64 {
        self.approach.distance
    }

    pub fn velocity(&self) -> f64 {
        self.approach.velocity
    }

    pub fn time_str(&self) -> String {
        self.approach.time_str()
    }

    /// Full name of the linked NEO.
    pub fn fullname(&self) -> String {
        self.neo.fullname()
    }

    pub fn serialize(&self) -> ApproachRecord {
        self.approach.serialize()
    }
}

impl Display for LinkedApproach<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            self.fullname(),
            self.distance(),
            self.velocity()
        )
    }
}
