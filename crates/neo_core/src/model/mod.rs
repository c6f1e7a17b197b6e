//! Canonical record model for near-Earth objects and their close approaches.
//!
//! # Responsibility
//! - Define the two record kinds produced by the feed parsers.
//! - Own the human-readable and serialized representations used downstream.
//!
//! # Invariants
//! - Unknown numeric values are `f64::NAN`, never `0.0` and never absent.
//! - Object/approach links are arena handles (`NeoId`, `ApproachId`), set only
//!   by the linkage pass in `crate::database`.

pub mod approach;
pub mod measure;
pub mod neo;

/// Handle of one `NearEarthObject` inside a `NeoDatabase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(pub(crate) usize);

impl NeoId {
    /// Position of the object in `NeoDatabase::neos()`.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of one `CloseApproach` inside a `NeoDatabase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(pub(crate) usize);

impl ApproachId {
    /// Position of the approach in database storage order.
    pub fn index(self) -> usize {
        self.0
    }
}
