//! In-memory NEO database built by linking approaches to their objects.
//!
//! # Responsibility
//! - Resolve each approach's designation into a `NeoId` exactly once.
//! - Own both record arenas and the designation/name lookup maps.
//! - Report feed inconsistencies instead of hiding them.
//!
//! # Invariants
//! - Designations are unique across `neos()`.
//! - Every stored approach is linked, and its NEO lists it exactly once.
//! - Per-object approach lists keep the approach feed order.
//! - Records are not mutated after `link_with` returns.

use crate::config::{DuplicatePolicy, LinkConfig, UnresolvedPolicy};
use crate::model::approach::{CloseApproach, LinkedApproach};
use crate::model::neo::NearEarthObject;
use crate::model::{ApproachId, NeoId};
use crate::time::datetime_to_str;
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type LinkResult<T> = Result<T, LinkError>;

/// Approach whose designation matched no NEO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedApproach {
    /// 0-based position in the approach input.
    pub index: usize,
    pub designation: Option<String>,
    pub time: Option<NaiveDateTime>,
}

impl Display for UnresolvedApproach {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let time = self.time.as_ref().map(datetime_to_str).unwrap_or_default();
        match self.designation.as_deref() {
            Some(designation) => write!(
                f,
                "approach #{} at `{time}` references unknown designation `{designation}`",
                self.index
            ),
            None => write!(f, "approach #{} at `{time}` has no designation", self.index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// An input object has no designation (placeholder records cannot be linked).
    MissingDesignation { index: usize },
    DuplicateDesignation(String),
    UnresolvedApproach(UnresolvedApproach),
}

impl Display for LinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDesignation { index } => {
                write!(f, "NEO #{index} has no designation")
            }
            Self::DuplicateDesignation(designation) => {
                write!(f, "duplicate NEO designation `{designation}`")
            }
            Self::UnresolvedApproach(unresolved) => write!(f, "{unresolved}"),
        }
    }
}

impl Error for LinkError {}

/// Inconsistencies tolerated by the active `LinkConfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Designations that appeared more than once, one entry per extra row.
    pub duplicates: Vec<String>,
    /// Approaches dropped because no NEO matched.
    pub unresolved: Vec<UnresolvedApproach>,
}

impl LinkReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.unresolved.is_empty()
    }

    pub fn inconsistency_count(&self) -> usize {
        self.duplicates.len() + self.unresolved.len()
    }
}

/// Linked NEOs and close approaches.
#[derive(Debug, Clone, Default)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
    report: LinkReport,
}

impl NeoDatabase {
    /// Links with the default policies (reject duplicates, drop orphans).
    pub fn link(
        neos: Vec<NearEarthObject>,
        approaches: Vec<CloseApproach>,
    ) -> LinkResult<Self> {
        Self::link_with(neos, approaches, &LinkConfig::default())
    }

    /// Builds the database from fully parsed feeds.
    ///
    /// # Errors
    /// - `MissingDesignation` when an input object is a placeholder.
    /// - `DuplicateDesignation` under `DuplicatePolicy::Reject`.
    /// - `UnresolvedApproach` under `UnresolvedPolicy::Reject`.
    pub fn link_with(
        neos: Vec<NearEarthObject>,
        approaches: Vec<CloseApproach>,
        config: &LinkConfig,
    ) -> LinkResult<Self> {
        let started_at = Instant::now();
        let input_neos = neos.len();
        let input_approaches = approaches.len();
        let mut report = LinkReport::default();

        let (mut neos, by_designation) =
            index_designations(neos, config.duplicate_designations, &mut report)?;

        let mut by_name = HashMap::new();
        for (index, neo) in neos.iter().enumerate() {
            if let Some(name) = &neo.name {
                by_name.entry(name.clone()).or_insert(NeoId(index));
            }
        }

        let mut linked = Vec::with_capacity(approaches.len());
        for (index, mut approach) in approaches.into_iter().enumerate() {
            let target = approach
                .designation
                .as_deref()
                .and_then(|designation| by_designation.get(designation).copied());

            match target {
                Some(neo_id) => {
                    let approach_id = ApproachId(linked.len());
                    approach.neo = Some(neo_id);
                    neos[neo_id.0].approaches.push(approach_id);
                    linked.push(approach);
                }
                None => {
                    let unresolved = UnresolvedApproach {
                        index,
                        designation: approach.designation.clone(),
                        time: approach.time,
                    };
                    if config.unresolved_approaches == UnresolvedPolicy::Reject {
                        warn!(
                            "event=link module=database status=error error_code=unresolved_approach index={index}"
                        );
                        return Err(LinkError::UnresolvedApproach(unresolved));
                    }
                    debug!("event=link_drop module=database reason=unresolved {unresolved}");
                    report.unresolved.push(unresolved);
                }
            }
        }

        if !report.is_clean() {
            warn!(
                "event=link module=database status=inconsistent duplicates={} unresolved={}",
                report.duplicates.len(),
                report.unresolved.len()
            );
        }
        info!(
            "event=link module=database status=ok input_neos={} input_approaches={} neos={} approaches={} duration_ms={}",
            input_neos,
            input_approaches,
            neos.len(),
            linked.len(),
            started_at.elapsed().as_millis()
        );

        Ok(Self {
            neos,
            approaches: linked,
            by_designation,
            by_name,
            report,
        })
    }

    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.0)
    }

    /// All linked approaches in feed order.
    pub fn approaches(&self) -> impl Iterator<Item = LinkedApproach<'_>> + '_ {
        (0..self.approaches.len()).filter_map(|index| self.approach(ApproachId(index)))
    }

    pub fn approach(&self, id: ApproachId) -> Option<LinkedApproach<'_>> {
        let approach = self.approaches.get(id.0)?;
        let neo = self.neo(approach.neo?)?;
        Some(LinkedApproach::new(approach, neo))
    }

    /// Approaches linked to `neo`, in feed order.
    pub fn approaches_of<'db>(
        &'db self,
        neo: &'db NearEarthObject,
    ) -> impl Iterator<Item = LinkedApproach<'db>> + 'db {
        neo.approaches()
            .iter()
            .filter_map(move |&id| self.approach(id))
    }

    /// Exact designation lookup, e.g. `433`.
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        let id = self.by_designation.get(designation.trim())?;
        self.neo(*id)
    }

    /// Exact IAU name lookup, e.g. `Eros`. First catalog entry wins on repeats.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        let id = self.by_name.get(name.trim())?;
        self.neo(*id)
    }

    /// Case-insensitive substring match on `fullname()`, in catalog order.
    pub fn search_fullname(&self, needle: &str) -> Vec<&NearEarthObject> {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.neos
            .iter()
            .filter(|neo| neo.fullname().to_lowercase().contains(&needle))
            .collect()
    }

    /// Designation to `NeoId` map built during linkage.
    pub fn designation_index(&self) -> &HashMap<String, NeoId> {
        &self.by_designation
    }

    pub fn report(&self) -> &LinkReport {
        &self.report
    }
}

fn index_designations(
    neos: Vec<NearEarthObject>,
    policy: DuplicatePolicy,
    report: &mut LinkReport,
) -> LinkResult<(Vec<NearEarthObject>, HashMap<String, NeoId>)> {
    let mut kept: Vec<NearEarthObject> = Vec::with_capacity(neos.len());
    let mut by_designation = HashMap::with_capacity(neos.len());

    for (index, mut neo) in neos.into_iter().enumerate() {
        let Some(designation) = neo.designation.clone() else {
            return Err(LinkError::MissingDesignation { index });
        };
        neo.approaches.clear();

        match by_designation.get(&designation).copied() {
            None => {
                by_designation.insert(designation, NeoId(kept.len()));
                kept.push(neo);
            }
            Some(existing) => {
                match policy {
                    DuplicatePolicy::Reject => {
                        warn!(
                            "event=link module=database status=error error_code=duplicate_designation designation={designation}"
                        );
                        return Err(LinkError::DuplicateDesignation(designation));
                    }
                    DuplicatePolicy::FirstWins => {}
                    DuplicatePolicy::LastWins => kept[existing.0] = neo,
                }
                debug!("event=link_drop module=database reason=duplicate designation={designation}");
                report.duplicates.push(designation);
            }
        }
    }

    Ok((kept, by_designation))
}
