use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Row validation errors
// ---------------------------------------------------------------------------

/// A source row that violates the launch-record invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidRecord {
    #[error("launch site is empty")]
    EmptySite,
    #[error("payload mass {0} kg is negative")]
    NegativePayload(f64),
    #[error("outcome class {0} is not 0 or 1")]
    UnknownOutcome(i64),
}

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Launch outcome, stored in the source data as the `class` column (0/1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// The numeric class value, used as the scatter y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = InvalidRecord;

    fn try_from(class: i64) -> Result<Self, InvalidRecord> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(InvalidRecord::UnknownOutcome(other)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single historical launch (one row of the source table).
#[derive(Debug, Clone)]
pub struct LaunchRecord {
    /// Sequential flight number; only ever used as a counting placeholder.
    pub flight_number: u32,
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Source columns the dashboard does not chart (booster version and
    /// friends), kept as display text for hover labels.
    pub extra: BTreeMap<String, String>,
}

impl LaunchRecord {
    /// Build a record, enforcing the row invariants:
    /// non-empty site, payload mass ≥ 0, class ∈ {0, 1}.
    pub fn new(
        flight_number: u32,
        site: impl Into<String>,
        payload_mass_kg: f64,
        class: i64,
    ) -> Result<Self, InvalidRecord> {
        let site = site.into();
        if site.trim().is_empty() {
            return Err(InvalidRecord::EmptySite);
        }
        if payload_mass_kg < 0.0 {
            return Err(InvalidRecord::NegativePayload(payload_mass_kg));
        }
        let outcome = Outcome::try_from(class)?;
        Ok(LaunchRecord {
            flight_number,
            site,
            payload_mass_kg,
            outcome,
            extra: BTreeMap::new(),
        })
    }

    /// Attach the uncharted source columns.
    pub fn with_extra(mut self, extra: BTreeMap<String, String>) -> Self {
        self.extra = extra;
        self
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full launch history with pre-computed site index and payload bounds.
/// Loaded once at startup and read-only thereafter.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches, in source order.
    pub records: Vec<LaunchRecord>,
    /// Sorted unique launch sites.
    pub sites: Vec<String>,
    /// Observed (min, max) payload mass across all records.
    pub payload_bounds: (f64, f64),
}

impl LaunchDataset {
    /// Build the site index and payload bounds from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites: Vec<String> = records
            .iter()
            .map(|r| r.site.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let payload_bounds = if records.is_empty() {
            (0.0, 0.0)
        } else {
            records
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                    (lo.min(r.payload_mass_kg), hi.max(r.payload_mass_kg))
                })
        };

        LaunchDataset {
            records,
            sites,
            payload_bounds,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `name` is one of the known launch sites.
    pub fn has_site(&self, name: &str) -> bool {
        self.sites.iter().any(|s| s == name)
    }
}
