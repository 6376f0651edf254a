//! Parking Section Types
//!
//! A section is a named parking area with a spot capacity and up to
//! [`MAX_SCORES`] raw priority scores. The full set of sections is replaced
//! once per allocation cycle.
//!
//! # Score Slots
//!
//! - Slot 0: entrance score (distance/cost from the entrance)
//! - Slot 1: elevator score (distance/cost from the elevator)
//!
//! Lower scores rank better.

pub mod criterion;
pub mod record;

use heapless::String;

pub use criterion::{active_score, Criterion};
pub use record::{
    is_terminator, parse_record, RecordError, RecordLayout, RecordLine, TerminationRule, LINE_LEN,
};

/// Maximum section name length in bytes
pub const SECTION_NAME_LEN: usize = 16;

/// Number of raw score slots per section
pub const MAX_SCORES: usize = 2;

/// Bounds-checked section name
pub type SectionName = String<SECTION_NAME_LEN>;

/// Build a section name, rejecting names that do not fit instead of truncating.
pub fn section_name(name: &str) -> Result<SectionName, RecordError> {
    if name.is_empty() {
        return Err(RecordError::EmptyName);
    }
    let mut out = SectionName::new();
    out.push_str(name).map_err(|_| RecordError::NameTooLong)?;
    Ok(out)
}

/// Parking section for the current allocation cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    /// Section name (unique within one registry snapshot)
    pub name: SectionName,
    /// Total spot capacity
    pub spots: u16,
    /// Raw scores as received (unused slots are zero)
    pub scores: [i32; MAX_SCORES],
    /// Score selected by the active criterion
    pub active_score: i32,
}

impl Section {
    /// Create a section with no scores
    pub fn new(name: &str, spots: u16) -> Result<Self, RecordError> {
        Ok(Self {
            name: section_name(name)?,
            spots,
            scores: [0; MAX_SCORES],
            active_score: 0,
        })
    }

    /// Set raw scores; the entrance score becomes the default active score.
    ///
    /// Extra values beyond [`MAX_SCORES`] are ignored.
    pub fn with_scores(mut self, scores: &[i32]) -> Self {
        for (slot, value) in self.scores.iter_mut().zip(scores) {
            *slot = *value;
        }
        self.active_score = self.scores[0];
        self
    }

    /// Entrance score (slot 0)
    pub fn entrance_score(&self) -> i32 {
        self.scores[0]
    }

    /// Elevator score (slot 1)
    pub fn elevator_score(&self) -> i32 {
        self.scores[1]
    }

    /// Whether the section has any spots at all
    pub fn has_capacity(&self) -> bool {
        self.spots > 0
    }
}
