//! Allocation Cycle State Types

use core::fmt;

use crate::section::SectionName;

/// Allocation cycle state
///
/// `Idle → Fetching → Scoring → Allocating → Presenting → Idle`. Fetching
/// goes straight to Presenting when no section was received.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AllocatorState {
    /// Waiting for an allocation request
    #[default]
    Idle,
    /// Pulling section records from the peer
    Fetching,
    /// Applying the criterion and sorting
    Scoring,
    /// Choosing a section and reserving a spot
    Allocating,
    /// Outcome ready for the presentation sink
    Presenting,
}

impl fmt::Display for AllocatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AllocatorState::Idle => "Idle",
            AllocatorState::Fetching => "Fetching",
            AllocatorState::Scoring => "Scoring",
            AllocatorState::Allocating => "Allocating",
            AllocatorState::Presenting => "Presenting",
        };
        f.write_str(name)
    }
}

/// Result of one allocation cycle, presented exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationOutcome {
    /// No section records arrived before termination or timeout
    NoData,
    /// Every section is full or fully reserved
    NoFreeSpot,
    /// A spot was reserved
    Allocated {
        /// Chosen section
        section: SectionName,
        /// Free spots in the section when it was chosen
        remaining: u16,
        /// Active score the section was ranked by
        score: i32,
        /// 1-based spot ordinal within the section's holds
        spot: u16,
        /// Sequence id of the new reservation
        seq: u32,
    },
}

impl AllocationOutcome {
    /// Check whether a spot was reserved
    pub fn is_allocated(&self) -> bool {
        matches!(self, AllocationOutcome::Allocated { .. })
    }
}

/// Result of ingesting one line while fetching
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestStatus {
    /// A section was stored; keep reading
    Stored,
    /// Sentinel received; stop reading
    Terminated,
}

/// Per-cycle ingestion and allocation counters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CycleStats {
    /// Sections stored in the registry
    pub accepted: u16,
    /// Lines rejected by the parser
    pub malformed: u16,
    /// Sections dropped because the registry was full
    pub dropped: u16,
    /// Ingestion ended on a sentinel (false: timeout or closed source)
    pub terminated: bool,
    /// Allocation failed because the ledger was full
    pub ledger_full: bool,
}
