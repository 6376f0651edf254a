//! Allocation State Machine
//!
//! The [`Allocator`] owns the section registry and the reservation ledger
//! and drives one allocation cycle at a time:
//!
//! ```text
//! Idle --request--> Fetching --finish_fetch--> Scoring --> Allocating --> Presenting
//!   ^                   |                                                    |
//!   |                   +---- no sections -------------------------------->  |
//!   +------------------------------ take_outcome ----------------------------+
//! ```
//!
//! Scoring and Allocating run to completion inside [`Allocator::finish_fetch`].
//! The free-spot check and the reservation that follows happen under a single
//! `&mut self` borrow, so an expiry sweep can never slip in between them.
//!
//! The allocator does not read the transport or drive the display itself;
//! the firmware feeds it lines and presents the outcome. Nothing here is
//! fatal: every error leaves the machine in a state from which it returns
//! to `Idle`.

pub mod state;

pub use state::{AllocationOutcome, AllocatorState, CycleStats, IngestStatus};

use crate::error::{AllocError, Table};
use crate::ledger::Ledger;
use crate::registry::Registry;
use crate::section::{parse_record, Criterion, RecordLayout, RecordLine};

/// Default reservation lifetime (ms)
pub const DEFAULT_RESERVATION_TTL_MS: u64 = 60_000;

/// Allocator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Wire record layout
    pub layout: RecordLayout,
    /// Lifetime of a new reservation (ms)
    pub reservation_ttl_ms: u64,
}

impl AllocatorConfig {
    /// Create a configuration (const fn for static initialization)
    pub const fn new(layout: RecordLayout, reservation_ttl_ms: u64) -> Self {
        Self {
            layout,
            reservation_ttl_ms,
        }
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::new(RecordLayout::new(1), DEFAULT_RESERVATION_TTL_MS)
    }
}

/// Parking allocation engine
#[derive(Debug, Clone)]
pub struct Allocator {
    state: AllocatorState,
    criterion: Criterion,
    registry: Registry,
    ledger: Ledger,
    config: AllocatorConfig,
    outcome: Option<AllocationOutcome>,
    stats: CycleStats,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(AllocatorConfig::default())
    }
}

impl Allocator {
    /// Create an idle allocator with empty tables
    pub const fn new(config: AllocatorConfig) -> Self {
        Self {
            state: AllocatorState::Idle,
            criterion: Criterion::None,
            registry: Registry::new(),
            ledger: Ledger::new(),
            config,
            outcome: None,
            stats: CycleStats {
                accepted: 0,
                malformed: 0,
                dropped: 0,
                terminated: false,
                ledger_full: false,
            },
        }
    }

    /// Current state
    pub fn state(&self) -> AllocatorState {
        self.state
    }

    /// Check whether a new request would be accepted
    pub fn is_idle(&self) -> bool {
        self.state == AllocatorState::Idle
    }

    /// Criterion of the cycle in progress (`None` when idle)
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Sections of the current (or last) cycle
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Outstanding reservations
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Mutable ledger access, for restoring holds and for tests
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Active configuration
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Replace the configuration; only allowed while idle
    pub fn set_config(&mut self, config: AllocatorConfig) -> Result<(), AllocError> {
        self.expect_state(AllocatorState::Idle)?;
        self.config = config;
        Ok(())
    }

    /// Counters for the current (or last) cycle
    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    /// Start a cycle: `Idle → Fetching`
    ///
    /// Clears the registry and records `criterion`. Returns `Busy` and
    /// changes nothing if a cycle is already in progress.
    pub fn request(&mut self, criterion: Criterion) -> Result<(), AllocError> {
        if self.state != AllocatorState::Idle {
            return Err(AllocError::Busy);
        }
        self.registry.clear();
        self.outcome = None;
        self.stats = CycleStats::default();
        self.criterion = criterion;
        self.state = AllocatorState::Fetching;
        Ok(())
    }

    /// Feed one transport line while fetching
    ///
    /// Malformed lines and sections beyond registry capacity are counted and
    /// returned as errors; the caller logs them and keeps reading.
    pub fn ingest(&mut self, line: &[u8]) -> Result<IngestStatus, AllocError> {
        self.expect_state(AllocatorState::Fetching)?;

        match parse_record(line, &self.config.layout) {
            Ok(RecordLine::Section(section)) => match self.registry.append(section) {
                Ok(()) => {
                    self.stats.accepted = self.stats.accepted.saturating_add(1);
                    Ok(IngestStatus::Stored)
                }
                Err(e) => {
                    self.stats.dropped = self.stats.dropped.saturating_add(1);
                    Err(e)
                }
            },
            Ok(RecordLine::EndOfStream) => {
                self.stats.terminated = true;
                Ok(IngestStatus::Terminated)
            }
            Err(e) => {
                self.stats.malformed = self.stats.malformed.saturating_add(1);
                Err(e.into())
            }
        }
    }

    /// End ingestion (sentinel, timeout, or closed source) and decide
    ///
    /// Runs Scoring and Allocating to completion and leaves the machine in
    /// `Presenting`. With no sections the outcome is `NoData`.
    pub fn finish_fetch(&mut self, now_ms: u64) -> Result<(), AllocError> {
        self.expect_state(AllocatorState::Fetching)?;

        if self.registry.is_empty() {
            self.outcome = Some(AllocationOutcome::NoData);
            self.state = AllocatorState::Presenting;
            return Ok(());
        }

        self.state = AllocatorState::Scoring;
        self.registry.apply_criterion(self.criterion);
        self.registry.sort();

        self.state = AllocatorState::Allocating;
        let outcome = self.allocate(now_ms);
        self.outcome = Some(outcome);
        self.state = AllocatorState::Presenting;
        Ok(())
    }

    /// Hand the outcome to the presentation sink: `Presenting → Idle`
    ///
    /// Resets the criterion until the next request.
    pub fn take_outcome(&mut self) -> Result<AllocationOutcome, AllocError> {
        self.expect_state(AllocatorState::Presenting)?;
        let outcome = self.outcome.take().unwrap_or(AllocationOutcome::NoData);
        self.criterion = Criterion::None;
        self.state = AllocatorState::Idle;
        Ok(outcome)
    }

    /// Periodic expiry sweep; returns the number of holds dropped
    pub fn tick(&mut self, now_ms: u64) -> usize {
        self.ledger.expire_older_than(now_ms)
    }

    /// Release a hold once its spot is occupied
    pub fn release(&mut self, section: &str, seq: u32) -> bool {
        self.ledger.release(section, seq)
    }

    /// First sorted section with a free spot gets a hold
    fn allocate(&mut self, now_ms: u64) -> AllocationOutcome {
        for section in self.registry.iter() {
            let held = self.ledger.reserved_count(&section.name);
            if section.spots <= held {
                continue;
            }

            return match self.ledger.reserve(
                &section.name,
                held,
                now_ms,
                self.config.reservation_ttl_ms,
            ) {
                Ok(reservation) => AllocationOutcome::Allocated {
                    section: section.name.clone(),
                    remaining: section.spots - held,
                    score: section.active_score,
                    spot: held.saturating_add(1),
                    seq: reservation.seq,
                },
                Err(AllocError::CapacityExceeded(Table::Ledger)) => {
                    self.stats.ledger_full = true;
                    AllocationOutcome::NoFreeSpot
                }
                Err(_) => AllocationOutcome::NoFreeSpot,
            };
        }
        AllocationOutcome::NoFreeSpot
    }

    fn expect_state(&self, expected: AllocatorState) -> Result<(), AllocError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(AllocError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }
}
