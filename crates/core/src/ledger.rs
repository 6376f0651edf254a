//! Reservation Ledger
//!
//! Fixed-capacity table of time-limited holds against section capacity.
//! A hold keeps a spot from being offered again until the driver has had
//! time to occupy it; the periodic expiry sweep drops holds whose deadline
//! has passed.
//!
//! # Ordering
//!
//! Entries are kept oldest first. Removing an entry shifts every later
//! entry down by one, so survivors keep their relative order.
//!
//! # Hold Size
//!
//! `hold_size` records how many holds the section already had when the
//! reservation was made. It identifies the spot ordinal shown to the
//! driver; capacity deduction always counts records, never sums hold sizes.

use heapless::Vec;

use crate::error::{AllocError, Table};
use crate::section::{section_name, SectionName};

/// Maximum number of outstanding reservations
pub const MAX_RESERVATIONS: usize = 20;

/// A time-limited hold on one spot of a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Section the hold applies to
    pub section: SectionName,
    /// Ledger-assigned sequence id
    pub seq: u32,
    /// Holds already outstanding for the section when this one was made
    pub hold_size: u16,
    /// Absolute deadline (ms since boot)
    pub expiry_ms: u64,
}

impl Reservation {
    /// Check whether the hold has lapsed at `now_ms`
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.expiry_ms < now_ms
    }
}

/// Outstanding reservations, oldest first
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Reservation, MAX_RESERVATIONS>,
    next_seq: u32,
}

impl Ledger {
    /// Create an empty ledger (const fn for static initialization)
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Number of outstanding reservations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no reservations are outstanding
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if another reservation would be rejected
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Number of holds against `name`
    pub fn reserved_count(&self, name: &str) -> u16 {
        self.entries
            .iter()
            .filter(|r| r.section.as_str() == name)
            .count() as u16
    }

    /// Record a hold on `name` expiring `ttl_ms` after `now_ms`
    ///
    /// Returns `CapacityExceeded(Ledger)` when `MAX_RESERVATIONS` holds are
    /// outstanding, or `MalformedRecord` if `name` is not a valid section name.
    pub fn reserve(
        &mut self,
        name: &str,
        hold_size: u16,
        now_ms: u64,
        ttl_ms: u64,
    ) -> Result<Reservation, AllocError> {
        if self.entries.is_full() {
            return Err(AllocError::CapacityExceeded(Table::Ledger));
        }

        let reservation = Reservation {
            section: section_name(name)?,
            seq: self.next_seq,
            hold_size,
            expiry_ms: now_ms.saturating_add(ttl_ms),
        };
        self.entries
            .push(reservation.clone())
            .map_err(|_| AllocError::CapacityExceeded(Table::Ledger))?;
        self.next_seq = self.next_seq.wrapping_add(1);
        Ok(reservation)
    }

    /// Drop every hold whose deadline is before `now_ms`
    ///
    /// Returns the number of holds removed. Calling twice with the same
    /// `now_ms` removes nothing the second time.
    pub fn expire_older_than(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|r| !r.is_expired(now_ms));
        before - self.entries.len()
    }

    /// Release one hold explicitly (spot occupied)
    ///
    /// Returns `true` if a matching hold was found and removed.
    pub fn release(&mut self, name: &str, seq: u32) -> bool {
        match self
            .entries
            .iter()
            .position(|r| r.seq == seq && r.section.as_str() == name)
        {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every hold
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over holds, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Reservation> {
        self.entries.iter()
    }
}
