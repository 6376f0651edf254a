//! Allocation Error Types
//!
//! None of these conditions is fatal. The allocator always returns to
//! `Idle`; callers log the error and carry on with the cycle.

use core::fmt;

use crate::allocator::AllocatorState;
use crate::section::record::RecordError;

/// Fixed-capacity table that ran out of room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// Section registry (`MAX_SECTIONS`)
    Registry,
    /// Reservation ledger (`MAX_RESERVATIONS`)
    Ledger,
}

/// Errors reported by the allocation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// A record line could not be parsed; the line is skipped
    MalformedRecord(RecordError),
    /// Registry or ledger full; the record or reservation is dropped
    CapacityExceeded(Table),
    /// Allocation requested while a cycle is already in progress
    Busy,
    /// Operation issued in the wrong state
    InvalidState {
        /// State the operation requires
        expected: AllocatorState,
        /// State the allocator was in
        actual: AllocatorState,
    },
}

impl AllocError {
    /// Short static label, suitable for defmt log arguments
    pub fn label(&self) -> &'static str {
        match self {
            AllocError::MalformedRecord(e) => e.label(),
            AllocError::CapacityExceeded(Table::Registry) => "registry full",
            AllocError::CapacityExceeded(Table::Ledger) => "ledger full",
            AllocError::Busy => "allocation in progress",
            AllocError::InvalidState { .. } => "invalid state",
        }
    }
}

impl From<RecordError> for AllocError {
    fn from(e: RecordError) -> Self {
        AllocError::MalformedRecord(e)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Registry => write!(f, "registry"),
            Table::Ledger => write!(f, "ledger"),
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::MalformedRecord(e) => write!(f, "Malformed record: {}", e),
            AllocError::CapacityExceeded(table) => write!(f, "Capacity exceeded: {} full", table),
            AllocError::Busy => write!(f, "Allocation already in progress"),
            AllocError::InvalidState { expected, actual } => {
                write!(f, "Invalid state: expected {}, was {}", expected, actual)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;
    use crate::section::record::RecordError;

    #[test]
    fn test_alloc_error_display() {
        let error = AllocError::CapacityExceeded(Table::Ledger);
        assert_eq!(format!("{}", error), "Capacity exceeded: ledger full");

        let error = AllocError::InvalidState {
            expected: AllocatorState::Fetching,
            actual: AllocatorState::Idle,
        };
        assert_eq!(
            format!("{}", error),
            "Invalid state: expected Fetching, was Idle"
        );
    }

    #[test]
    fn test_record_error_converts() {
        let error: AllocError = RecordError::NameTooLong.into();
        assert_eq!(error, AllocError::MalformedRecord(RecordError::NameTooLong));
        assert_eq!(error.label(), "name too long");
    }
}
