//! Time abstraction for reservation deadlines and ingestion timeouts.
//!
//! The allocation engine works on millisecond timestamps since boot.
//! `TimeSource` abstracts the clock so deadlines can be driven from a
//! controllable mock in tests.

use core::cell::Cell;

/// Platform-agnostic millisecond clock.
///
/// # Example
///
/// ```
/// use pico_park_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let deadline = time.now_ms() + 2_000;
/// time.advance(2_500);
/// assert!(time.now_ms() > deadline);
/// ```
pub trait TimeSource {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64;

    /// Returns elapsed milliseconds since a reference point.
    ///
    /// Uses saturating subtraction so a reference in the future yields 0.
    fn elapsed_since(&self, reference_ms: u64) -> u64 {
        self.now_ms().saturating_sub(reference_ms)
    }
}

/// Mock time source with manual advancement.
#[derive(Clone, Default)]
pub struct MockTime {
    current_ms: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_ms: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(ms: u64) -> Self {
        Self {
            current_ms: Cell::new(ms),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, ms: u64) {
        self.current_ms.set(ms);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, ms: u64) {
        self.current_ms.set(self.current_ms.get() + ms);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }
}
