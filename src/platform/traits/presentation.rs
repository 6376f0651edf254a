//! Presentation sink trait

use pico_park_core::AllocationOutcome;

/// Destination for the outcome of an allocation cycle
///
/// Called exactly once per cycle, whatever the outcome.
pub trait PresentationSink {
    /// Show the outcome to the requester
    fn present(&mut self, outcome: &AllocationOutcome);
}
