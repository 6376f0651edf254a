//! Mock presentation sink

use heapless::Vec;
use pico_park_core::AllocationOutcome;

use crate::platform::traits::PresentationSink;

/// Maximum outcomes recorded
pub const MOCK_SINK_CAPACITY: usize = 16;

/// Records every presented outcome
#[derive(Debug, Default)]
pub struct MockSink {
    outcomes: Vec<AllocationOutcome, MOCK_SINK_CAPACITY>,
}

impl MockSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    /// Outcomes in presentation order
    pub fn outcomes(&self) -> &[AllocationOutcome] {
        &self.outcomes
    }

    /// Most recent outcome
    pub fn last(&self) -> Option<&AllocationOutcome> {
        self.outcomes.last()
    }
}

impl PresentationSink for MockSink {
    fn present(&mut self, outcome: &AllocationOutcome) {
        let _ = self.outcomes.push(outcome.clone());
    }
}
