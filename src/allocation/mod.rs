//! Allocation Service
//!
//! Glue between the allocation engine and the platform: request events,
//! the per-request cycle driver, and (with the `embassy` feature) the async
//! service loop.
//!
//! ## Modules
//!
//! - `cycle`: blocking cycle driver over [`RecordSource`](crate::platform::traits::RecordSource)
//! - `task`: Embassy request/expiry loop (`embassy` feature)

pub mod cycle;
#[cfg(feature = "embassy")]
pub mod task;

use pico_park_core::section::Criterion;

pub use cycle::{expire_holds, run_cycle};

/// Event that starts an allocation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    /// A driver asked for a spot, ranked by `criterion`
    AllocationRequested {
        /// Ranking to apply for this cycle
        criterion: Criterion,
    },
}

impl RequestEvent {
    /// Criterion carried by the event
    pub fn criterion(&self) -> Criterion {
        match self {
            RequestEvent::AllocationRequested { criterion } => *criterion,
        }
    }
}
