//! Core firmware infrastructure
//!
//! Logging macros and shared-state wrappers, plus re-exports of the
//! allocation engine from `pico_park_core`.

pub mod logging;
pub mod traits;

pub use pico_park_core::allocator::{
    self, AllocationOutcome, Allocator, AllocatorConfig, AllocatorState,
};
pub use pico_park_core::error::{AllocError, Table};
pub use pico_park_core::input;
pub use pico_park_core::ledger;
pub use pico_park_core::parameters;
pub use pico_park_core::registry;
pub use pico_park_core::section::{self, Criterion};
