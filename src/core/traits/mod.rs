//! Core traits for platform-agnostic state access.

pub mod sync;

#[cfg(feature = "embassy")]
pub use sync::EmbassyState;
pub use sync::{MockState, SharedState};
pub use pico_park_core::traits::{MockTime, TimeSource};
