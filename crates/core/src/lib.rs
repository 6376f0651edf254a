//! pico_park_core - Pure no_std allocation logic for pico_park
//!
//! This crate contains the platform-agnostic parking allocation engine:
//! record parsing, the section registry, scoring, the reservation ledger,
//! and the allocation state machine. It is tested on host without any
//! feature flags or embassy dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies, no heap
//! - **Owned state**: The allocator owns its registry and ledger; nothing is global
//!
//! # Modules
//!
//! - [`section`]: Section records, wire parser, and ranking criteria
//! - [`registry`]: Fixed-capacity section table with ordering
//! - [`ledger`]: Time-limited reservation holds
//! - [`allocator`]: Allocation cycle state machine
//! - [`input`]: Button debounce for allocation requests
//! - [`parameters`]: Parameter store and parking parameter block
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)

#![no_std]

pub mod allocator;
pub mod error;
pub mod input;
pub mod ledger;
pub mod parameters;
pub mod registry;
pub mod section;
pub mod traits;

pub use allocator::{AllocationOutcome, Allocator, AllocatorState, IngestStatus};
pub use error::{AllocError, Table};
pub use ledger::{Ledger, Reservation, MAX_RESERVATIONS};
pub use registry::{Registry, MAX_SECTIONS};
pub use section::{Criterion, Section, SectionName, MAX_SCORES, SECTION_NAME_LEN};
