#![cfg_attr(not(test), no_std)]

//! pico_park - Parking-section allocation firmware for Raspberry Pi Pico 2 W
//!
//! This crate wires the pure allocation engine from `pico_park_core` to the
//! outside world: the request button, the line transport to the sensing
//! peer, the character display, and the Embassy tasks that drive them.

// Core systems: logging, shared state, re-exports from pico_park_core
pub mod core;

// Platform abstraction layer (record source, presentation sink, mocks)
pub mod platform;

// Line transport to the sensing peer
pub mod communication;

// Request button and character display
pub mod devices;

// Allocation cycle driver and Embassy task
pub mod allocation;

// Note: Logging macros (log_info!, log_warn!, log_error!, log_debug!, log_trace!)
// are exported at crate root via #[macro_export] in core::logging
