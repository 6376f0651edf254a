//! Device drivers
//!
//! Hardware-independent drivers for the allocation terminal, written
//! against `embedded-hal` traits and the platform abstraction.
//!
//! ## Modules
//!
//! - `button`: debounced request button (active-low with pull-up)
//! - `display`: two-line character display frame

pub mod button;
pub mod display;

pub use button::ButtonInput;
pub use display::{DisplayFrame, DISPLAY_COLS};
