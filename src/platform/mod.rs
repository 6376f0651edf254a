//! Platform abstraction layer
//!
//! The allocation engine talks to the outside world through the traits in
//! [`traits`]. [`mock`] provides host implementations for tests.

pub mod error;
pub mod mock;
pub mod traits;

pub use error::{GpioError, PlatformError, Result, UartError};
