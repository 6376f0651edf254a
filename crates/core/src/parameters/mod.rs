//! Parameter management types
//!
//! A fixed-capacity parameter store with ArduPilot-style names, plus the
//! typed parking parameter block read from it. Persistence is a non-goal;
//! the store lives in RAM and is re-registered with defaults on boot.

pub mod error;
pub mod parking;
pub mod storage;

pub use error::ParameterError;
pub use parking::ParkingParams;
pub use storage::{ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};
