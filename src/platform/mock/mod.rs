//! Mock platform implementations for host testing

pub mod gpio;
pub mod presentation;
pub mod record_source;

pub use gpio::{MockPin, MockPinError};
pub use presentation::MockSink;
pub use record_source::MockRecordSource;
