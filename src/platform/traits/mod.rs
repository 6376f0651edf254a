//! Platform interface traits
//!
//! These are the seams between the allocation engine and its external
//! collaborators:
//!
//! - [`RecordSource`] / [`AsyncRecordSource`]: lines from the sensing peer
//! - [`PresentationSink`]: where the outcome of a cycle is shown

pub mod presentation;
pub mod record_source;

pub use presentation::PresentationSink;
pub use record_source::{line_from, AsyncRecordSource, Line, RecordSource, SourceError};
