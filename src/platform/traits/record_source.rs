//! Record source traits
//!
//! A record source yields raw text lines from the sensing peer. The
//! transport strips the `\n` terminator and truncates each line to
//! [`LINE_LEN`] bytes.

use core::fmt;

use heapless::Vec;
use pico_park_core::section::LINE_LEN;

use crate::platform::PlatformError;

/// One transport line, without its `\n` terminator
pub type Line = Vec<u8, LINE_LEN>;

/// Reasons a record source yields no line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// No complete line before the deadline
    Timeout,
    /// Peer closed the stream
    Closed,
    /// Transport failure
    Platform(PlatformError),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Timeout => write!(f, "record source timed out"),
            SourceError::Closed => write!(f, "record source closed"),
            SourceError::Platform(e) => write!(f, "record source failed: {}", e),
        }
    }
}

impl From<PlatformError> for SourceError {
    fn from(e: PlatformError) -> Self {
        SourceError::Platform(e)
    }
}

/// Blocking record source
///
/// Implementations must return `Timeout` rather than block past
/// `deadline_ms` (ms since boot, same clock as the allocator).
pub trait RecordSource {
    /// Next line from the peer
    fn next_line(&mut self, deadline_ms: u64) -> Result<Line, SourceError>;
}

/// Async record source for Embassy tasks
///
/// The caller bounds each read with its own timeout; implementations only
/// report `Closed` and transport errors.
#[allow(async_fn_in_trait)]
pub trait AsyncRecordSource {
    /// Next line from the peer
    async fn next_line(&mut self) -> Result<Line, SourceError>;
}

/// Copy `bytes` into a transport line, truncating to [`LINE_LEN`]
pub fn line_from(bytes: &[u8]) -> Line {
    let len = bytes.len().min(LINE_LEN);
    let mut line = Line::new();
    // Cannot fail: len <= LINE_LEN
    let _ = line.extend_from_slice(&bytes[..len]);
    line
}
