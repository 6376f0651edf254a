//! Mock record source
//!
//! Scripted lines with arrival times. A line whose arrival time is after
//! the caller's deadline is not delivered; the read times out instead.

use heapless::Deque;

use crate::platform::traits::{line_from, Line, RecordSource, SourceError};

/// Maximum scripted lines
pub const MOCK_SOURCE_CAPACITY: usize = 32;

/// Scripted record source
#[derive(Debug, Default)]
pub struct MockRecordSource {
    lines: Deque<(u64, Line), MOCK_SOURCE_CAPACITY>,
    closed_when_drained: bool,
    reads: usize,
}

impl MockRecordSource {
    /// Create an empty source that times out
    pub fn new() -> Self {
        Self {
            lines: Deque::new(),
            closed_when_drained: false,
            reads: 0,
        }
    }

    /// Create a source with lines available immediately
    pub fn from_lines(lines: &[&[u8]]) -> Self {
        let mut source = Self::new();
        for line in lines {
            source.push_line(line);
        }
        source
    }

    /// Report `Closed` instead of `Timeout` once all lines are read
    pub fn close_when_drained(mut self) -> Self {
        self.closed_when_drained = true;
        self
    }

    /// Queue a line available immediately
    pub fn push_line(&mut self, line: &[u8]) {
        self.push_line_at(0, line);
    }

    /// Queue a line that arrives at `arrival_ms`
    ///
    /// Lines beyond `MOCK_SOURCE_CAPACITY` are dropped.
    pub fn push_line_at(&mut self, arrival_ms: u64, line: &[u8]) {
        let _ = self.lines.push_back((arrival_ms, line_from(line)));
    }

    /// Lines not yet delivered
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Number of `next_line` calls made
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl RecordSource for MockRecordSource {
    fn next_line(&mut self, deadline_ms: u64) -> Result<Line, SourceError> {
        self.reads += 1;
        match self.lines.front() {
            None if self.closed_when_drained => Err(SourceError::Closed),
            None => Err(SourceError::Timeout),
            Some((arrival_ms, _)) if *arrival_ms > deadline_ms => Err(SourceError::Timeout),
            Some(_) => self
                .lines
                .pop_front()
                .map(|(_, line)| line)
                .ok_or(SourceError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_delivered_in_order() {
        let mut source = MockRecordSource::from_lines(&[b"A 2 5", b"B 3 1"]);
        assert_eq!(source.next_line(0).unwrap().as_slice(), b"A 2 5");
        assert_eq!(source.next_line(0).unwrap().as_slice(), b"B 3 1");
        assert_eq!(source.next_line(0), Err(SourceError::Timeout));
        assert_eq!(source.reads(), 3);
    }

    #[test]
    fn test_late_line_times_out() {
        let mut source = MockRecordSource::new();
        source.push_line_at(3_000, b"A 2 5");
        assert_eq!(source.next_line(2_000), Err(SourceError::Timeout));
        assert_eq!(source.remaining(), 1);
        assert!(source.next_line(3_000).is_ok());
    }

    #[test]
    fn test_closed_when_drained() {
        let mut source = MockRecordSource::from_lines(&[b"A 1 1"]).close_when_drained();
        assert!(source.next_line(0).is_ok());
        assert_eq!(source.next_line(0), Err(SourceError::Closed));
    }
}
