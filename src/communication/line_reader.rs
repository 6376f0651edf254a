//! Line Transport
//!
//! Splits a byte stream from the sensing peer into [`Line`]s.
//!
//! # Framing
//!
//! - Lines end with `\n`, which is dropped; a preceding `\r` is kept
//! - Lines longer than `LINE_LEN` are truncated; the excess up to the next
//!   `\n` is discarded
//! - A read returning 0 bytes means the peer closed the stream
//!
//! # Cancellation
//!
//! Bytes already pulled from the UART and the partial line live in the
//! reader, so dropping a `next_line` future (e.g. on ingestion timeout)
//! loses nothing; the next call continues where the last one stopped.
//!
//! # Usage
//!
//! ```ignore
//! use pico_park::communication::LineReader;
//!
//! let (rx, _tx) = uart.split();
//! let mut reader = LineReader::new(rx);
//! let line = reader.next_line().await?;
//! ```

use embedded_io_async::Read;

use crate::platform::traits::{AsyncRecordSource, Line, SourceError};
use crate::platform::{PlatformError, UartError};

/// Bytes requested from the UART per read
const RX_CHUNK: usize = 32;

/// Line-oriented reader over an async byte stream
pub struct LineReader<R> {
    rx: R,
    rx_buf: [u8; RX_CHUNK],
    rx_start: usize,
    rx_end: usize,
    line: Line,
    truncated_lines: u32,
    truncating: bool,
}

impl<R> LineReader<R> {
    /// Create a reader over `rx`
    pub fn new(rx: R) -> Self {
        Self {
            rx,
            rx_buf: [0; RX_CHUNK],
            rx_start: 0,
            rx_end: 0,
            line: Line::new(),
            truncated_lines: 0,
            truncating: false,
        }
    }

    /// Number of lines cut short at `LINE_LEN`
    pub fn truncated_lines(&self) -> u32 {
        self.truncated_lines
    }

    /// Drop any partial line and buffered bytes
    pub fn reset(&mut self) {
        self.rx_start = 0;
        self.rx_end = 0;
        self.line.clear();
        self.truncating = false;
    }

    /// Give back the underlying receiver
    pub fn into_inner(self) -> R {
        self.rx
    }

    /// Consume buffered bytes; returns a line once `\n` is seen
    fn take_buffered_line(&mut self) -> Option<Line> {
        while self.rx_start < self.rx_end {
            let byte = self.rx_buf[self.rx_start];
            self.rx_start += 1;

            if byte == b'\n' {
                self.truncating = false;
                return Some(core::mem::take(&mut self.line));
            }
            if self.line.push(byte).is_err() && !self.truncating {
                self.truncating = true;
                self.truncated_lines = self.truncated_lines.saturating_add(1);
            }
        }
        None
    }
}

impl<R: Read> LineReader<R> {
    /// Read the next complete line
    pub async fn read_line(&mut self) -> Result<Line, SourceError> {
        loop {
            if let Some(line) = self.take_buffered_line() {
                return Ok(line);
            }

            let n = self
                .rx
                .read(&mut self.rx_buf)
                .await
                .map_err(|_| SourceError::Platform(PlatformError::Uart(UartError::ReadFailed)))?;
            if n == 0 {
                return Err(SourceError::Closed);
            }
            self.rx_start = 0;
            self.rx_end = n;
        }
    }
}

impl<R: Read> AsyncRecordSource for LineReader<R> {
    async fn next_line(&mut self) -> Result<Line, SourceError> {
        self.read_line().await
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockRx;
    use super::*;
    use embedded_io_async::ErrorKind;
    use pico_park_core::section::LINE_LEN;

    #[tokio::test]
    async fn test_reads_lines_across_chunks() {
        let mut reader = LineReader::new(MockRx::new(&[b"A 2 ", b"5\nB 3 1\n", b"END\r\n"]));
        assert_eq!(reader.read_line().await.unwrap().as_slice(), b"A 2 5");
        assert_eq!(reader.read_line().await.unwrap().as_slice(), b"B 3 1");
        // \r is kept for the record parser
        assert_eq!(reader.read_line().await.unwrap().as_slice(), b"END\r");
    }

    #[tokio::test]
    async fn test_closed_stream() {
        let mut reader = LineReader::new(MockRx::new(&[b"A 2 5\n", b"partial"]));
        assert!(reader.read_line().await.is_ok());
        assert_eq!(reader.read_line().await, Err(SourceError::Closed));
    }

    #[tokio::test]
    async fn test_long_line_truncated() {
        let mut long = std::vec![b'X'; LINE_LEN + 20];
        long.push(b'\n');
        long.extend_from_slice(b"A 1 1\n");
        let mut reader = LineReader::new(MockRx::new(&[&long]));

        let first = reader.read_line().await.unwrap();
        assert_eq!(first.len(), LINE_LEN);
        assert_eq!(reader.truncated_lines(), 1);
        // Excess bytes do not leak into the next line
        assert_eq!(reader.read_line().await.unwrap().as_slice(), b"A 1 1");
    }

    #[tokio::test]
    async fn test_read_error_mapped() {
        let mut rx = MockRx::new(&[]);
        rx.push_error(ErrorKind::Other);
        let mut reader = LineReader::new(rx);
        assert_eq!(
            reader.read_line().await,
            Err(SourceError::Platform(PlatformError::Uart(UartError::ReadFailed)))
        );
    }

    #[tokio::test]
    async fn test_empty_line() {
        let mut reader = LineReader::new(MockRx::new(&[b"\nA 1 1\n"]));
        assert!(reader.read_line().await.unwrap().is_empty());
        assert_eq!(reader.next_line().await.unwrap().as_slice(), b"A 1 1");
    }

    #[tokio::test]
    async fn test_reset_drops_partial_line() {
        let mut reader = LineReader::new(MockRx::new(&[b"A 2", b" 5\nB 1 1\n"]));
        // Leftover from an abandoned read
        reader.rx_buf[..3].copy_from_slice(b"ZZZ");
        reader.rx_start = 0;
        reader.rx_end = 3;
        assert!(reader.take_buffered_line().is_none());
        reader.reset();
        assert_eq!(reader.read_line().await.unwrap().as_slice(), b"A 2 5");
    }
}
