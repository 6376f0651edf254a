//! Communication with the sensing peer
//!
//! The peer streams one section record per line over a UART (or any byte
//! stream implementing `embedded_io_async::Read`).

pub mod line_reader;

pub use line_reader::LineReader;
