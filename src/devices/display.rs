//! Character Display Frame
//!
//! Renders an [`AllocationOutcome`] into the two 16-column lines of an
//! HD44780-style LCD. Text that does not fit is cut at the column limit.
//!
//! | Outcome | Top | Bottom |
//! |---|---|---|
//! | `Allocated` | section name | `Spot <n> free <r>` |
//! | `NoFreeSpot` | `Parking full` | `No free spot` |
//! | `NoData` | `No data` | `Try again` |

use core::fmt::Write;

use heapless::String;
use pico_park_core::AllocationOutcome;

use crate::platform::traits::PresentationSink;

/// Display width in characters
pub const DISPLAY_COLS: usize = 16;

type DisplayLine = String<DISPLAY_COLS>;

/// Contents of the two display rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayFrame {
    top: DisplayLine,
    bottom: DisplayLine,
}

impl DisplayFrame {
    /// Blank frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `outcome`
    pub fn render(outcome: &AllocationOutcome) -> Self {
        let mut frame = Self::new();
        match outcome {
            AllocationOutcome::Allocated {
                section,
                remaining,
                spot,
                ..
            } => {
                push_clipped(&mut frame.top, section);
                // u16 fits in 5 digits
                let mut num: String<5> = String::new();
                push_clipped(&mut frame.bottom, "Spot ");
                let _ = write!(num, "{}", spot);
                push_clipped(&mut frame.bottom, &num);
                push_clipped(&mut frame.bottom, " free ");
                num.clear();
                let _ = write!(num, "{}", remaining);
                push_clipped(&mut frame.bottom, &num);
            }
            AllocationOutcome::NoFreeSpot => {
                push_clipped(&mut frame.top, "Parking full");
                push_clipped(&mut frame.bottom, "No free spot");
            }
            AllocationOutcome::NoData => {
                push_clipped(&mut frame.top, "No data");
                push_clipped(&mut frame.bottom, "Try again");
            }
        }
        frame
    }

    /// Top row
    pub fn top(&self) -> &str {
        &self.top
    }

    /// Bottom row
    pub fn bottom(&self) -> &str {
        &self.bottom
    }

    /// Blank both rows
    pub fn clear(&mut self) {
        self.top.clear();
        self.bottom.clear();
    }
}

impl PresentationSink for DisplayFrame {
    fn present(&mut self, outcome: &AllocationOutcome) {
        *self = Self::render(outcome);
    }
}

/// Append as much of `text` as fits, on a char boundary
fn push_clipped(line: &mut DisplayLine, text: &str) {
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pico_park_core::section::SectionName;

    fn allocated(name: &str, remaining: u16, spot: u16) -> AllocationOutcome {
        AllocationOutcome::Allocated {
            section: SectionName::try_from(name).unwrap(),
            remaining,
            score: 0,
            spot,
            seq: 0,
        }
    }

    #[test]
    fn test_render_allocated() {
        let frame = DisplayFrame::render(&allocated("B", 3, 1));
        assert_eq!(frame.top(), "B");
        assert_eq!(frame.bottom(), "Spot 1 free 3");
    }

    #[test]
    fn test_render_no_spot_and_no_data() {
        let full = DisplayFrame::render(&AllocationOutcome::NoFreeSpot);
        assert_eq!(full.top(), "Parking full");
        assert_eq!(full.bottom(), "No free spot");

        let empty = DisplayFrame::render(&AllocationOutcome::NoData);
        assert_eq!(empty.top(), "No data");
        assert_eq!(empty.bottom(), "Try again");
    }

    #[test]
    fn test_long_values_clipped() {
        let frame = DisplayFrame::render(&allocated("LEVEL2-NORTHWING", 65535, 65535));
        assert_eq!(frame.top(), "LEVEL2-NORTHWING");
        assert_eq!(frame.bottom().len(), DISPLAY_COLS);
        assert_eq!(frame.bottom(), "Spot 65535 free ");
    }

    #[test]
    fn test_present_replaces_frame() {
        let mut display = DisplayFrame::new();
        display.present(&allocated("A", 2, 1));
        display.present(&AllocationOutcome::NoData);
        assert_eq!(display.top(), "No data");

        display.clear();
        assert_eq!(display, DisplayFrame::new());
    }
}
