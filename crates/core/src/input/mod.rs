//! Allocation Request Input
//!
//! Pure debounce logic for the request button. The firmware samples the pin
//! on every loop iteration and feeds the level here; a press is reported
//! once per stable transition into the pressed level.
//!
//! The button is wired active-low with a pull-up: a low level means pressed.

/// Default debounce window (ms)
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Debounced button edge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEdge {
    /// Button became stably pressed
    Pressed,
    /// Button became stably released
    Released,
}

/// Debounce state machine for one active-low button
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    delay_ms: u64,
    /// Raw level seen on the previous sample (true = high)
    last_level: bool,
    /// Time the raw level last changed
    last_change_ms: u64,
    /// Debounced pressed state
    pressed: bool,
}

impl Debouncer {
    /// Create a debouncer in the released state
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            last_level: true,
            last_change_ms: 0,
            pressed: false,
        }
    }

    /// Debounce window in milliseconds
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Debounced pressed state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one raw pin sample
    ///
    /// Returns an edge once the level has been stable for longer than the
    /// debounce window and differs from the debounced state.
    pub fn update(&mut self, level_high: bool, now_ms: u64) -> Option<ButtonEdge> {
        if level_high != self.last_level {
            self.last_change_ms = now_ms;
            self.last_level = level_high;
        }

        if now_ms.saturating_sub(self.last_change_ms) <= self.delay_ms {
            return None;
        }

        let pressed = !level_high;
        if pressed == self.pressed {
            return None;
        }
        self.pressed = pressed;
        Some(if pressed {
            ButtonEdge::Pressed
        } else {
            ButtonEdge::Released
        })
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}
