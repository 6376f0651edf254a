//! Mock input pin for button tests

use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin};

/// Error returned by a failing [`MockPin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Input pin with a settable level
///
/// Starts high (released, pulled up).
#[derive(Debug)]
pub struct MockPin {
    high: bool,
    fail: bool,
}

impl MockPin {
    /// Create a pin at the pulled-up level
    pub fn new() -> Self {
        Self {
            high: true,
            fail: false,
        }
    }

    /// Set the input level
    pub fn set_high(&mut self, high: bool) {
        self.high = high;
    }

    /// Make subsequent reads fail
    pub fn set_fail(&mut self, fail: bool) {
        self.fail = fail;
    }
}

impl Default for MockPin {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for MockPin {
    type Error = MockPinError;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail {
            Err(MockPinError)
        } else {
            Ok(self.high)
        }
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
