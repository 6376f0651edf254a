//! Request Button Driver
//!
//! Wraps an `embedded_hal::digital::InputPin` wired active-low (pull-up,
//! pressed pulls the line to ground) with the core [`Debouncer`]. Each
//! debounced press becomes one [`RequestEvent::AllocationRequested`]
//! carrying the criterion this button is bound to.
//!
//! A terminal with separate "entrance" and "elevator" buttons uses one
//! `ButtonInput` per pin.

use embedded_hal::digital::InputPin;
use pico_park_core::input::{ButtonEdge, Debouncer};
use pico_park_core::parameters::ParkingParams;
use pico_park_core::section::Criterion;

use crate::allocation::RequestEvent;
use crate::platform::{GpioError, PlatformError};

/// Debounced request button
pub struct ButtonInput<P> {
    pin: P,
    debouncer: Debouncer,
    criterion: Criterion,
}

impl<P: InputPin> ButtonInput<P> {
    /// Create a button bound to `criterion`
    pub fn new(pin: P, criterion: Criterion, debounce_ms: u64) -> Self {
        Self {
            pin,
            debouncer: Debouncer::new(debounce_ms),
            criterion,
        }
    }

    /// Create a button using the `PARK_DEBOUNCE` window
    pub fn from_params(pin: P, criterion: Criterion, params: &ParkingParams) -> Self {
        Self::new(pin, criterion, u64::from(params.debounce_ms))
    }

    /// Debounce window in milliseconds
    pub fn debounce_ms(&self) -> u64 {
        self.debouncer.delay_ms()
    }

    /// Criterion requested by a press
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Whether the debounced state is pressed
    pub fn is_pressed(&self) -> bool {
        self.debouncer.is_pressed()
    }

    /// Sample the pin
    ///
    /// Returns a request event on the debounced press edge only; holding the
    /// button does not repeat the request.
    pub fn poll(&mut self, now_ms: u64) -> Result<Option<RequestEvent>, PlatformError> {
        let level_high = self
            .pin
            .is_high()
            .map_err(|_| PlatformError::Gpio(GpioError::ReadFailed))?;

        match self.debouncer.update(level_high, now_ms) {
            Some(ButtonEdge::Pressed) => {
                crate::log_debug!("Button pressed");
                Ok(Some(RequestEvent::AllocationRequested {
                    criterion: self.criterion,
                }))
            }
            Some(ButtonEdge::Released) | None => Ok(None),
        }
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPin;
    use pico_park_core::parameters::{ParamValue, ParameterStore};

    fn button() -> ButtonInput<MockPin> {
        ButtonInput::new(MockPin::new(), Criterion::Elevator, 100)
    }

    #[test]
    fn test_idle_pin_no_event() {
        let mut b = button();
        for t in (0..1000).step_by(50) {
            assert_eq!(b.poll(t).unwrap(), None);
        }
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_press_emits_one_request() {
        let mut b = button();
        b.poll(0).unwrap();

        b.pin.set_high(false);
        assert_eq!(b.poll(10).unwrap(), None);
        assert_eq!(b.poll(100).unwrap(), None);
        assert_eq!(
            b.poll(111).unwrap(),
            Some(RequestEvent::AllocationRequested {
                criterion: Criterion::Elevator
            })
        );
        // Held: no repeat
        assert_eq!(b.poll(500).unwrap(), None);
        assert!(b.is_pressed());
    }

    #[test]
    fn test_bounce_filtered() {
        let mut b = button();
        b.poll(0).unwrap();

        // Contact bounce shorter than the debounce window
        for (t, level) in [(10, false), (30, true), (50, false), (70, true)] {
            b.pin.set_high(level);
            assert_eq!(b.poll(t).unwrap(), None);
        }
        assert_eq!(b.poll(150).unwrap(), None);
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_second_press_after_release() {
        let mut b = button();
        b.poll(0).unwrap();

        b.pin.set_high(false);
        b.poll(10).unwrap();
        assert!(b.poll(200).unwrap().is_some());

        b.pin.set_high(true);
        b.poll(300).unwrap();
        assert_eq!(b.poll(500).unwrap(), None);
        assert!(!b.is_pressed());

        b.pin.set_high(false);
        b.poll(600).unwrap();
        assert!(b.poll(800).unwrap().is_some());
    }

    #[test]
    fn test_debounce_window_from_params() {
        let mut store = ParameterStore::new();
        ParkingParams::register_defaults(&mut store).unwrap();
        store.set("PARK_DEBOUNCE", ParamValue::Int(300)).unwrap();
        let params = ParkingParams::from_store(&store);

        let mut pin = MockPin::new();
        pin.set_high(false);
        let mut b = ButtonInput::from_params(pin, Criterion::Entrance, &params);
        assert_eq!(b.debounce_ms(), 300);

        b.poll(0).unwrap();
        // Past the default 100 ms window but inside the configured one
        assert_eq!(b.poll(150).unwrap(), None);
        assert_eq!(b.poll(300).unwrap(), None);
        assert!(b.poll(301).unwrap().is_some());
    }

    #[test]
    fn test_default_params_keep_default_window() {
        let mut pin = MockPin::new();
        pin.set_high(false);
        let mut b = ButtonInput::from_params(pin, Criterion::None, &ParkingParams::default());
        b.poll(0).unwrap();
        assert!(b.poll(101).unwrap().is_some());
    }

    #[test]
    fn test_pin_failure() {
        let mut b = button();
        b.pin.set_fail(true);
        assert_eq!(b.poll(0), Err(PlatformError::Gpio(GpioError::ReadFailed)));
    }
}
