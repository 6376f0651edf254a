//! Shared state access for the allocator.
//!
//! The request handler and the expiry tick both need the allocator. On
//! target it sits behind Embassy's critical-section mutex; host tests use a
//! `RefCell`. Every closure passed to `with_mut` runs as one critical
//! section, which is what keeps an allocation decision atomic with respect
//! to the expiry sweep.

/// Platform-agnostic synchronized state access.
///
/// # Example
///
/// ```
/// use pico_park::core::traits::{MockState, SharedState};
/// use pico_park::core::{Allocator, Criterion};
///
/// let state = MockState::new(Allocator::default());
/// state.with_mut(|a| a.request(Criterion::Entrance)).unwrap();
/// assert!(!state.with(|a| a.is_idle()));
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

// ============================================================================
// Embassy Implementation
// ============================================================================

#[cfg(feature = "embassy")]
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Critical-section protected state for embedded targets.
#[cfg(feature = "embassy")]
pub struct EmbassyState<T> {
    inner: Mutex<CriticalSectionRawMutex, core::cell::RefCell<T>>,
}

#[cfg(feature = "embassy")]
impl<T> EmbassyState<T> {
    /// Creates a new `EmbassyState` (const fn for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(core::cell::RefCell::new(value)),
        }
    }
}

#[cfg(feature = "embassy")]
impl<T> SharedState<T> for EmbassyState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// `RefCell`-backed state for single-threaded host tests.
///
/// # Panics
///
/// Panics on nested `with_mut` calls, which indicates a bug in the caller.
pub struct MockState<T> {
    inner: core::cell::RefCell<T>,
}

impl<T> MockState<T> {
    /// Creates a new `MockState` wrapping the given value.
    pub fn new(value: T) -> Self {
        Self {
            inner: core::cell::RefCell::new(value),
        }
    }

    /// Unwraps the inner value.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T> SharedState<T> for MockState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.borrow())
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.inner.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pico_park_core::{Allocator, Criterion};

    #[test]
    fn mock_state_read_and_write() {
        let state = MockState::new(0u32);
        state.with_mut(|v| *v = 100);
        assert_eq!(state.with(|v| *v), 100);
    }

    #[test]
    fn mock_state_wraps_allocator() {
        let state = MockState::new(Allocator::default());
        state
            .with_mut(|a| a.request(Criterion::Elevator))
            .unwrap();
        assert_eq!(state.with(|a| a.criterion()), Criterion::Elevator);

        let allocator = state.into_inner();
        assert!(!allocator.is_idle());
    }

    #[test]
    #[should_panic]
    fn mock_state_nested_mutable_access_panics() {
        let state = MockState::new(0u32);
        state.with_mut(|_| state.with_mut(|v| *v += 1));
    }
}
