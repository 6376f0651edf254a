//! Embassy Allocation Service
//!
//! One loop owns the allocator and serves both triggers:
//!
//! - request events from [`ALLOCATION_REQUESTS`] start a cycle
//! - a [`Ticker`] at `PARK_TICK` drives reservation expiry
//!
//! Because both run in the same loop, a cycle and a sweep never overlap.
//! Ingestion is the only await point inside a cycle and is bounded by the
//! `PARK_FETCH_TMO` deadline.
//!
//! ## Wiring
//!
//! ```rust,ignore
//! #[embassy_executor::task]
//! async fn allocation(mut reader: LineReader<BufferedUartRx<'static>>, mut lcd: Lcd) {
//!     allocation_loop(&mut reader, &mut lcd, &params).await;
//! }
//!
//! #[embassy_executor::task]
//! async fn entrance_button(pin: Input<'static>, params: ParkingParams) {
//!     let mut button = ButtonInput::from_params(pin, Criterion::Entrance, &params);
//!     button_loop(&mut button, 10).await;
//! }
//! ```

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{with_timeout, Duration, Instant, Ticker};
use embedded_hal::digital::InputPin;
use pico_park_core::allocator::{
    AllocationOutcome, Allocator, AllocatorConfig, DEFAULT_RESERVATION_TTL_MS,
};
use pico_park_core::error::AllocError;
use pico_park_core::parameters::ParkingParams;
use pico_park_core::section::{Criterion, RecordLayout};
use pico_park_core::traits::TimeSource;

use super::cycle::{expire_holds, finish, ingest_line};
use super::RequestEvent;
use crate::core::traits::{EmbassyState, SharedState};
use crate::devices::ButtonInput;
use crate::platform::traits::{AsyncRecordSource, PresentationSink, SourceError};

/// Pending requests; a second press while one is queued is dropped
pub static ALLOCATION_REQUESTS: Channel<CriticalSectionRawMutex, RequestEvent, 1> =
    Channel::new();

/// The allocator, shared between the service loop and diagnostics
pub static ALLOCATOR: EmbassyState<Allocator> = EmbassyState::new(Allocator::new(
    AllocatorConfig::new(RecordLayout::new(1), DEFAULT_RESERVATION_TTL_MS),
));

/// Embassy monotonic clock in milliseconds
pub struct EmbassyClock;

impl TimeSource for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Queue a request without waiting
///
/// Returns `false` if a request is already pending.
pub fn submit_request(event: RequestEvent) -> bool {
    match ALLOCATION_REQUESTS.try_send(event) {
        Ok(()) => true,
        Err(_) => {
            crate::log_warn!("Allocation request dropped: one already pending");
            false
        }
    }
}

/// Async counterpart of [`run_cycle`](super::run_cycle)
pub async fn run_cycle_async<S, R, P>(
    state: &S,
    criterion: Criterion,
    source: &mut R,
    sink: &mut P,
    fetch_timeout: Duration,
) -> Result<AllocationOutcome, AllocError>
where
    S: SharedState<Allocator>,
    R: AsyncRecordSource,
    P: PresentationSink,
{
    if let Err(e) = state.with_mut(|a| a.request(criterion)) {
        crate::log_warn!("Allocation request rejected: {}", e.label());
        return Err(e);
    }
    crate::log_info!("Allocation requested ({})", criterion.name());

    let deadline = Instant::now() + fetch_timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match with_timeout(remaining, source.next_line()).await {
            Ok(Ok(line)) => {
                if !ingest_line(state, &line) {
                    break;
                }
            }
            Ok(Err(SourceError::Closed)) => {
                crate::log_warn!("Record source closed");
                break;
            }
            Ok(Err(SourceError::Platform(_))) => {
                crate::log_error!("Record source failed");
                break;
            }
            Ok(Err(SourceError::Timeout)) | Err(_) => {
                crate::log_warn!("Ingestion timed out");
                break;
            }
        }
    }

    let outcome = finish(state, Instant::now().as_millis())?;
    sink.present(&outcome);
    Ok(outcome)
}

/// Serve allocation requests and expiry ticks forever
pub async fn allocation_loop<R, P>(source: &mut R, sink: &mut P, params: &ParkingParams)
where
    R: AsyncRecordSource,
    P: PresentationSink,
{
    if !params.is_valid() {
        crate::log_warn!("Parking parameters out of range, using defaults");
    }
    let params = if params.is_valid() {
        params.clone()
    } else {
        ParkingParams::default()
    };

    if let Err(e) = ALLOCATOR.with_mut(|a| a.set_config(params.allocator_config())) {
        crate::log_error!("Allocator config not applied: {}", e.label());
    }

    let fetch_timeout = Duration::from_millis(u64::from(params.fetch_timeout_ms));
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(params.tick_ms)));

    crate::log_info!("Allocation service started");
    loop {
        match select(ALLOCATION_REQUESTS.receive(), ticker.next()).await {
            Either::First(event) => {
                let criterion = event.criterion();
                let _ = run_cycle_async(&ALLOCATOR, criterion, source, sink, fetch_timeout).await;
            }
            Either::Second(()) => {
                expire_holds(&ALLOCATOR, &EmbassyClock);
            }
        }
    }
}

/// Poll a request button every `poll_ms` and queue its presses
///
/// Build the button with [`ButtonInput::from_params`] so `PARK_DEBOUNCE`
/// applies.
pub async fn button_loop<P: InputPin>(button: &mut ButtonInput<P>, poll_ms: u64) {
    let mut ticker = Ticker::every(Duration::from_millis(poll_ms));
    loop {
        ticker.next().await;
        match button.poll(EmbassyClock.now_ms()) {
            Ok(Some(event)) => {
                submit_request(event);
            }
            Ok(None) => {}
            Err(_) => crate::log_error!("Button read failed"),
        }
    }
}
