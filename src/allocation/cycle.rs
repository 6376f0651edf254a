//! Allocation Cycle Driver
//!
//! Runs one request through the allocator:
//!
//! 1. `request` (rejected with `Busy` if a cycle is running)
//! 2. pull lines from the record source until a sentinel, the ingestion
//!    deadline, or a closed source
//! 3. `finish_fetch` + `take_outcome`
//! 4. present the outcome exactly once
//!
//! Each step locks the shared allocator separately, so the expiry tick can
//! run between lines. The allocation decision itself happens inside a
//! single lock.

use pico_park_core::allocator::{AllocationOutcome, Allocator, CycleStats, IngestStatus};
use pico_park_core::error::AllocError;
use pico_park_core::section::Criterion;
use pico_park_core::traits::TimeSource;

use crate::core::traits::SharedState;
use crate::platform::traits::{PresentationSink, RecordSource, SourceError};

/// Run one allocation cycle to completion
///
/// # Errors
///
/// Returns `AllocError::Busy` if another cycle is in progress. Nothing is
/// presented in that case.
pub fn run_cycle<S, R, P, T>(
    state: &S,
    criterion: Criterion,
    source: &mut R,
    sink: &mut P,
    clock: &T,
    fetch_timeout_ms: u64,
) -> Result<AllocationOutcome, AllocError>
where
    S: SharedState<Allocator>,
    R: RecordSource,
    P: PresentationSink,
    T: TimeSource,
{
    if let Err(e) = state.with_mut(|a| a.request(criterion)) {
        crate::log_warn!("Allocation request rejected: {}", e.label());
        return Err(e);
    }
    crate::log_info!("Allocation requested ({})", criterion.name());

    let deadline_ms = clock.now_ms().saturating_add(fetch_timeout_ms);
    loop {
        if clock.now_ms() > deadline_ms {
            crate::log_warn!("Ingestion timed out");
            break;
        }

        match source.next_line(deadline_ms) {
            Ok(line) => {
                if !ingest_line(state, &line) {
                    break;
                }
            }
            Err(SourceError::Timeout) => {
                crate::log_warn!("Ingestion timed out");
                break;
            }
            Err(SourceError::Closed) => {
                crate::log_warn!("Record source closed");
                break;
            }
            Err(SourceError::Platform(_)) => {
                crate::log_error!("Record source failed");
                break;
            }
        }
    }

    let outcome = finish(state, clock.now_ms())?;
    sink.present(&outcome);
    Ok(outcome)
}

/// Feed one line; returns `false` once the stream has ended
pub(crate) fn ingest_line<S: SharedState<Allocator>>(state: &S, line: &[u8]) -> bool {
    match state.with_mut(|a| a.ingest(line)) {
        Ok(IngestStatus::Stored) => true,
        Ok(IngestStatus::Terminated) => false,
        Err(e) => {
            crate::log_warn!("Skipped record: {}", e.label());
            true
        }
    }
}

/// Decide and leave the allocator idle
pub(crate) fn finish<S: SharedState<Allocator>>(
    state: &S,
    now_ms: u64,
) -> Result<AllocationOutcome, AllocError> {
    let (outcome, stats) = state.with_mut(|a| {
        a.finish_fetch(now_ms)?;
        let outcome = a.take_outcome()?;
        Ok::<_, AllocError>((outcome, a.stats()))
    })?;
    log_cycle(&outcome, stats);
    Ok(outcome)
}

fn log_cycle(outcome: &AllocationOutcome, stats: CycleStats) {
    crate::log_debug!(
        "Ingested {} sections ({} malformed, {} dropped)",
        stats.accepted,
        stats.malformed,
        stats.dropped
    );
    if stats.ledger_full {
        crate::log_error!("Reservation not recorded: ledger full");
    }
    match outcome {
        AllocationOutcome::Allocated {
            section,
            remaining,
            spot,
            ..
        } => {
            crate::log_info!(
                "Allocated {} spot {} ({} free)",
                section.as_str(),
                spot,
                remaining
            );
        }
        AllocationOutcome::NoFreeSpot => crate::log_info!("No free spot"),
        AllocationOutcome::NoData => crate::log_info!("No section data"),
    }
}

/// Periodic expiry sweep; returns the number of holds dropped
pub fn expire_holds<S, T>(state: &S, clock: &T) -> usize
where
    S: SharedState<Allocator>,
    T: TimeSource,
{
    let now_ms = clock.now_ms();
    let expired = state.with_mut(|a| a.tick(now_ms));
    if expired > 0 {
        crate::log_debug!("Expired {} reservations", expired);
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockState;
    use crate::platform::mock::{MockRecordSource, MockSink};
    use pico_park_core::allocator::AllocatorState;
    use pico_park_core::traits::MockTime;

    fn allocator() -> MockState<Allocator> {
        MockState::new(Allocator::default())
    }

    #[test]
    fn test_cycle_presents_once() {
        let state = allocator();
        let mut source = MockRecordSource::from_lines(&[b"A 2 5", b"B 3 1", b"END\r"]);
        let mut sink = MockSink::new();
        let clock = MockTime::new();

        let outcome =
            run_cycle(&state, Criterion::None, &mut source, &mut sink, &clock, 2_000).unwrap();

        assert!(outcome.is_allocated());
        assert_eq!(sink.outcomes().len(), 1);
        assert_eq!(sink.last(), Some(&outcome));
        assert!(state.with(|a| a.is_idle()));
    }

    #[test]
    fn test_sentinel_stops_reading() {
        let state = allocator();
        let mut source = MockRecordSource::from_lines(&[b"A 2 5", b"END\r", b"B 3 1"]);
        let mut sink = MockSink::new();
        let clock = MockTime::new();

        run_cycle(&state, Criterion::None, &mut source, &mut sink, &clock, 2_000).unwrap();

        assert_eq!(source.remaining(), 1);
        assert_eq!(state.with(|a| a.registry().len()), 1);
    }

    #[test]
    fn test_busy_rejected_without_presenting() {
        let state = allocator();
        state.with_mut(|a| a.request(Criterion::None)).unwrap();

        let mut source = MockRecordSource::new();
        let mut sink = MockSink::new();
        let clock = MockTime::new();

        let result = run_cycle(&state, Criterion::Entrance, &mut source, &mut sink, &clock, 100);
        assert_eq!(result, Err(AllocError::Busy));
        assert!(sink.outcomes().is_empty());
        assert_eq!(source.reads(), 0);
        assert_eq!(state.with(|a| a.state()), AllocatorState::Fetching);
    }

    #[test]
    fn test_closed_source_finishes_cycle() {
        let state = allocator();
        let mut source = MockRecordSource::from_lines(&[b"A 1 1"]).close_when_drained();
        let mut sink = MockSink::new();
        let clock = MockTime::new();

        let outcome =
            run_cycle(&state, Criterion::None, &mut source, &mut sink, &clock, 2_000).unwrap();
        assert!(outcome.is_allocated());
        assert!(!state.with(|a| a.stats().terminated));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let state = allocator();
        let mut source = MockRecordSource::from_lines(&[b"A x 5", b"B 3", b"C 2 4", b"END\r"]);
        let mut sink = MockSink::new();
        let clock = MockTime::new();

        run_cycle(&state, Criterion::None, &mut source, &mut sink, &clock, 2_000).unwrap();

        let stats = state.with(|a| a.stats());
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.malformed, 2);
        assert!(stats.terminated);
    }

    #[test]
    fn test_expire_holds_uses_clock() {
        let state = allocator();
        let mut source = MockRecordSource::from_lines(&[b"A 2 5", b"END\r"]);
        let mut sink = MockSink::new();
        let clock = MockTime::with_initial(1_000);

        run_cycle(&state, Criterion::None, &mut source, &mut sink, &clock, 2_000).unwrap();
        assert_eq!(state.with(|a| a.ledger().len()), 1);

        // Expiry is strict: a hold survives its exact expiry instant
        clock.set(61_000);
        assert_eq!(expire_holds(&state, &clock), 0);
        clock.advance(1);
        assert_eq!(expire_holds(&state, &clock), 1);
        assert!(state.with(|a| a.ledger().is_empty()));
    }
}
