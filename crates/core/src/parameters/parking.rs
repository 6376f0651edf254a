//! Parking Parameter Definitions
//!
//! # Parameters
//!
//! - `PARK_RES_TTL` - Reservation lifetime in milliseconds
//! - `PARK_FETCH_TMO` - Ceiling on record ingestion per cycle in milliseconds
//! - `PARK_SCORES` - Score fields per record (0-2)
//! - `PARK_END_EXACT` - Exact-match stream termination instead of the legacy rule
//! - `PARK_DEBOUNCE` - Request button debounce window in milliseconds
//! - `PARK_TICK` - Reservation expiry sweep period in milliseconds

use super::error::ParameterError;
use super::storage::{ParamValue, ParameterStore};
use crate::allocator::AllocatorConfig;
use crate::section::{RecordLayout, TerminationRule, MAX_SCORES};

const DEFAULT_RES_TTL_MS: u32 = 60_000;
const MIN_RES_TTL_MS: u32 = 1_000;
const MAX_RES_TTL_MS: u32 = 3_600_000;

const DEFAULT_FETCH_TIMEOUT_MS: u32 = 2_000;
const MIN_FETCH_TIMEOUT_MS: u32 = 100;
const MAX_FETCH_TIMEOUT_MS: u32 = 30_000;

const DEFAULT_SCORE_FIELDS: u8 = 1;

const DEFAULT_DEBOUNCE_MS: u32 = 100;
const MIN_DEBOUNCE_MS: u32 = 10;
const MAX_DEBOUNCE_MS: u32 = 1_000;

const DEFAULT_TICK_MS: u32 = 500;
const MIN_TICK_MS: u32 = 50;
const MAX_TICK_MS: u32 = 10_000;

/// Parking parameters loaded from the parameter store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingParams {
    /// Reservation lifetime (ms)
    pub res_ttl_ms: u32,
    /// Ingestion timeout per cycle (ms)
    pub fetch_timeout_ms: u32,
    /// Score fields per record
    pub score_fields: u8,
    /// Use exact-match termination
    pub end_exact: bool,
    /// Button debounce window (ms)
    pub debounce_ms: u32,
    /// Expiry sweep period (ms)
    pub tick_ms: u32,
}

impl Default for ParkingParams {
    fn default() -> Self {
        Self {
            res_ttl_ms: DEFAULT_RES_TTL_MS,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            score_fields: DEFAULT_SCORE_FIELDS,
            end_exact: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

fn read_ms(store: &ParameterStore, name: &str, default: u32, min: u32, max: u32) -> u32 {
    match store.get(name) {
        Some(ParamValue::Int(v)) => (*v).clamp(min as i32, max as i32) as u32,
        _ => default,
    }
}

impl ParkingParams {
    /// Register parking parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register("PARK_RES_TTL", ParamValue::Int(DEFAULT_RES_TTL_MS as i32))?;
        store.register("PARK_FETCH_TMO", ParamValue::Int(DEFAULT_FETCH_TIMEOUT_MS as i32))?;
        store.register("PARK_SCORES", ParamValue::Int(DEFAULT_SCORE_FIELDS as i32))?;
        store.register("PARK_END_EXACT", ParamValue::Bool(false))?;
        store.register("PARK_DEBOUNCE", ParamValue::Int(DEFAULT_DEBOUNCE_MS as i32))?;
        store.register("PARK_TICK", ParamValue::Int(DEFAULT_TICK_MS as i32))?;
        Ok(())
    }

    /// Load parking parameters, clamping out-of-range values
    pub fn from_store(store: &ParameterStore) -> Self {
        let score_fields = match store.get("PARK_SCORES") {
            Some(ParamValue::Int(v)) => (*v).clamp(0, MAX_SCORES as i32) as u8,
            _ => DEFAULT_SCORE_FIELDS,
        };
        let end_exact = matches!(store.get("PARK_END_EXACT"), Some(ParamValue::Bool(true)));

        Self {
            res_ttl_ms: read_ms(
                store,
                "PARK_RES_TTL",
                DEFAULT_RES_TTL_MS,
                MIN_RES_TTL_MS,
                MAX_RES_TTL_MS,
            ),
            fetch_timeout_ms: read_ms(
                store,
                "PARK_FETCH_TMO",
                DEFAULT_FETCH_TIMEOUT_MS,
                MIN_FETCH_TIMEOUT_MS,
                MAX_FETCH_TIMEOUT_MS,
            ),
            score_fields,
            end_exact,
            debounce_ms: read_ms(
                store,
                "PARK_DEBOUNCE",
                DEFAULT_DEBOUNCE_MS,
                MIN_DEBOUNCE_MS,
                MAX_DEBOUNCE_MS,
            ),
            tick_ms: read_ms(store, "PARK_TICK", DEFAULT_TICK_MS, MIN_TICK_MS, MAX_TICK_MS),
        }
    }

    /// Validate parking parameters
    pub fn is_valid(&self) -> bool {
        (MIN_RES_TTL_MS..=MAX_RES_TTL_MS).contains(&self.res_ttl_ms)
            && (MIN_FETCH_TIMEOUT_MS..=MAX_FETCH_TIMEOUT_MS).contains(&self.fetch_timeout_ms)
            && self.score_fields as usize <= MAX_SCORES
            && (MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&self.debounce_ms)
            && (MIN_TICK_MS..=MAX_TICK_MS).contains(&self.tick_ms)
    }

    /// Wire layout selected by these parameters
    pub fn record_layout(&self) -> RecordLayout {
        let termination = if self.end_exact {
            TerminationRule::Exact
        } else {
            TerminationRule::Legacy
        };
        RecordLayout::new(self.score_fields).with_termination(termination)
    }

    /// Allocator configuration derived from these parameters
    pub fn allocator_config(&self) -> AllocatorConfig {
        AllocatorConfig {
            layout: self.record_layout(),
            reservation_ttl_ms: self.res_ttl_ms as u64,
        }
    }
}
