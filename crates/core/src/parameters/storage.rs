//! Parameter Storage
//!
//! Key-value store for the parking parameters. Keys are bounded names, values
//! are a small closed set of types, and a parameter keeps the type it was
//! registered with.

use super::error::ParameterError;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 16;

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
}

impl ParamValue {
    /// Check whether two values have the same type
    pub fn same_type(&self, other: &ParamValue) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}

/// Parameter store for configuration management
pub struct ParameterStore {
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
}

fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
    let mut key = String::<PARAM_NAME_LEN>::new();
    key.push_str(name).map_err(|_| ParameterError::InvalidConfig)?;
    Ok(key)
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(&key(name).ok()?)
    }

    /// Set parameter value
    ///
    /// The parameter must already be registered with a value of the same type.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = key(name)?;

        let current = self
            .parameters
            .get_mut(&key)
            .ok_or(ParameterError::InvalidConfig)?;
        if !current.same_type(&value) {
            return Err(ParameterError::TypeMismatch);
        }
        *current = value;
        Ok(())
    }

    /// Register a new parameter with its default value
    ///
    /// If the parameter already exists, this is a no-op (idempotent).
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
    ) -> Result<(), ParameterError> {
        let key = key(name)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key, default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Number of registered parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if no parameter is registered
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut store = ParameterStore::new();
        store.register("PARK_TICK", ParamValue::Int(500)).unwrap();
        assert_eq!(store.get("PARK_TICK"), Some(&ParamValue::Int(500)));
        assert_eq!(store.get("PARK_NONE"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut store = ParameterStore::new();
        store.register("PARK_TICK", ParamValue::Int(500)).unwrap();
        store.set("PARK_TICK", ParamValue::Int(250)).unwrap();
        store.register("PARK_TICK", ParamValue::Int(500)).unwrap();
        assert_eq!(store.get("PARK_TICK"), Some(&ParamValue::Int(250)));
    }

    #[test]
    fn test_set_errors() {
        let mut store = ParameterStore::new();
        store.register("PARK_TICK", ParamValue::Int(500)).unwrap();

        assert_eq!(
            store.set("PARK_MISSING", ParamValue::Int(1)),
            Err(ParameterError::InvalidConfig)
        );
        assert_eq!(
            store.set("PARK_TICK", ParamValue::Bool(true)),
            Err(ParameterError::TypeMismatch)
        );
        assert_eq!(
            store.set("PARAMETER_NAME_TOO_LONG", ParamValue::Int(1)),
            Err(ParameterError::InvalidConfig)
        );
        assert_eq!(store.get("PARK_TICK"), Some(&ParamValue::Int(500)));
    }

    #[test]
    fn test_store_full() {
        let mut store = ParameterStore::new();
        for i in 0..MAX_PARAMS {
            let mut name = String::<PARAM_NAME_LEN>::new();
            core::fmt::write(&mut name, format_args!("P{}", i)).unwrap();
            store.register(&name, ParamValue::Int(0)).unwrap();
        }
        assert_eq!(
            store.register("EXTRA", ParamValue::Int(0)),
            Err(ParameterError::StoreFull)
        );
    }
}
