//! Shared handle to the single sensing-engine instance.
//!
//! The sensing task constructs the engine and keeps one handle; the
//! console task gets a clone. Every call takes the engine lock, so a
//! parameter write never overlaps a `process` step.
//!
//! Lock order: the console task may take the engine lock while holding
//! the console mutex; the sensing task holds the engine lock during
//! `process` but only ever *tries* the console mutex from inside it.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::app::params::ParamValue;
use crate::app::ports::{EngineError, SensingEngine};

/// Cloneable, thread-safe reference to the engine.
pub struct EngineHandle<E> {
    inner: Arc<Mutex<E>>,
}

impl<E> Clone for EngineHandle<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: SensingEngine> EngineHandle<E> {
    pub fn new(engine: E) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn engine(&self) -> Result<MutexGuard<'_, E>, EngineError> {
        self.inner.lock().map_err(|_| EngineError::Poisoned)
    }

    pub fn process(&self, timestamp_ms: u64) -> Result<(), EngineError> {
        self.engine()?.process(timestamp_ms)
    }

    pub fn set_parameter(&self, key: &str, value: &[u8]) -> Result<(), EngineError> {
        self.engine()?.set_parameter(key, value)
    }

    pub fn get_parameter(&self, key: &str) -> Result<ParamValue, EngineError> {
        self.engine()?.get_parameter(key)
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut E) -> R) -> Result<R, EngineError> {
        let mut engine = self.engine()?;
        Ok(f(&mut engine))
    }
}
