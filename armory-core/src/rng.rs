//! Shared entropy source for weapon strikes.
//!
//! Every strike draws from one process-wide generator handed around
//! explicitly. Tests inject a seeded generator to make rolls repeatable.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Failure to obtain randomness. Fatal for the invocation that hit it.
#[derive(Debug, Error)]
pub enum EntropyError {
    #[error("OS entropy source unavailable: {0}")]
    Unavailable(String),
    #[error("random generator lock poisoned by a panicking holder")]
    Poisoned,
}

type BoxedRng = Box<dyn RngCore + Send>;

/// A thread-safe, cheaply clonable handle to one random generator.
#[derive(Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<BoxedRng>>,
}

impl SharedRng {
    /// Seed a `StdRng` from the operating system.
    pub fn from_entropy() -> Result<Self, EntropyError> {
        let rng = StdRng::from_rng(OsRng).map_err(|e| EntropyError::Unavailable(e.to_string()))?;
        Ok(Self::from_rng(rng))
    }

    /// Deterministic generator for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Wrap any generator.
    pub fn from_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(rng))),
        }
    }

    /// Run `f` with exclusive access to the generator.
    pub fn with<T>(&self, f: impl FnOnce(&mut BoxedRng) -> T) -> Result<T, EntropyError> {
        let mut guard = self.inner.lock().map_err(|_| EntropyError::Poisoned)?;
        Ok(f(&mut guard))
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn pick(&self, len: usize) -> Result<usize, EntropyError> {
        debug_assert!(len > 0);
        self.with(|rng| rng.gen_range(0..len))
    }
}

impl fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRng").finish_non_exhaustive()
    }
}
