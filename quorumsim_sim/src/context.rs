//! Simulation context implementing SimulationContext for reproducible runs.

use quorumsim_env::SimulationContext;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex, PoisonError};

/// Simulation context backed by a seeded ChaCha8 RNG.
///
/// Clones share the same stream, so a cache and any direct engine calls
/// built from clones of one context advance a single sequence.
pub struct SeededContext {
    /// Master seed for this simulation
    seed: u64,

    /// Deterministic RNG for sojourn sampling
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl SeededContext {
    /// Creates a new SeededContext with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }

    /// Creates an Arc-wrapped context for sharing.
    pub fn shared(seed: u64) -> Arc<Self> {
        Arc::new(Self::new(seed))
    }
}

impl Clone for SeededContext {
    fn clone(&self) -> Self {
        Self {
            seed: self.seed,
            rng: Arc::clone(&self.rng),
        }
    }
}

impl SimulationContext for SeededContext {
    fn with_rng<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut dyn RngCore) -> T,
    {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}
