//! Seeded context for tests.
//!
//! Available to integration tests and dependent crates through the
//! `test-support` feature.

use quorumsim_env::SimulationContext;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// ChaCha8-backed context that counts generator borrows.
pub struct TestContext {
    seed: u64,
    rng: Mutex<ChaCha8Rng>,
    runs: AtomicU64,
}

impl TestContext {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            runs: AtomicU64::new(0),
        }
    }

    pub fn shared(seed: u64) -> Arc<Self> {
        Arc::new(Self::new(seed))
    }

    /// Number of times the generator has been borrowed.
    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::SeqCst)
    }
}

impl SimulationContext for TestContext {
    fn with_rng<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut dyn RngCore) -> T,
    {
        self.runs.fetch_add(1, Ordering::SeqCst);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}
