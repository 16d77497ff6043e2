//! Core environment context trait for QuorumSim engines.

use rand::RngCore;

/// The central interface for randomness injection.
///
/// This trait abstracts the entropy source so that the simulation engine can
/// run against OS entropy in production and against a seeded generator in
/// tests and reproducible runs.
///
/// # Implementations
///
/// - **Production**: `EntropyContext` - wraps `StdRng` seeded from the OS
/// - **Simulation**: `SeededContext` - wraps `ChaCha8Rng(seed)`
///
/// # Serialization
///
/// A context is process-wide shared state. Implementations must guard the
/// generator so that `with_rng` grants exclusive access for the whole
/// closure; the engine relies on this to keep every draw of one run
/// contiguous in the stream.
pub trait SimulationContext: Send + Sync + 'static {
    /// Runs `f` with exclusive access to the underlying generator.
    ///
    /// No other caller can draw from this context until `f` returns.
    fn with_rng<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut dyn RngCore) -> T;

    /// Returns the context's seed (for logging/debugging).
    ///
    /// In production, returns 0 (not seeded).
    /// In simulation, returns the master seed.
    fn seed(&self) -> u64;
}
