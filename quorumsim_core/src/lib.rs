//! QuorumSim Core - Availability Simulation for Quorum Clusters
//!
//! Estimates how often an "M-of-N" quorum cluster is available when every
//! server fails and recovers independently:
//! 1. **Sampler**: exponential sojourn times truncated to whole ticks
//! 2. **Engine**: discrete-time up/down simulation of a server pool
//! 3. **Aggregator**: per-tick quorum satisfaction and availability fractions
//! 4. **Cache**: memoized results so identical parameters yield identical history
//!
//! # Example
//!
//! ```ignore
//! use quorumsim_core::{evaluate, SimulationCache, SimulationParameters, CLUSTER_CONFIGS};
//! use quorumsim_env::EntropyContext;
//!
//! let cache = SimulationCache::new(EntropyContext::shared());
//! let params = SimulationParameters::new(10, 365.25, 2.0, 10_000)?;
//! let result = cache.get_or_simulate(&params)?;
//! println!("{}", evaluate(&result, &CLUSTER_CONFIGS)?);
//! ```

pub mod cache;
pub mod engine;
pub mod error;
pub mod params;
pub mod quorum;
pub mod sampler;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

// Re-export key types for convenience
pub use cache::{CacheStats, SimulationCache};
pub use engine::{simulate, simulate_with_rng, Server, SimulationResult, StateSnapshot};
pub use error::{Result, SimError};
pub use params::SimulationParameters;
pub use quorum::{
    evaluate, evaluate_with_series, AvailabilityReport, QuorumAvailability, QuorumConfig,
    CLUSTER_CONFIGS,
};
pub use sampler::{sample_duration, DurationSampler, SojournSampler};
