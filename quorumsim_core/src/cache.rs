//! Memoization cache in front of the simulation engine.
//!
//! Within one cache instance, every caller asking for the same
//! `SimulationParameters` observes the same simulated history, even though
//! the engine itself is stochastic. Entries are never evicted; the cache
//! lives as long as its owner.

use crate::engine::{simulate, SimulationResult};
use crate::error::Result;
use crate::params::SimulationParameters;
use quorumsim_env::SimulationContext;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Hit/miss counters for a cache instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,

    /// Lookups that ran the engine
    pub misses: u64,

    /// Distinct parameter sets stored
    pub entries: usize,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<SimulationParameters, Arc<SimulationResult>>,
    hits: u64,
    misses: u64,
}

/// Unbounded, never-evicting cache of simulation results.
///
/// Holds its own lock across a miss, so two callers racing on the same key
/// run the engine once. Lock order is always cache, then context.
pub struct SimulationCache<C: SimulationContext> {
    context: Arc<C>,
    state: Mutex<CacheState>,
}

impl<C: SimulationContext> SimulationCache<C> {
    /// Creates an empty cache drawing from `context` on misses.
    pub fn new(context: Arc<C>) -> Self {
        Self {
            context,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Returns the context used on misses.
    pub fn context(&self) -> &Arc<C> {
        &self.context
    }

    /// Returns the stored result for `params`, simulating on first request.
    ///
    /// Invalid parameters fail before any lookup and are never stored.
    pub fn get_or_simulate(&self, params: &SimulationParameters) -> Result<Arc<SimulationResult>> {
        params.validate()?;

        let mut state = self.lock();
        if let Some(result) = state.entries.get(params).cloned() {
            state.hits += 1;
            debug!("Cache hit for {:?}", params);
            return Ok(result);
        }

        debug!("Cache miss for {:?}", params);
        let result = Arc::new(simulate(self.context.as_ref(), params)?);
        state.misses += 1;
        state.entries.insert(*params, Arc::clone(&result));
        Ok(result)
    }

    /// Whether a result for `params` is already stored.
    pub fn contains(&self, params: &SimulationParameters) -> bool {
        self.lock().entries.contains_key(params)
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Current hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.entries.len(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestContext;

    fn cache() -> SimulationCache<TestContext> {
        SimulationCache::new(Arc::new(TestContext::new(42)))
    }

    #[test]
    fn test_hit_returns_identical_result() {
        let cache = cache();
        let params = SimulationParameters::new(10, 50.0, 5.0, 1000).unwrap();

        let first = cache.get_or_simulate(&params).unwrap();
        let second = cache.get_or_simulate(&params).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_distinct_keys_are_simulated_separately() {
        let cache = cache();
        let a = SimulationParameters::new(10, 50.0, 5.0, 1000).unwrap();
        let b = SimulationParameters::new(10, 50.0, 6.0, 1000).unwrap();

        cache.get_or_simulate(&a).unwrap();
        assert!(cache.contains(&a));
        assert!(!cache.contains(&b));

        cache.get_or_simulate(&b).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_hit_does_not_advance_context() {
        let cache = cache();
        let params = SimulationParameters::new(3, 10.0, 2.0, 200).unwrap();
        cache.get_or_simulate(&params).unwrap();

        let before = cache.context().runs();
        cache.get_or_simulate(&params).unwrap();
        assert_eq!(cache.context().runs(), before);
    }

    #[test]
    fn test_invalid_parameters_are_not_stored() {
        let cache = cache();
        let bad = SimulationParameters {
            server_count: 0,
            mtbf: 1.0,
            mttr: 1.0,
            horizon: 10,
        };
        assert!(cache.get_or_simulate(&bad).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn test_fresh_caches_are_isolated() {
        let params = SimulationParameters::new(10, 20.0, 20.0, 500).unwrap();
        let cache_a = SimulationCache::new(Arc::new(TestContext::new(1)));
        let cache_b = SimulationCache::new(Arc::new(TestContext::new(2)));

        let a = cache_a.get_or_simulate(&params).unwrap();
        let b = cache_b.get_or_simulate(&params).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_concurrent_callers_share_one_run() {
        let cache = Arc::new(cache());
        let params = SimulationParameters::new(10, 30.0, 3.0, 2000).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_or_simulate(&params).unwrap())
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 7);
    }
}
