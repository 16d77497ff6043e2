//! Simulation parameters (the memoization key).

use crate::error::{ensure_positive_count, ensure_positive_mean, Result};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Input tuple for one simulation run.
///
/// Two parameter sets are equal when all four fields are equal; the means
/// are compared by their exact bit pattern so the type can serve as a
/// `HashMap` key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Number of servers in the pool
    pub server_count: usize,

    /// Mean time between failures (mean up-state sojourn, in ticks)
    pub mtbf: f64,

    /// Mean time to repair (mean down-state sojourn, in ticks)
    pub mttr: f64,

    /// Number of ticks to simulate
    pub horizon: usize,
}

impl SimulationParameters {
    /// Creates a validated parameter set.
    pub fn new(server_count: usize, mtbf: f64, mttr: f64, horizon: usize) -> Result<Self> {
        let params = Self {
            server_count,
            mtbf,
            mttr,
            horizon,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that every field is strictly positive (and finite for the means).
    pub fn validate(&self) -> Result<()> {
        ensure_positive_count("server_count", self.server_count)?;
        ensure_positive_mean("mtbf", self.mtbf)?;
        ensure_positive_mean("mttr", self.mttr)?;
        ensure_positive_count("horizon", self.horizon)?;
        Ok(())
    }

    /// Long-run fraction of time a single server spends up.
    pub fn steady_state_uptime(&self) -> f64 {
        self.mtbf / (self.mtbf + self.mttr)
    }
}

impl PartialEq for SimulationParameters {
    fn eq(&self, other: &Self) -> bool {
        self.server_count == other.server_count
            && self.mtbf.to_bits() == other.mtbf.to_bits()
            && self.mttr.to_bits() == other.mttr.to_bits()
            && self.horizon == other.horizon
    }
}

impl Eq for SimulationParameters {}

impl Hash for SimulationParameters {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.server_count.hash(state);
        self.mtbf.to_bits().hash(state);
        self.mttr.to_bits().hash(state);
        self.horizon.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use std::collections::HashSet;

    #[test]
    fn test_new_accepts_valid_parameters() {
        let params = SimulationParameters::new(10, 365.25, 2.0, 10_000).unwrap();
        assert_eq!(params.server_count, 10);
        assert_eq!(params.horizon, 10_000);
    }

    #[test]
    fn test_new_rejects_each_bad_field() {
        let cases = [
            (SimulationParameters::new(0, 1.0, 1.0, 1), "server_count"),
            (SimulationParameters::new(1, 0.0, 1.0, 1), "mtbf"),
            (SimulationParameters::new(1, 1.0, -3.0, 1), "mttr"),
            (SimulationParameters::new(1, 1.0, 1.0, 0), "horizon"),
            (SimulationParameters::new(1, f64::NAN, 1.0, 1), "mtbf"),
        ];

        for (result, expected) in cases {
            match result {
                Err(SimError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                Ok(p) => panic!("expected {} to be rejected, got {:?}", expected, p),
            }
        }
    }

    #[test]
    fn test_equal_parameters_hash_together() {
        let a = SimulationParameters::new(10, 365.25, 2.0, 1000).unwrap();
        let b = SimulationParameters::new(10, 365.25, 2.0, 1000).unwrap();
        let c = SimulationParameters::new(10, 365.25, 3.0, 1000).unwrap();

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_steady_state_uptime() {
        let params = SimulationParameters::new(1, 99.0, 1.0, 1).unwrap();
        approx::assert_relative_eq!(params.steady_state_uptime(), 0.99);
    }
}
