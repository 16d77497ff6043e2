//! Harness configuration and dashboard defaults.
//!
//! The presentation layer speaks in "failures per month" and "hours to fix";
//! the core wants MTBF/MTTR in ticks (hours). The conversion lives here
//! because it decides the cache key.

use quorumsim_core::{SimError, SimulationParameters};
use std::ops::RangeInclusive;

/// Average hours in a month (365.25 days / 12).
pub const HOURS_PER_MONTH: f64 = 365.25 * 24.0 / 12.0;

/// Servers simulated by default; wide enough for every built-in quorum.
pub const DEFAULT_SERVER_COUNT: usize = 10;

/// Accepted simulation length in hours on the dashboard.
pub const HORIZON_RANGE: RangeInclusive<usize> = 1000..=1_000_000;

/// Increment of the dashboard's horizon input.
pub const HORIZON_STEP: usize = 1000;

/// Dashboard slider for monthly failures.
pub const MONTHLY_FAILURES_RANGE: RangeInclusive<f64> = 1.0..=100.0;

/// Dashboard slider for hours to fix.
pub const HOURS_TO_FIX_RANGE: RangeInclusive<f64> = 1.0..=100.0;

/// Converts a monthly failure frequency into an MTBF in hours.
pub fn mtbf_from_monthly_failures(monthly_failures: f64) -> Result<f64, SimError> {
    if !monthly_failures.is_finite() || monthly_failures <= 0.0 {
        return Err(SimError::invalid(
            "monthly_failures",
            format!("must be a positive number, got {}", monthly_failures),
        ));
    }
    Ok(HOURS_PER_MONTH / monthly_failures)
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Master seed for determinism (0 = OS entropy)
    pub seed: u64,

    /// Number of servers to simulate
    pub server_count: usize,

    /// Simulated hours
    pub horizon: usize,

    /// Expected failures per server per month
    pub monthly_failures: f64,

    /// Mean repair time in hours (used directly as MTTR)
    pub hours_to_fix: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            server_count: DEFAULT_SERVER_COUNT,
            horizon: 10_000,
            monthly_failures: 2.0,
            hours_to_fix: 2.0,
        }
    }
}

impl SimConfig {
    /// Mean time between failures in hours.
    pub fn mtbf(&self) -> Result<f64, SimError> {
        mtbf_from_monthly_failures(self.monthly_failures)
    }

    /// The validated cache key for this configuration.
    pub fn parameters(&self) -> Result<SimulationParameters, SimError> {
        SimulationParameters::new(self.server_count, self.mtbf()?, self.hours_to_fix, self.horizon)
    }

    /// Whether every input sits inside the dashboard's widget ranges.
    ///
    /// Values outside are still simulated; this only drives a warning.
    pub fn within_dashboard_ranges(&self) -> bool {
        HORIZON_RANGE.contains(&self.horizon)
            && self.horizon % HORIZON_STEP == 0
            && MONTHLY_FAILURES_RANGE.contains(&self.monthly_failures)
            && HOURS_TO_FIX_RANGE.contains(&self.hours_to_fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_mtbf_conversion() {
        assert_relative_eq!(HOURS_PER_MONTH, 730.5);
        assert_relative_eq!(mtbf_from_monthly_failures(2.0).unwrap(), 365.25);
        assert!(mtbf_from_monthly_failures(0.0).is_err());
        assert!(mtbf_from_monthly_failures(f64::NAN).is_err());
    }

    #[test]
    fn test_default_parameters() {
        let params = SimConfig::default().parameters().unwrap();
        assert_eq!(params.server_count, 10);
        assert_eq!(params.horizon, 10_000);
        assert_relative_eq!(params.mtbf, 365.25);
        assert_relative_eq!(params.mttr, 2.0);
    }

    #[test]
    fn test_same_inputs_same_key() {
        let a = SimConfig::default().parameters().unwrap();
        let b = SimConfig {
            seed: 99,
            ..Default::default()
        }
        .parameters()
        .unwrap();
        // The seed selects the stream, not the cache key
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_inputs_surface_core_errors() {
        let config = SimConfig {
            hours_to_fix: 0.0,
            ..Default::default()
        };
        assert_eq!(config.parameters().unwrap_err().parameter(), "mttr");

        let config = SimConfig {
            monthly_failures: -1.0,
            ..Default::default()
        };
        assert_eq!(config.parameters().unwrap_err().parameter(), "monthly_failures");
    }

    #[test]
    fn test_dashboard_ranges() {
        assert!(SimConfig::default().within_dashboard_ranges());
        assert!(!SimConfig {
            horizon: 1500,
            ..Default::default()
        }
        .within_dashboard_ranges());
        assert!(!SimConfig {
            hours_to_fix: 500.0,
            ..Default::default()
        }
        .within_dashboard_ranges());
    }

    proptest! {
        #[test]
        fn mtbf_times_frequency_is_one_month(freq in 0.01f64..1000.0) {
            let mtbf = mtbf_from_monthly_failures(freq).unwrap();
            prop_assert!((mtbf * freq - HOURS_PER_MONTH).abs() < 1e-9 * HOURS_PER_MONTH);
        }

        #[test]
        fn valid_dashboard_inputs_always_build_parameters(
            steps in 1usize..=1000,
            freq in 1.0f64..=100.0,
            fix in 1.0f64..=100.0,
        ) {
            let config = SimConfig {
                horizon: steps * HORIZON_STEP,
                monthly_failures: freq,
                hours_to_fix: fix,
                ..Default::default()
            };
            prop_assert!(config.within_dashboard_ranges());
            prop_assert!(config.parameters().is_ok());
        }
    }
}
