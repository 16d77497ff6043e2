//! Quorum availability aggregation.
//!
//! A quorum `(M, N)` is satisfied at a tick when at least `M` of the first
//! `N` servers (by index) are up. The aggregator turns a simulated series
//! into per-configuration availability fractions and, on request, the
//! per-tick satisfaction series for charting.

use crate::engine::{SimulationResult, StateSnapshot};
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use tracing::trace;

/// "At least `m` of the first `n` servers must be up."
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuorumConfig {
    /// Minimum number of up servers
    pub m: usize,

    /// Number of servers (by index, starting at 0) taking part
    pub n: usize,

    /// Display label
    pub label: Cow<'static, str>,
}

impl QuorumConfig {
    /// Creates a configuration with a static label.
    pub const fn new(m: usize, n: usize, label: &'static str) -> Self {
        Self {
            m,
            n,
            label: Cow::Borrowed(label),
        }
    }

    /// Checks `0 < m <= n <= server_count`.
    ///
    /// `n > server_count` is rejected rather than silently counting fewer
    /// servers.
    pub fn validate(&self, server_count: usize) -> Result<()> {
        if self.m == 0 {
            return Err(SimError::invalid(
                "m",
                format!("quorum '{}' requires m > 0", self.label),
            ));
        }
        if self.m > self.n {
            return Err(SimError::invalid(
                "m",
                format!("quorum '{}' has m={} greater than n={}", self.label, self.m, self.n),
            ));
        }
        if self.n > server_count {
            return Err(SimError::invalid(
                "n",
                format!(
                    "quorum '{}' spans {} servers but only {} are simulated",
                    self.label, self.n, server_count
                ),
            ));
        }
        Ok(())
    }

    /// Whether the quorum holds for one snapshot.
    ///
    /// Fails like [`QuorumConfig::validate`] when the snapshot is narrower
    /// than `n`.
    pub fn is_satisfied(&self, snapshot: &StateSnapshot<'_>) -> Result<bool> {
        self.validate(snapshot.len())?;
        Ok(self.holds(snapshot))
    }

    // Caller has validated against the snapshot width.
    fn holds(&self, snapshot: &StateSnapshot<'_>) -> bool {
        snapshot.up_count(self.n).is_some_and(|up| up >= self.m)
    }
}

impl fmt::Display for QuorumConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-of-{})", self.label, self.m, self.n)
    }
}

/// Built-in cluster configurations, in display order.
pub const CLUSTER_CONFIGS: [QuorumConfig; 4] = [
    QuorumConfig::new(1, 1, "Single Instance"),
    QuorumConfig::new(3, 4, "3 out of 4"),
    QuorumConfig::new(5, 7, "5 out of 7"),
    QuorumConfig::new(7, 10, "7 out of 10"),
];

/// Availability of one quorum configuration over a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuorumAvailability {
    /// The evaluated configuration
    pub config: QuorumConfig,

    /// Ticks at which the quorum held
    pub satisfied_ticks: usize,

    /// Total ticks evaluated
    pub horizon: usize,

    /// `satisfied_ticks / horizon`, in `[0, 1]`
    pub availability: f64,

    /// Per-tick satisfaction in tick order, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<bool>>,
}

impl QuorumAvailability {
    /// Ticks at which the quorum did not hold.
    pub fn unavailable_ticks(&self) -> usize {
        self.horizon - self.satisfied_ticks
    }
}

/// Per-configuration availability for one simulation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    /// Ticks in the evaluated result
    pub horizon: usize,

    /// One entry per configuration, in the order given
    pub entries: Vec<QuorumAvailability>,
}

impl AvailabilityReport {
    /// Looks up an entry by label.
    pub fn get(&self, label: &str) -> Option<&QuorumAvailability> {
        self.entries.iter().find(|e| e.config.label == label)
    }

    /// Iterates entries in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &QuorumAvailability> {
        self.entries.iter()
    }
}

impl fmt::Display for AvailabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System Availability:")?;
        for entry in &self.entries {
            writeln!(
                f,
                "for {} configuration: {:.4}%",
                entry.config.label,
                entry.availability * 100.0
            )?;
        }
        Ok(())
    }
}

/// Computes availability fractions for each configuration.
pub fn evaluate(result: &SimulationResult, configs: &[QuorumConfig]) -> Result<AvailabilityReport> {
    aggregate(result, configs, false)
}

/// Like [`evaluate`], additionally keeping each per-tick series.
pub fn evaluate_with_series(
    result: &SimulationResult,
    configs: &[QuorumConfig],
) -> Result<AvailabilityReport> {
    aggregate(result, configs, true)
}

fn aggregate(
    result: &SimulationResult,
    configs: &[QuorumConfig],
    keep_series: bool,
) -> Result<AvailabilityReport> {
    let horizon = result.horizon();
    if horizon == 0 {
        return Err(SimError::invalid("horizon", "cannot evaluate an empty result"));
    }
    for config in configs {
        config.validate(result.server_count())?;
    }

    let entries = configs
        .iter()
        .map(|config| {
            let mut satisfied_ticks = 0;
            let mut series = keep_series.then(|| Vec::with_capacity(horizon));

            for snapshot in result.snapshots() {
                let ok = config.holds(&snapshot);
                satisfied_ticks += usize::from(ok);
                if let Some(series) = series.as_mut() {
                    series.push(ok);
                }
            }

            let availability = satisfied_ticks as f64 / horizon as f64;
            trace!("{}: {}/{} ticks satisfied", config, satisfied_ticks, horizon);

            QuorumAvailability {
                config: config.clone(),
                satisfied_ticks,
                horizon,
                availability,
                series,
            }
        })
        .collect();

    Ok(AvailabilityReport { horizon, entries })
}
