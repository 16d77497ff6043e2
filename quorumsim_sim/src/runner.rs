//! Scenario runner - executes availability scenarios and checks their outcomes.

use crate::context::SeededContext;
use crate::error::Result;
use crate::scenarios::ScenarioId;

use quorumsim_core::{
    evaluate, AvailabilityReport, QuorumConfig, SimulationCache, SimulationResult,
    CLUSTER_CONFIGS,
};
use tracing::{debug, info};

/// Results from running a scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario that was run
    pub scenario: ScenarioId,

    /// Seed used
    pub seed: u64,

    /// Whether scenario passed all assertions
    pub passed: bool,

    /// Ticks simulated (0 when the scenario never ran)
    pub horizon: usize,

    /// Availability of every built-in quorum that fits the cluster
    pub report: Option<AvailabilityReport>,

    /// Failure message if any
    pub failure_reason: Option<String>,
}

/// Runs availability scenarios against one seeded cache.
pub struct ScenarioRunner {
    /// Configuration seed
    seed: u64,

    /// Results memoized per parameter set
    cache: SimulationCache<SeededContext>,
}

impl ScenarioRunner {
    /// Creates a new scenario runner.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            cache: SimulationCache::new(SeededContext::shared(seed)),
        }
    }

    /// Returns the runner's cache.
    pub fn cache(&self) -> &SimulationCache<SeededContext> {
        &self.cache
    }

    /// Runs a scenario and returns the result.
    pub fn run(&self, scenario: ScenarioId) -> ScenarioResult {
        info!("Starting scenario: {} (seed={})", scenario.name(), self.seed);
        debug!("  {}", scenario.description());

        match self.assess(scenario) {
            Ok((report, verdict)) => ScenarioResult {
                scenario,
                seed: self.seed,
                passed: verdict.is_none(),
                horizon: report.horizon,
                report: Some(report),
                failure_reason: verdict,
            },
            Err(e) => ScenarioResult {
                scenario,
                seed: self.seed,
                passed: false,
                horizon: 0,
                report: None,
                failure_reason: Some(e.to_string()),
            },
        }
    }

    /// Simulates (or recalls) the scenario and applies its assertions.
    fn assess(&self, scenario: ScenarioId) -> Result<(AvailabilityReport, Option<String>)> {
        let result = self.cache.get_or_simulate(&scenario.parameters()?)?;
        let configs = fitting_configs(result.server_count());
        let report = evaluate(&result, &configs)?;

        let verdict = match scenario {
            ScenarioId::ReliableSingle => check_reliable_single(&report),
            ScenarioId::FlakyCluster => check_flaky_cluster(&report),
            ScenarioId::DashboardDefault => check_dashboard_default(&result, &report)?,
        };
        Ok((report, verdict))
    }
}

/// Built-in quorums that fit a cluster of `server_count`.
fn fitting_configs(server_count: usize) -> Vec<QuorumConfig> {
    CLUSTER_CONFIGS
        .iter()
        .filter(|c| c.n <= server_count)
        .cloned()
        .collect()
}

fn single_instance(report: &AvailabilityReport) -> std::result::Result<f64, String> {
    report
        .get(CLUSTER_CONFIGS[0].label.as_ref())
        .map(|e| e.availability)
        .ok_or_else(|| "Single Instance quorum missing from report".to_string())
}

fn check_reliable_single(report: &AvailabilityReport) -> Option<String> {
    match single_instance(report) {
        Ok(a) if a == 1.0 => None,
        Ok(a) => Some(format!("Single Instance availability {:.4} != 1.0", a)),
        Err(reason) => Some(reason),
    }
}

fn check_flaky_cluster(report: &AvailabilityReport) -> Option<String> {
    match single_instance(report) {
        Ok(a) if a > 0.0 && a < 1.0 => None,
        Ok(a) => Some(format!("Single Instance availability {:.4} not in (0, 1)", a)),
        Err(reason) => Some(reason),
    }
}

fn check_dashboard_default(
    result: &SimulationResult,
    report: &AvailabilityReport,
) -> Result<Option<String>> {
    if let Some(entry) = report
        .iter()
        .find(|e| !(0.0..=1.0).contains(&e.availability))
    {
        return Ok(Some(format!(
            "{} availability {} outside [0, 1]",
            entry.config.label, entry.availability
        )));
    }

    // Tightening M over the whole cluster can only lose ticks
    let n = result.server_count();
    let sweep: Vec<QuorumConfig> = (1..=n)
        .map(|m| QuorumConfig {
            m,
            n,
            label: format!("{} of {}", m, n).into(),
        })
        .collect();
    let sweep = evaluate(result, &sweep)?;
    for pair in sweep.entries.windows(2) {
        if pair[1].satisfied_ticks > pair[0].satisfied_ticks {
            return Ok(Some(format!(
                "{} satisfied more ticks than {}",
                pair[1].config.label, pair[0].config.label
            )));
        }
    }

    Ok(None)
}
