//! Named availability scenarios.

use crate::config::SimConfig;
use quorumsim_core::{Result, SimulationParameters};

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// One nearly-immortal server over a handful of ticks
    ReliableSingle,

    /// Ten servers that fail almost immediately and take ages to repair
    FlakyCluster,

    /// The dashboard's default inputs
    DashboardDefault,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::ReliableSingle,
            ScenarioId::FlakyCluster,
            ScenarioId::DashboardDefault,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::ReliableSingle => "reliable_single",
            ScenarioId::FlakyCluster => "flaky_cluster",
            ScenarioId::DashboardDefault => "dashboard_default",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::ReliableSingle => "1 server, MTBF 1e6h, MTTR 1h, 5h: single instance always up",
            ScenarioId::FlakyCluster => "10 servers, MTBF 1h, MTTR 1e6h, 1000h: single instance partly up",
            ScenarioId::DashboardDefault => "10 servers, 2 failures/month, 2h to fix, 10000h: quorums ordered",
        }
    }

    /// Returns the validated simulation inputs for this scenario.
    pub fn parameters(&self) -> Result<SimulationParameters> {
        match self {
            ScenarioId::ReliableSingle => SimulationParameters::new(1, 1_000_000.0, 1.0, 5),
            ScenarioId::FlakyCluster => SimulationParameters::new(10, 1.0, 1_000_000.0, 1000),
            ScenarioId::DashboardDefault => SimConfig::default().parameters(),
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reliable_single" | "reliablesingle" => Ok(ScenarioId::ReliableSingle),
            "flaky_cluster" | "flakycluster" => Ok(ScenarioId::FlakyCluster),
            "dashboard_default" | "dashboarddefault" | "default" => Ok(ScenarioId::DashboardDefault),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for scenario in ScenarioId::all() {
            assert_eq!(scenario.name().parse::<ScenarioId>(), Ok(scenario));
        }
        assert!("nope".parse::<ScenarioId>().is_err());
    }

    #[test]
    fn test_scenario_parameters_are_valid() {
        for scenario in ScenarioId::all() {
            assert!(scenario.parameters().is_ok(), "{}", scenario);
        }
    }

    #[test]
    fn test_dashboard_default_matches_config() {
        assert_eq!(
            ScenarioId::DashboardDefault.parameters().unwrap(),
            SimConfig::default().parameters().unwrap()
        );
    }

    #[test]
    fn test_dashboard_default_follows_monthly_failure_conversion() {
        let params = ScenarioId::DashboardDefault.parameters().unwrap();
        let config = SimConfig::default();
        assert_eq!(
            params.mtbf,
            crate::config::mtbf_from_monthly_failures(config.monthly_failures).unwrap()
        );
        assert_eq!(params.mttr, config.hours_to_fix);
    }
}
