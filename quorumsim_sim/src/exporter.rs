//! JSON exporter for external charting.
//!
//! Exports availability and per-tick quorum series so a plotting tool can
//! draw the "1 = up, 0 = down" timeline for every configuration.

use crate::error::Result;
use quorumsim_core::{AvailabilityReport, SimulationParameters, SimulationResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// Availability summary for one quorum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub label: String,
    pub m: usize,
    pub n: usize,
    pub satisfied_ticks: usize,
    pub availability: f64,
}

/// Per-tick uptime of one quorum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuorumSeries {
    pub label: String,
    /// 1 = quorum held, 0 = quorum lost
    pub uptime: Vec<u8>,
}

/// Complete simulation export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    /// Seed used (0 = OS entropy)
    pub seed: u64,

    /// Inputs of the run
    pub parameters: SimulationParameters,

    /// Fraction of ticks each server was up, by index
    pub server_uptime: Vec<f64>,

    /// Per-quorum availability
    pub availability: Vec<AvailabilityEntry>,

    /// Per-quorum timelines (empty when the report carried none)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub series: Vec<QuorumSeries>,
}

impl SimExport {
    /// Builds an export from a result and its evaluated report.
    pub fn new(
        seed: u64,
        parameters: SimulationParameters,
        result: &SimulationResult,
        report: &AvailabilityReport,
    ) -> Self {
        let availability = report
            .iter()
            .map(|e| AvailabilityEntry {
                label: e.config.label.to_string(),
                m: e.config.m,
                n: e.config.n,
                satisfied_ticks: e.satisfied_ticks,
                availability: e.availability,
            })
            .collect();

        let series = report
            .iter()
            .filter_map(|e| {
                e.series.as_ref().map(|s| QuorumSeries {
                    label: e.config.label.to_string(),
                    uptime: s.iter().map(|up| u8::from(*up)).collect(),
                })
            })
            .collect();

        Self {
            seed,
            parameters,
            server_uptime: result.server_uptime(),
            availability,
            series,
        }
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
