//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub case_name: String,
    pub timestamp: String,
    /// "tabulated" or "analytical".
    pub solver: String,
    pub engine_version: String,
    #[serde(default)]
    pub summary: RunSummary,
}

impl RunManifest {
    /// Manifest stamped with the current UTC time.
    pub fn new(
        run_id: RunId,
        case_name: impl Into<String>,
        solver: impl Into<String>,
        engine_version: impl Into<String>,
        summary: RunSummary,
    ) -> Self {
        Self {
            run_id,
            case_name: case_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            solver: solver.into(),
            engine_version: engine_version.into(),
            summary,
        }
    }
}

/// Scalar results of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub average_thermal_kw: Option<f64>,
    pub average_electric_kw: Option<f64>,
    pub final_temperature_k: Option<f64>,
    pub peak_pumping_power_w: Option<f64>,
}

/// One sample of the produced-fluid time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesRecord {
    pub time_years: f64,
    pub produced_temperature_k: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlet_pressure_pa: Option<f64>,
    pub pressure_drop_pa: f64,
    pub pumping_power_w: f64,
}
