//! Simulation time grid.

use ags_core::numeric::linspace;
use serde::{Deserialize, Serialize};

/// Operating horizon and output resolution of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationTimeline {
    pub plant_lifetime_years: u32,
    #[serde(default = "default_timesteps_per_year")]
    pub timesteps_per_year: u32,
}

fn default_timesteps_per_year() -> u32 {
    4
}

impl Default for SimulationTimeline {
    fn default() -> Self {
        Self {
            plant_lifetime_years: 30,
            timesteps_per_year: default_timesteps_per_year(),
        }
    }
}

impl SimulationTimeline {
    pub fn sample_count(&self) -> usize {
        self.plant_lifetime_years as usize * self.timesteps_per_year as usize + 1
    }

    /// Output times [years], evenly spaced from start-up to end of life.
    pub fn time_vector(&self) -> Vec<f64> {
        linspace(0.0, self.plant_lifetime_years as f64, self.sample_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarterly_grid_over_thirty_years() {
        let timeline = SimulationTimeline::default();
        let time = timeline.time_vector();
        assert_eq!(time.len(), 121);
        assert_eq!(time[0], 0.0);
        assert_eq!(time[4], 1.0);
        assert_eq!(time[120], 30.0);
    }

    #[test]
    fn yearly_steps_parse_with_default_resolution() {
        let timeline: SimulationTimeline = serde_yaml::from_str("plant_lifetime_years: 20").unwrap();
        assert_eq!(timeline.timesteps_per_year, 4);
        assert_eq!(timeline.sample_count(), 81);
    }
}
