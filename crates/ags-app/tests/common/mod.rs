//! Shared fixtures: a base case and a small synthetic database.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use ags_app::Case;
use ags_database::{
    Configuration, Container, DenseResults, IndependentVariableAxes, write_database,
    write_fixed_params,
};
use ags_fluids::WorkingFluid;
use ndarray::{ArrayD, Dimension, IxDyn};

pub const INJECTION_PRESSURE_PA: f64 = 1.0e7;

pub fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{nanos}"));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn base_case() -> Case {
    serde_yaml::from_str(
        r#"
name: base
fluid: H2O
configuration: coaxial
well:
  vertical_depth_m: 3000
  lateral_length_m: 5000
  lateral_diameter_m: 0.35
operation:
  mass_flow_kg_s: 20
  injection_temperature_c: 40
rock:
  surface_temperature_c: 15
  gradient_k_per_m: 0.05
  conductivity_w_m_k: 3.0
timeline:
  plant_lifetime_years: 30
  timesteps_per_year: 4
"#,
    )
    .unwrap()
}

/// Outlet temperature [K], linear in every coordinate so interpolation is
/// exact.
pub fn outlet_temperature(p: [f64; 7], t: f64) -> f64 {
    p[5] + 0.8 * p[3] * p[2] - 0.05 * p[0] * t / 30.0 - 1.0e-4 * p[1]
}

/// Outlet pressure [Pa]: friction grows with flow, buoyancy with depth.
pub fn outlet_pressure(p: [f64; 7], t: f64) -> f64 {
    INJECTION_PRESSURE_PA - 400.0 * p[0] + 2.0 * p[2] + 5.0 * t
}

pub fn thermal_energy(p: [f64; 7]) -> f64 {
    2.0 * p[0] + 0.01 * p[1] + 10.0 * p[6]
}

fn axes() -> IndependentVariableAxes {
    IndependentVariableAxes::new(
        [
            vec![5.0, 300.0],
            vec![1000.0, 20000.0],
            vec![1000.0, 5000.0],
            vec![0.03, 0.07],
            vec![0.2159, 0.4445],
            vec![303.15, 333.15],
            vec![1.5, 4.5],
        ],
        vec![0.0, 10.0, 20.0, 30.0, 40.0],
    )
    .unwrap()
}

fn coords(axes: &IndependentVariableAxes, idx: &[usize]) -> [f64; 7] {
    let mut p = [0.0; 7];
    for (d, v) in p.iter_mut().enumerate() {
        *v = axes.parameter(d)[idx[d]];
    }
    p
}

/// Write a coaxial water database as `{dir}/coaxial_H2O.json`.
pub fn write_synthetic_database(dir: &Path) {
    write_coaxial_water(dir, None);
}

/// Like [`write_synthetic_database`], but every run reports
/// `(temperature_k, pressure_pa)` at t = 0 instead of its operating state.
pub fn write_database_with_startup_sample(dir: &Path, startup: (f64, f64)) {
    write_coaxial_water(dir, Some(startup));
}

fn write_coaxial_water(dir: &Path, startup: Option<(f64, f64)>) {
    let axes = axes();
    let time = axes.time().to_vec();
    let full = axes.full_shape();
    let params = axes.parameter_shape();

    let tout = ArrayD::from_shape_fn(IxDyn(&full), |idx| match startup {
        Some((t0, _)) if idx[7] == 0 => t0,
        _ => outlet_temperature(coords(&axes, idx.slice()), time[idx[7]]),
    });
    let pout = ArrayD::from_shape_fn(IxDyn(&full), |idx| match startup {
        Some((_, p0)) if idx[7] == 0 => p0,
        _ => outlet_pressure(coords(&axes, idx.slice()), time[idx[7]]),
    });
    let wt = ArrayD::from_shape_fn(IxDyn(&params), |idx| thermal_energy(coords(&axes, idx.slice())));
    let we = wt.mapv(|e| 0.1 * e);

    let mut container = Container::new();
    write_fixed_params(&mut container, Configuration::Coaxial, INJECTION_PRESSURE_PA, 288.15)
        .unwrap();
    write_database(
        &mut container,
        Configuration::Coaxial,
        WorkingFluid::Water,
        &DenseResults {
            axes,
            outlet_temperature: tout,
            outlet_pressure: pout,
            thermal_energy: wt,
            electric_energy: we,
        },
        None,
    )
    .unwrap();
    container.save(&dir.join("coaxial_H2O.json")).unwrap();
}
