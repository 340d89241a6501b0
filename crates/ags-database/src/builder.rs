//! Writes dense simulation results into a container in the compressed
//! database layout.

use crate::axes::{IndependentVariableAxes, PARAMETER_AXES, TIME_AXIS};
use crate::channel::{CompressedChannel, valid_mask};
use crate::container::{Container, Dataset};
use crate::database::Configuration;
use crate::error::{DatabaseError, DatabaseResult};
use ags_fluids::WorkingFluid;
use ndarray::ArrayD;

/// Dense results for one (configuration, fluid) pair.
#[derive(Debug, Clone)]
pub struct DenseResults {
    pub axes: IndependentVariableAxes,
    /// Outlet temperature [K], shape `parameters ++ [time]`.
    pub outlet_temperature: ArrayD<f64>,
    /// Outlet pressure [Pa], shape `parameters ++ [time]`.
    pub outlet_pressure: ArrayD<f64>,
    /// Thermal energy [GWh], parameter shape. Non-finite marks a failed run.
    pub thermal_energy: ArrayD<f64>,
    /// Electric energy [GWh], parameter shape. Non-finite marks a failed run.
    pub electric_energy: ArrayD<f64>,
}

/// Compress `results` and insert them into `container`.
///
/// `rank` limits the number of singular triplets kept per channel.
pub fn write_database(
    container: &mut Container,
    configuration: Configuration,
    fluid: WorkingFluid,
    results: &DenseResults,
    rank: Option<usize>,
) -> DatabaseResult<()> {
    let parameter_shape = results.axes.parameter_shape();
    let full_shape = results.axes.full_shape();
    for (what, array, expected) in [
        ("Tout", &results.outlet_temperature, &full_shape),
        ("Pout", &results.outlet_pressure, &full_shape),
        ("Wt", &results.thermal_energy, &parameter_shape),
        ("We", &results.electric_energy, &parameter_shape),
    ] {
        if array.shape() != expected.as_slice() {
            return Err(DatabaseError::Shape {
                what: what.to_string(),
                expected: expected.clone(),
                found: array.shape().to_vec(),
            });
        }
    }

    let case = configuration.key();
    let prefix = format!("{case}/{}", fluid.key());

    for (i, name) in PARAMETER_AXES.iter().enumerate() {
        container.insert(
            &format!("{prefix}/input/{name}"),
            Dataset::vector(results.axes.parameter(i).to_vec()),
        )?;
    }
    container.insert(
        &format!("{prefix}/input/{TIME_AXIS}"),
        Dataset::vector(results.axes.time().to_vec()),
    )?;

    container.insert(
        &format!("{prefix}/output/Wt"),
        Dataset::from_array(&results.thermal_energy),
    )?;
    container.insert(
        &format!("{prefix}/output/We"),
        Dataset::from_array(&results.electric_energy),
    )?;

    let valid = valid_mask(&results.electric_energy);
    for (name, dense) in [
        ("Tout", &results.outlet_temperature),
        ("Pout", &results.outlet_pressure),
    ] {
        let channel = CompressedChannel::from_dense(dense, &valid, rank)?;
        for (path, dataset) in channel.datasets(&format!("{prefix}/output/{name}")) {
            container.insert(&path, dataset)?;
        }
    }
    Ok(())
}

/// Set the fixed scalars shared by every fluid of a configuration.
pub fn write_fixed_params(
    container: &mut Container,
    configuration: Configuration,
    injection_pressure_pa: f64,
    ambient_temperature_k: f64,
) -> DatabaseResult<()> {
    let case = configuration.key();
    container.insert(
        &format!("{case}/fixed_params/Pinj"),
        Dataset::scalar(injection_pressure_pa),
    )?;
    container.insert(
        &format!("{case}/fixed_params/Tamb"),
        Dataset::scalar(ambient_temperature_k),
    )?;
    Ok(())
}
