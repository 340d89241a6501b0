//! ags-fluids: working-fluid property calculations for agsflow.
//!
//! Provides:
//! - Working fluid selector (water, supercritical CO2)
//! - `FluidProperties` trait: density, viscosity and heat capacity versus temperature
//! - Built-in tabulated models for both fluids
//! - CoolProp backend (feature `coolprop`)
//!
//! # Example
//!
//! ```
//! use ags_fluids::{FluidProperties, TabulatedFluid};
//! use ags_core::units::degc;
//!
//! let water = TabulatedFluid::water();
//! let rho = water.rho(degc(60.0)).unwrap();
//! println!("Density: {} kg/m³", rho.value);
//! ```

#[cfg(feature = "coolprop")]
pub mod coolprop;
pub mod error;
pub mod fluid;
pub mod model;
pub mod table;

// Re-exports for ergonomics
#[cfg(feature = "coolprop")]
pub use coolprop::CoolPropProperties;
pub use error::{FluidError, FluidResult};
pub use fluid::WorkingFluid;
pub use model::FluidProperties;
pub use table::{TabulatedFluid, water_viscosity_vogel};
