//! ags-database: precomputed closed-loop performance tables.
//!
//! A database holds, for one wellbore configuration and working fluid, the
//! outlet temperature and pressure histories of a grid of simulations over
//! seven parameters (flow rate, lateral length, depth, gradient, diameter,
//! injection temperature, rock conductivity) plus time. The histories are
//! stored SVD-compressed and expanded once at load; queries use multilinear
//! interpolation and never extrapolate.
//!
//! # Example
//!
//! ```no_run
//! use ags_database::{Configuration, Container, PerformanceDatabase, QueryPoint};
//! use ags_fluids::WorkingFluid;
//!
//! let container = Container::open("clgs_database.json".as_ref())?;
//! let db = PerformanceDatabase::load(&container, Configuration::Coaxial, WorkingFluid::Water)?;
//! let states = db.interp_outlet_states(&QueryPoint {
//!     mdot: 20.0,
//!     lateral_length: 3000.0,
//!     vertical_depth: 3500.0,
//!     gradient: 0.05,
//!     diameter: 0.35,
//!     injection_temperature: 313.15,
//!     rock_conductivity: 3.0,
//! })?;
//! println!("{:?}", states.temperature);
//! # Ok::<(), ags_database::DatabaseError>(())
//! ```

pub mod axes;
pub mod builder;
pub mod catalog;
pub mod channel;
pub mod container;
pub mod database;
pub mod error;
pub mod interp;

pub use axes::{IndependentVariableAxes, PARAMETER_AXES, QueryPoint, TIME_AXIS};
pub use builder::{DenseResults, write_database, write_fixed_params};
pub use catalog::{CatalogLayout, DatabaseCatalog};
pub use channel::CompressedChannel;
pub use container::{Container, ContainerSource, Dataset};
pub use database::{
    Configuration, OutletStates, PerformanceDatabase, PowerChannel, average_power_kw,
};
pub use error::{DatabaseError, DatabaseResult};
