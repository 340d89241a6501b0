//! ags-conduction: semi-analytical heat conduction around closed-loop laterals.
//!
//! Used where the tabulated database does not apply (very hot rock or
//! multilateral layouts). The produced temperature follows from a
//! point-source solution with image planes, integrated in Laplace space by
//! Chebyshev quadrature and inverted with the Gaver-Stehfest algorithm.

pub mod chebyshev;
pub mod config;
pub mod error;
pub mod images;
pub mod model;
pub mod stehfest;

pub use chebyshev::chebyshev_quadrature;
pub use config::ConductionConfig;
pub use error::{ConductionError, ConductionResult};
pub use images::image_sum;
pub use model::{AnalyticalHeatConductionModel, DomainBoundaries, LateralBranch, RockProperties};
pub use stehfest::{stehfest_invert, stehfest_invert_with, stehfest_weights};
