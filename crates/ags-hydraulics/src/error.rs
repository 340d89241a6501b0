//! Error types for hydraulic calculations.

use ags_core::CoreError;
use ags_fluids::FluidError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum HydraulicsError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Fluid property error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] CoreError),
}

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;
