//! Error types for the conduction model.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConductionError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type ConductionResult<T> = Result<T, ConductionError>;
