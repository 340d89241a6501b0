//! Error types for the ags-app service layer.

use crate::validate::ValidationReport;
use std::path::PathBuf;

/// Application error type that wraps errors from the engine crates and
/// provides a single error surface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Case error: {0}")]
    Case(String),

    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write case file: {path}")]
    CaseFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case validation failed: {0}")]
    Validation(ValidationReport),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Conduction model error: {0}")]
    Conduction(String),

    #[error("Hydraulics error: {0}")]
    Hydraulics(String),

    #[error("Fluid property error: {0}")]
    Fluid(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported: {message}")]
    Unsupported { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ags-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ags_database::DatabaseError> for AppError {
    fn from(err: ags_database::DatabaseError) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<ags_conduction::ConductionError> for AppError {
    fn from(err: ags_conduction::ConductionError) -> Self {
        AppError::Conduction(err.to_string())
    }
}

impl From<ags_hydraulics::HydraulicsError> for AppError {
    fn from(err: ags_hydraulics::HydraulicsError) -> Self {
        AppError::Hydraulics(err.to_string())
    }
}

impl From<ags_fluids::FluidError> for AppError {
    fn from(err: ags_fluids::FluidError) -> Self {
        AppError::Fluid(err.to_string())
    }
}

impl From<ags_results::ResultsError> for AppError {
    fn from(err: ags_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<ags_core::CoreError> for AppError {
    fn from(err: ags_core::CoreError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
