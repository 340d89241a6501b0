//! Error types for performance database operations.

use ags_core::CoreError;
use thiserror::Error;

/// Errors that can occur while loading or querying a performance database.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to load database field '{path}': {reason}")]
    DataLoad { path: String, reason: String },

    #[error("Query value {value} for axis '{axis}' is outside the tabulated range [{min}, {max}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Shape mismatch for {what}: expected {expected:?}, found {found:?}")]
    Shape {
        what: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("Interpolation error: {message}")]
    Interpolation { message: String },

    #[error("Numeric error: {0}")]
    Numeric(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

impl DatabaseError {
    pub(crate) fn load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        DatabaseError::DataLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<ninterp::error::ValidateError> for DatabaseError {
    fn from(e: ninterp::error::ValidateError) -> Self {
        DatabaseError::Interpolation {
            message: e.to_string(),
        }
    }
}

impl From<ninterp::error::InterpolateError> for DatabaseError {
    fn from(e: ninterp::error::InterpolateError) -> Self {
        DatabaseError::Interpolation {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_axis() {
        let err = DatabaseError::OutOfRange {
            axis: "mdot",
            value: 500.0,
            min: 5.0,
            max: 300.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("mdot"));
        assert!(msg.contains("500"));
    }

    #[test]
    fn load_helper_keeps_path() {
        let err = DatabaseError::load("coaxial/H2O/input/mdot", "missing");
        assert!(err.to_string().contains("coaxial/H2O/input/mdot"));
    }
}
