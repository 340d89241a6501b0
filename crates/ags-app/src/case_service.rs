//! Case loading, saving and validation.

use crate::case::Case;
use crate::error::{AppError, AppResult};
use crate::validate::{ValidationReport, validate_case as check_case};
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a case from a YAML file, or JSON when the extension is `.json`.
pub fn load_case(path: &Path) -> AppResult<Case> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::CaseFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let case: Case = if is_json(path) {
        serde_json::from_str(&content)
            .map_err(|e| AppError::Case(format!("Failed to parse case JSON: {}", e)))?
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Case(format!("Failed to parse case YAML: {}", e)))?
    };

    tracing::debug!(path = %path.display(), case = %case.name, "case loaded");
    Ok(case)
}

/// Save a case, in JSON when the extension is `.json` and YAML otherwise.
pub fn save_case(path: &Path, case: &Case) -> AppResult<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(case)
            .map_err(|e| AppError::Case(format!("Failed to serialize case: {}", e)))?
    } else {
        serde_yaml::to_string(case)
            .map_err(|e| AppError::Case(format!("Failed to serialize case: {}", e)))?
    };

    std::fs::write(path, content).map_err(|e| AppError::CaseFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Structural checks plus, for cases on the tabulated path, the tabulated
/// input ranges.
pub fn validate_case(case: &Case) -> ValidationReport {
    let mut report = check_case(case);
    let geometry = case.geometry();
    if crate::select_solver(case.initial_temperature(), geometry.lateral_count)
        == crate::SolverKind::Tabulated
    {
        report.merge(crate::verify(
            &geometry,
            case.injection_temperature(),
            case.rock_conductivity(),
        ));
        report.merge(crate::verify_operating_point(
            &geometry,
            case.rock.gradient_k_per_m,
            case.mass_flow(),
        ));
    }
    report
}
