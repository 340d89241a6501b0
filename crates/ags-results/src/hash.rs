//! Content-based hashing for run IDs.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 over the JSON form of the case and the engine version.
///
/// Identical inputs always map to the same id, so a stored run can be
/// reused instead of recomputed.
pub fn compute_run_id<C: Serialize>(case: &C, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    let case_json = serde_json::to_string(case).unwrap_or_default();
    hasher.update(case_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
