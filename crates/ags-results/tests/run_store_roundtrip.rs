use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use ags_results::{RunManifest, RunStore, RunSummary, TimeseriesRecord};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn manifest(run_id: &str, case_name: &str) -> RunManifest {
    stamped(run_id, case_name, "2026-02-26T00:00:00Z")
}

fn stamped(run_id: &str, case_name: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        case_name: case_name.to_string(),
        timestamp: timestamp.to_string(),
        solver: "tabulated".to_string(),
        engine_version: "0.1.0".to_string(),
        summary: RunSummary {
            average_thermal_kw: Some(1200.0),
            ..Default::default()
        },
    }
}

#[test]
fn save_list_load_roundtrip() {
    let case_dir = unique_temp_dir("ags_results_case");
    fs::create_dir_all(&case_dir).expect("failed to create temp case dir");
    let case_path = case_dir.join("case.yaml");
    fs::write(&case_path, "name: test\n").expect("failed to write case file");

    let store = RunStore::for_case(&case_path).expect("failed to create run store");
    assert!(store.root_dir().ends_with(".agsflow/runs"));

    let records = vec![
        TimeseriesRecord {
            time_years: 0.0,
            produced_temperature_k: 420.0,
            outlet_pressure_pa: Some(9.5e6),
            pressure_drop_pa: 5.0e5,
            pumping_power_w: 1.2e4,
        },
        TimeseriesRecord {
            time_years: 0.25,
            produced_temperature_k: 420.0,
            outlet_pressure_pa: None,
            pressure_drop_pa: 5.1e5,
            pumping_power_w: 1.3e4,
        },
    ];

    store
        .save_run(&manifest("run-123", "c1"), &records)
        .expect("failed to save run");
    store
        .save_run(&manifest("run-456", "other"), &records[..1])
        .expect("failed to save run");

    let runs = store.list_runs("c1").expect("failed to list runs");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, "run-123");
    assert_eq!(runs[0].summary.average_thermal_kw, Some(1200.0));

    let loaded = store
        .load_timeseries("run-123")
        .expect("failed to load records");
    assert_eq!(loaded, records);

    store.delete_run("run-123").expect("failed to delete run");
    assert!(!store.has_run("run-123"));
    assert!(store.has_run("run-456"));

    let _ = fs::remove_dir_all(&case_dir);
}

#[test]
fn missing_run_is_reported() {
    let store = RunStore::new(unique_temp_dir("ags_results_missing")).unwrap();
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ags_results::ResultsError::RunNotFound { .. })
    ));
    assert!(store.load_timeseries("nope").is_err());
}

#[test]
fn runs_are_listed_newest_first() {
    let store = RunStore::new(unique_temp_dir("ags_results_order")).unwrap();
    store
        .save_run(&stamped("early", "c1", "2026-01-01T00:00:00+00:00"), &[])
        .unwrap();
    store
        .save_run(&stamped("late", "c1", "2026-03-01T00:00:00+00:00"), &[])
        .unwrap();
    store
        .save_run(&stamped("middle", "c1", "2026-02-01T00:00:00+00:00"), &[])
        .unwrap();

    let ids: Vec<String> = store
        .list_runs("c1")
        .unwrap()
        .into_iter()
        .map(|m| m.run_id)
        .collect();
    assert_eq!(ids, ["late", "middle", "early"]);

    let _ = fs::remove_dir_all(store.root_dir());
}

#[test]
fn saved_run_leaves_only_final_files() {
    let store = RunStore::new(unique_temp_dir("ags_results_files")).unwrap();
    store.save_run(&manifest("run-1", "c1"), &[]).unwrap();
    // Saving again replaces the stored files in place.
    store.save_run(&manifest("run-1", "c1"), &[]).unwrap();

    let mut names: Vec<String> = fs::read_dir(store.root_dir().join("run-1"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["manifest.json", "timeseries.jsonl"]);

    let _ = fs::remove_dir_all(store.root_dir());
}

#[test]
fn run_without_manifest_is_not_listed() {
    let store = RunStore::new(unique_temp_dir("ags_results_partial")).unwrap();
    let partial = store.root_dir().join("partial");
    fs::create_dir_all(&partial).unwrap();
    fs::write(partial.join("timeseries.jsonl"), "").unwrap();

    assert!(!store.has_run("partial"));
    assert!(store.list_runs("c1").unwrap().is_empty());

    let _ = fs::remove_dir_all(store.root_dir());
}
