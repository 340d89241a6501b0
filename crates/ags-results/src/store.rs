//! On-disk run cache.
//!
//! Each run lives in its own directory under the store root:
//!
//! ```text
//! <run_id>/manifest.json     RunManifest, pretty-printed
//! <run_id>/timeseries.jsonl  one TimeseriesRecord per line
//! ```
//!
//! Both files are written under a temporary name and renamed into place,
//! time series first. A run counts as stored once its manifest exists.

use crate::types::{RunManifest, TimeseriesRecord};
use crate::{ResultsError, ResultsResult};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const TIMESERIES_FILE: &str = "timeseries.jsonl";

/// Directory of cached runs keyed by run id.
#[derive(Debug, Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(&root_dir)?;
        Ok(Self { root_dir })
    }

    /// Store beside a case file, under `.agsflow/runs`.
    pub fn for_case(case_path: &Path) -> ResultsResult<Self> {
        let case_dir = case_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: format!("case path {} has no parent directory", case_path.display()),
            })?;
        Self::new(case_dir.join(".agsflow").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn file(&self, run_id: &str, name: &str) -> PathBuf {
        self.root_dir.join(run_id).join(name)
    }

    fn open(&self, run_id: &str, name: &str) -> ResultsResult<BufReader<File>> {
        match File::open(self.file(run_id, name)) {
            Ok(file) => Ok(BufReader::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.file(run_id, MANIFEST_FILE).is_file()
    }

    pub fn save_run(
        &self,
        manifest: &RunManifest,
        records: &[TimeseriesRecord],
    ) -> ResultsResult<()> {
        fs::create_dir_all(self.root_dir.join(&manifest.run_id))?;

        write_replacing(&self.file(&manifest.run_id, TIMESERIES_FILE), |out| {
            for record in records {
                serde_json::to_writer(&mut *out, record)?;
                out.write_all(b"\n")?;
            }
            Ok(())
        })?;
        write_replacing(&self.file(&manifest.run_id, MANIFEST_FILE), |out| {
            serde_json::to_writer_pretty(out, manifest)?;
            Ok(())
        })?;

        tracing::debug!(run_id = %manifest.run_id, records = records.len(), "run saved");
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let reader = self.open(run_id, MANIFEST_FILE)?;
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load_timeseries(&self, run_id: &str) -> ResultsResult<Vec<TimeseriesRecord>> {
        let mut records = Vec::new();
        for line in self.open(run_id, TIMESERIES_FILE)?.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                records.push(serde_json::from_str(&line)?);
            }
        }
        Ok(records)
    }

    /// Manifests of the stored runs of `case_name`, newest first.
    ///
    /// Directories without a readable manifest are skipped.
    pub fn list_runs(&self, case_name: &str) -> ResultsResult<Vec<RunManifest>> {
        let entries = match fs::read_dir(&self.root_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut runs = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().into_owned();
            match self.load_manifest(&run_id) {
                Ok(manifest) if manifest.case_name == case_name => runs.push(manifest),
                Ok(_) => {}
                Err(e) => tracing::debug!(%run_id, error = %e, "skipping unreadable run"),
            }
        }
        // RFC 3339 UTC timestamps order lexically.
        runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        match fs::remove_dir_all(self.root_dir.join(run_id)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Write `path` through a sibling `.tmp` file renamed over it on success.
fn write_replacing(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> ResultsResult<()>,
) -> ResultsResult<()> {
    let tmp = path.with_extension("tmp");
    let mut out = BufWriter::new(File::create(&tmp)?);
    write(&mut out)?;
    out.into_inner().map_err(|e| e.into_error())?.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
