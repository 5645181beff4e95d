use std::fs;
use std::path::{Path, PathBuf};

use psha_core::errors::{ErrorInfo, PshaError, Stage};
use serde::Serialize;
use tracing::debug;

use crate::pipeline::{HazardInputs, HazardRun};
use crate::report::HazardReport;
use crate::serde::to_canonical_json_bytes;
use crate::table::RuptureTable;

fn export_error(code: &str, path: &Path, err: impl ToString) -> PshaError {
    PshaError::Serde(
        ErrorInfo::new(code, err.to_string())
            .at(Stage::Export)
            .with_context("path", path.display()),
    )
}

/// Files written by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Rupture table as CSV.
    pub ruptures_csv: PathBuf,
    /// Rupture table as canonical JSON.
    pub ruptures_json: PathBuf,
    /// Hazard curve as canonical JSON.
    pub curve_json: PathBuf,
    /// Report with provenance as canonical JSON.
    pub report_json: PathBuf,
}

impl ArtifactPaths {
    /// Standard artifact names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            ruptures_csv: dir.join("ruptures.csv"),
            ruptures_json: dir.join("ruptures.json"),
            curve_json: dir.join("hazard_curve.json"),
            report_json: dir.join("hazard_report.json"),
        }
    }
}

/// Writes the rupture table as CSV with a header row.
pub fn write_rupture_csv(table: &RuptureTable, path: &Path) -> Result<(), PshaError> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|err| export_error("csv_open", path, err))?;
    for row in &table.rows {
        writer
            .serialize(row)
            .map_err(|err| export_error("csv_row", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| export_error("csv_flush", path, err))
}

/// Writes `value` as canonical JSON.
pub fn write_canonical_json<T: Serialize>(value: &T, path: &Path) -> Result<(), PshaError> {
    let bytes = to_canonical_json_bytes(value)?;
    fs::write(path, bytes).map_err(|err| export_error("json_write", path, err))
}

/// Writes the rupture table, hazard curve and report into `dir`.
pub fn write_artifacts(
    dir: &Path,
    inputs: &HazardInputs,
    run: &HazardRun,
) -> Result<(ArtifactPaths, HazardReport), PshaError> {
    fs::create_dir_all(dir).map_err(|err| export_error("out_dir", dir, err))?;
    let paths = ArtifactPaths::in_dir(dir);
    let report = HazardReport::new(inputs, run)?;

    write_rupture_csv(&run.table, &paths.ruptures_csv)?;
    write_canonical_json(&run.table, &paths.ruptures_json)?;
    write_canonical_json(&run.curve, &paths.curve_json)?;
    write_canonical_json(&report, &paths.report_json)?;

    debug!(dir = %dir.display(), rows = run.table.len(), "artifacts written");
    Ok((paths, report))
}
