//! Report persistence: calculation results with a small manifest, plus a
//! per-equipment CSV export.

use std::io::Write;
use std::path::Path;

use dc_demand::CalculationReport;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportManifest {
    pub project_name: String,
    /// RFC 3339, UTC
    pub generated_at: String,
    pub tool_version: String,
}

impl ReportManifest {
    pub fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// On-disk report layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFile {
    pub manifest: ReportManifest,
    pub report: CalculationReport,
}

/// Write `report` as pretty JSON and return the manifest stored with it.
pub fn save_report(
    path: &Path,
    project_name: &str,
    report: &CalculationReport,
) -> AppResult<ReportManifest> {
    let file = ReportFile {
        manifest: ReportManifest::new(project_name),
        report: report.clone(),
    };

    let content = serde_json::to_string_pretty(&file)
        .map_err(|e| AppError::Report(format!("Failed to serialize report: {}", e)))?;
    std::fs::write(path, content)?;

    info!(path = %path.display(), project = project_name, "report saved");
    Ok(file.manifest)
}

pub fn load_report(path: &Path) -> AppResult<ReportFile> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::Report(format!("Failed to parse report: {}", e)))
}

const CSV_HEADER: [&str; 7] = [
    "name",
    "total_power_kw",
    "weighted_power_kw",
    "weighted_reactive_kvar",
    "squared_power_kw2",
    "current_a",
    "included",
];

/// Per-equipment results as CSV, one row per record in registry order.
pub fn write_equipment_csv(report: &CalculationReport, writer: impl Write) -> AppResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for r in &report.results {
        wtr.serialize(r)?;
    }

    wtr.flush()?;
    Ok(())
}

/// [`write_equipment_csv`] into a `String`.
pub fn equipment_csv(report: &CalculationReport) -> AppResult<String> {
    let mut buf = Vec::new();
    write_equipment_csv(report, &mut buf)?;
    String::from_utf8(buf).map_err(|e| AppError::Report(format!("CSV is not UTF-8: {}", e)))
}
