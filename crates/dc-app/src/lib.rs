//! Shared application service layer for demandcalc.
//!
//! Frontends go through this crate for project management, calculation
//! runs, and report persistence instead of wiring the backend crates
//! together themselves.

pub mod calc_service;
pub mod error;
pub mod project_service;
pub mod report_service;

// Re-export key types for convenience
pub use calc_service::{
    CalcRequest, CalcResponse, lookup_coefficient, run_calculation, run_workshop,
};
pub use error::{AppError, AppResult};
pub use project_service::{
    EquipmentSummary, ProjectFormat, init_project, list_equipment, load_project, save_project,
    validate_project,
};
pub use report_service::{
    ReportFile, ReportManifest, equipment_csv, load_report, save_report, write_equipment_csv,
};
