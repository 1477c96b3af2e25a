//! Calculation runs over a project snapshot.

use dc_core::numeric::ensure_finite;
use dc_demand::{CalculationReport, DemandSummary, GroupAggregate, calculate, compute_workshop};
use dc_project::schema::Project;
use dc_project::{FieldOverride, OverridePolicy, SkippedOverride, apply_overrides};
use dc_tables::{StandardTables, TableKind};
use tracing::{info, warn};

use crate::error::AppResult;

/// Overrides to apply before a run, and how malformed values are handled.
#[derive(Debug, Clone, Default)]
pub struct CalcRequest {
    pub overrides: Vec<FieldOverride>,
    pub policy: OverridePolicy,
}

impl CalcRequest {
    pub fn new(overrides: Vec<FieldOverride>, policy: OverridePolicy) -> Self {
        Self { overrides, policy }
    }
}

#[derive(Debug, Clone)]
pub struct CalcResponse {
    /// Project as calculated, overrides applied
    pub project: Project,
    pub report: CalculationReport,
    /// Overrides dropped under [`OverridePolicy::KeepPrevious`]
    pub skipped: Vec<SkippedOverride>,
}

/// Apply the requested overrides to a copy of `project` and run the full
/// group and workshop pass over it. The caller's project is left unchanged.
pub fn run_calculation(project: &Project, request: &CalcRequest) -> AppResult<CalcResponse> {
    let mut effective = project.clone();
    let skipped = apply_overrides(&mut effective.equipment, &request.overrides, request.policy)?;
    if !skipped.is_empty() {
        warn!(count = skipped.len(), "some overrides were skipped");
    }
    dc_project::validate_project(&effective)?;

    let snapshot = effective.equipment_snapshot();
    let tables = StandardTables::new();
    let report = calculate(&snapshot, &effective.workshop_totals(), &tables)?;

    info!(
        project = %effective.name,
        overrides = request.overrides.len(),
        skipped = skipped.len(),
        "calculation run finished"
    );

    Ok(CalcResponse {
        project: effective,
        report,
        skipped,
    })
}

/// Workshop pass alone, over the project's totals or the reference totals.
pub fn run_workshop(project: Option<&Project>) -> AppResult<DemandSummary> {
    let totals = project
        .map(Project::workshop_totals)
        .unwrap_or_else(GroupAggregate::workshop_totals);
    let tables = StandardTables::new();
    Ok(compute_workshop(&totals, &tables.workshop)?)
}

/// Read k_R from one of the standard tables.
pub fn lookup_coefficient(kind: TableKind, effective_count: i64, utilization: f64) -> AppResult<f64> {
    let utilization = ensure_finite(utilization, "utilization")?;
    let tables = StandardTables::new();
    Ok(tables.get(kind).lookup(effective_count, utilization))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn default_registry_matches_reference_group() {
        let response = run_calculation(&Project::default_registry(), &CalcRequest::default()).unwrap();
        let group = &response.report.group;
        assert_eq!(group.rounded_effective_count, 14);
        assert_eq!(group.rounded_utilization, 0.2);
        assert_eq!(group.demand_factor, 1.27);
        assert!(response.skipped.is_empty());
    }

    #[test]
    fn caller_project_is_not_mutated() {
        let project = Project::default_registry();
        let request = CalcRequest::new(
            vec!["Press.quantity=5".parse().unwrap()],
            OverridePolicy::Reject,
        );
        let response = run_calculation(&project, &request).unwrap();
        assert_eq!(project.equipment_def("Press").unwrap().quantity, 1.0);
        assert_eq!(response.project.equipment_def("Press").unwrap().quantity, 5.0);
    }

    #[test]
    fn out_of_range_override_fails_validation() {
        let request = CalcRequest::new(
            vec!["Press.utilization=1.5".parse().unwrap()],
            OverridePolicy::Reject,
        );
        let err = run_calculation(&Project::default_registry(), &request).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn lookup_rejects_nan() {
        assert!(matches!(
            lookup_coefficient(TableKind::Group, 4, f64::NAN),
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(lookup_coefficient(TableKind::Group, 4, 0.4).unwrap(), 1.25);
    }
}
