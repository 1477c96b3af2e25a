//! Complete calculation pass: aggregation, group demand, workshop demand.

use crate::aggregate::{EquipmentResult, GroupAggregate, aggregate};
use crate::demand::{DemandSummary, compute_group};
use crate::equipment::Equipment;
use crate::error::DemandResult;
use crate::workshop::compute_workshop;
use dc_tables::StandardTables;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything a presentation layer needs from one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    /// Input records, echoed in order
    pub equipment: Vec<Equipment>,
    /// One result per record, same order
    pub results: Vec<EquipmentResult>,
    /// Sums that fed the group pass
    pub group_sums: GroupAggregate,
    pub group: DemandSummary,
    pub workshop: DemandSummary,
}

impl CalculationReport {
    /// Result for the named equipment.
    pub fn result(&self, name: &str) -> Option<&EquipmentResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

/// Run the full pass over an equipment snapshot.
pub fn calculate(
    equipment: &[Equipment],
    workshop_totals: &GroupAggregate,
    tables: &StandardTables,
) -> DemandResult<CalculationReport> {
    let aggregation = aggregate(equipment);
    let group = compute_group(&aggregation.sums, &tables.group)?;
    let workshop = compute_workshop(workshop_totals, &tables.workshop)?;

    info!(
        devices = equipment.len(),
        group_active_kw = group.active_power_kw,
        workshop_active_kw = workshop.active_power_kw,
        "calculation complete"
    );

    Ok(CalculationReport {
        equipment: equipment.to_vec(),
        results: aggregation.results,
        group_sums: aggregation.sums,
        group,
        workshop,
    })
}
