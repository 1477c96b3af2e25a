//! Per-equipment derived quantities and group-wide sums.

use crate::equipment::Equipment;
use dc_core::units::{as_amps, kv, kw, three_phase_current};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Derived quantities of one equipment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentResult {
    pub name: String,
    /// `n · P_H` [kW]
    pub total_power_kw: f64,
    /// `n · P_H · K_V` [kW]
    pub weighted_power_kw: f64,
    /// `n · P_H · K_V · tgφ` [kvar]
    pub weighted_reactive_kvar: f64,
    /// `n · P_H²` [kW²]
    pub squared_power_kw2: f64,
    /// `n · P_H / (√3 · U_H · cosφ · η)` [A]
    pub current_a: f64,
    /// Whether these quantities went into the group sums
    pub included: bool,
}

impl EquipmentResult {
    /// Evaluate the per-device formulas.
    ///
    /// Voltage, power factor and efficiency are not checked here; a zero in
    /// any of them yields a non-finite current. Validated inputs never do.
    pub fn of(eq: &Equipment) -> Self {
        let total_power_kw = eq.total_power_kw();
        let weighted_power_kw = total_power_kw * eq.utilization;
        let current = three_phase_current(
            kw(total_power_kw),
            kv(eq.voltage_kv),
            eq.cos_phi,
            eq.efficiency,
        );

        Self {
            name: eq.name.clone(),
            total_power_kw,
            weighted_power_kw,
            weighted_reactive_kvar: weighted_power_kw * eq.tan_phi,
            squared_power_kw2: eq.quantity * eq.rated_power_kw.powi(2),
            current_a: as_amps(current),
            included: eq.include_in_group,
        }
    }
}

/// Sums over the included equipment of a group (or fixed facility totals).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupAggregate {
    /// Σ n · P_H [kW]
    pub total_power_kw: f64,
    /// Σ n · P_H · K_V [kW]
    pub weighted_power_kw: f64,
    /// Σ n · P_H · K_V · tgφ [kvar]
    pub weighted_reactive_kvar: f64,
    /// Σ n · P_H² [kW²]
    pub squared_power_kw2: f64,
}

impl GroupAggregate {
    pub fn new(
        total_power_kw: f64,
        weighted_power_kw: f64,
        weighted_reactive_kvar: f64,
        squared_power_kw2: f64,
    ) -> Self {
        Self {
            total_power_kw,
            weighted_power_kw,
            weighted_reactive_kvar,
            squared_power_kw2,
        }
    }

    /// Totals of the whole reference workshop, used by the workshop pass.
    pub const fn workshop_totals() -> Self {
        Self {
            total_power_kw: 2330.0,
            weighted_power_kw: 752.0,
            weighted_reactive_kvar: 657.0,
            squared_power_kw2: 96399.0,
        }
    }

    fn add(&mut self, r: &EquipmentResult) {
        self.total_power_kw += r.total_power_kw;
        self.weighted_power_kw += r.weighted_power_kw;
        self.weighted_reactive_kvar += r.weighted_reactive_kvar;
        self.squared_power_kw2 += r.squared_power_kw2;
    }
}

/// Output of [`aggregate`]: one result per input record, in input order,
/// plus the group sums.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub results: Vec<EquipmentResult>,
    pub sums: GroupAggregate,
}

impl Aggregation {
    /// Result for the named equipment.
    pub fn result(&self, name: &str) -> Option<&EquipmentResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

/// Reduce an equipment list into per-device results and group sums.
///
/// Every record produces a result; only records with `include_in_group`
/// contribute to the sums.
pub fn aggregate(equipment: &[Equipment]) -> Aggregation {
    let mut sums = GroupAggregate::default();
    let results: Vec<EquipmentResult> = equipment
        .iter()
        .map(|eq| {
            let r = EquipmentResult::of(eq);
            if r.included {
                sums.add(&r);
            }
            r
        })
        .collect();

    debug!(
        devices = results.len(),
        included = results.iter().filter(|r| r.included).count(),
        total_power_kw = sums.total_power_kw,
        weighted_power_kw = sums.weighted_power_kw,
        "aggregated equipment"
    );

    Aggregation { results, sums }
}
