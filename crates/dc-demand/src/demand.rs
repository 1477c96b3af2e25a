//! Generic demand calculation shared by the group and workshop passes.
//!
//! ```text
//! K_V,group = Σ n·P_H·K_V / Σ n·P_H
//! n_e       = (Σ n·P_H)² / Σ n·P_H²
//! k_R       = table(round(n_e), round(K_V,group, 0.1))
//! P_p       = k_R · Σ n·P_H·K_V
//! Q_p       = k_Q · Σ n·P_H·K_V·tgφ
//! S_p       = √(P_p² + Q_p²)
//! I_p       = P_p / U_bus
//! ```

use crate::aggregate::GroupAggregate;
use crate::error::{DemandError, DemandResult};
use dc_core::numeric::{ensure_finite, round_to_decimals};
use dc_core::units::{as_amps, bus_current, constants, kv, kw};
use dc_tables::DemandFactorTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Coefficient applied to the weighted reactive power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactiveDemand {
    /// Reactive demand equals the weighted reactive sum (k_Q = 1.0).
    Unity,
    /// Reactive demand scales with the applied demand factor (k_Q = k_R).
    DemandFactor,
}

/// Parameters distinguishing one demand pass from another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandRules {
    /// Bus voltage used for the group current [kV]
    pub bus_voltage_kv: f64,
    pub reactive: ReactiveDemand,
    /// Round k_R to this many decimals before applying it to power.
    pub factor_decimals: Option<u32>,
}

impl DemandRules {
    /// Equipment-group pass: raw k_R on active power, k_Q = 1.
    pub const fn group() -> Self {
        Self {
            bus_voltage_kv: constants::LV_BUS_KV,
            reactive: ReactiveDemand::Unity,
            factor_decimals: None,
        }
    }

    /// Whole-workshop pass: k_R rounded to 0.1 and applied to both powers.
    pub const fn workshop() -> Self {
        Self {
            bus_voltage_kv: constants::LV_BUS_KV,
            reactive: ReactiveDemand::DemandFactor,
            factor_decimals: Some(1),
        }
    }
}

impl Default for DemandRules {
    fn default() -> Self {
        Self::group()
    }
}

/// Design loads of a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandSummary {
    /// Group utilization factor K_V
    pub utilization: f64,
    /// Effective equipment count n_e (unrounded)
    pub effective_count: f64,
    /// n_e as used for the table row
    pub rounded_effective_count: i64,
    /// K_V as used for the table column
    pub rounded_utilization: f64,
    /// Interpolated table coefficient k_R
    pub demand_factor: f64,
    /// Coefficient actually multiplied into active power
    pub applied_factor: f64,
    /// P_p [kW]
    pub active_power_kw: f64,
    /// Q_p [kvar]
    pub reactive_power_kvar: f64,
    /// S_p [kVA]
    pub apparent_power_kva: f64,
    /// I_p [A]
    pub current_a: f64,
}

/// Run one demand pass over an aggregate with a table and a rule set.
///
/// Fails with [`DemandError::EmptyGroup`] when the aggregate carries no power
/// instead of producing NaN/inf fields.
pub fn compute_demand(
    aggregate: &GroupAggregate,
    table: &DemandFactorTable,
    rules: &DemandRules,
) -> DemandResult<DemandSummary> {
    let total = ensure_finite(aggregate.total_power_kw, "total power")?;
    let weighted = ensure_finite(aggregate.weighted_power_kw, "weighted power")?;
    let reactive = ensure_finite(aggregate.weighted_reactive_kvar, "weighted reactive power")?;
    let squared = ensure_finite(aggregate.squared_power_kw2, "squared power")?;

    if !(rules.bus_voltage_kv.is_finite() && rules.bus_voltage_kv > 0.0) {
        return Err(DemandError::InvalidRules {
            what: "bus voltage must be positive and finite",
        });
    }
    if total <= 0.0 {
        return Err(DemandError::EmptyGroup {
            what: "total power",
        });
    }
    if squared <= 0.0 {
        return Err(DemandError::EmptyGroup {
            what: "squared power",
        });
    }

    let utilization = weighted / total;
    let effective_count = total.powi(2) / squared;

    let rounded_effective_count = effective_count.round() as i64;
    let rounded_utilization = round_to_decimals(utilization, 1);
    let demand_factor = table.lookup(rounded_effective_count, rounded_utilization);

    let applied_factor = match rules.factor_decimals {
        Some(d) => round_to_decimals(demand_factor, d),
        None => demand_factor,
    };
    let reactive_factor = match rules.reactive {
        ReactiveDemand::Unity => 1.0,
        ReactiveDemand::DemandFactor => applied_factor,
    };

    let active_power_kw = applied_factor * weighted;
    let reactive_power_kvar = reactive_factor * reactive;
    let apparent_power_kva = (active_power_kw.powi(2) + reactive_power_kvar.powi(2)).sqrt();
    let current_a = as_amps(bus_current(kw(active_power_kw), kv(rules.bus_voltage_kv)));

    debug!(
        utilization,
        effective_count,
        rounded_effective_count,
        rounded_utilization,
        demand_factor,
        active_power_kw,
        reactive_power_kvar,
        "computed demand"
    );

    Ok(DemandSummary {
        utilization,
        effective_count,
        rounded_effective_count,
        rounded_utilization,
        demand_factor,
        applied_factor,
        active_power_kw,
        reactive_power_kvar,
        apparent_power_kva,
        current_a,
    })
}

/// Group pass: [`compute_demand`] with [`DemandRules::group`].
pub fn compute_group(
    aggregate: &GroupAggregate,
    table: &DemandFactorTable,
) -> DemandResult<DemandSummary> {
    compute_demand(aggregate, table, &DemandRules::group())
}
