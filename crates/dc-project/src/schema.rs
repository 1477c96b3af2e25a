//! Project schema definitions.

use dc_demand::{Equipment, GroupAggregate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub equipment: Vec<EquipmentDef>,
    /// Version 0 files excluded devices from the group sums by name. Folded
    /// into `include_in_group` by migration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_names: Vec<String>,
    /// Facility totals for the workshop pass; reference totals when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop: Option<WorkshopTotalsDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquipmentDef {
    pub name: String,
    pub efficiency: f64,
    pub cos_phi: f64,
    pub voltage_kv: f64,
    pub quantity: f64,
    pub rated_power_kw: f64,
    pub utilization: f64,
    pub tan_phi: f64,
    #[serde(default = "default_include_in_group")]
    pub include_in_group: bool,
}

fn default_include_in_group() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorkshopTotalsDef {
    pub total_power_kw: f64,
    pub weighted_power_kw: f64,
    pub weighted_reactive_kvar: f64,
    pub squared_power_kw2: f64,
}

impl From<&EquipmentDef> for Equipment {
    fn from(def: &EquipmentDef) -> Self {
        Equipment {
            name: def.name.clone(),
            efficiency: def.efficiency,
            cos_phi: def.cos_phi,
            voltage_kv: def.voltage_kv,
            quantity: def.quantity,
            rated_power_kw: def.rated_power_kw,
            utilization: def.utilization,
            tan_phi: def.tan_phi,
            include_in_group: def.include_in_group,
        }
    }
}

impl From<WorkshopTotalsDef> for GroupAggregate {
    fn from(def: WorkshopTotalsDef) -> Self {
        GroupAggregate::new(
            def.total_power_kw,
            def.weighted_power_kw,
            def.weighted_reactive_kvar,
            def.squared_power_kw2,
        )
    }
}

impl Project {
    /// Immutable equipment snapshot for one calculation pass.
    pub fn equipment_snapshot(&self) -> Vec<Equipment> {
        self.equipment.iter().map(Equipment::from).collect()
    }

    /// Workshop totals, falling back to the reference workshop.
    pub fn workshop_totals(&self) -> GroupAggregate {
        self.workshop
            .map(GroupAggregate::from)
            .unwrap_or_else(GroupAggregate::workshop_totals)
    }

    pub fn equipment_def(&self, name: &str) -> Option<&EquipmentDef> {
        self.equipment.iter().find(|e| e.name == name)
    }
}
