//! Built-in equipment registry of the reference mechanical workshop.

use crate::migrate::LATEST_VERSION;
use crate::schema::{EquipmentDef, Project};

#[allow(clippy::too_many_arguments)]
fn def(
    name: &str,
    efficiency: f64,
    cos_phi: f64,
    voltage_kv: f64,
    quantity: f64,
    rated_power_kw: f64,
    utilization: f64,
    tan_phi: f64,
) -> EquipmentDef {
    EquipmentDef {
        name: name.to_string(),
        efficiency,
        cos_phi,
        voltage_kv,
        quantity,
        rated_power_kw,
        utilization,
        tan_phi,
        include_in_group: true,
    }
}

/// Ten device classes; the welding transformers and drying cabinets are kept
/// out of the group sums.
pub fn default_equipment() -> Vec<EquipmentDef> {
    let mut welding = def("Welding transformer", 0.92, 0.9, 0.38, 2.0, 100.0, 0.2, 3.00);
    welding.include_in_group = false;
    let mut drying = def("Drying cabinet", 1.0, 1.0, 0.38, 2.0, 120.0, 0.8, 0.0);
    drying.include_in_group = false;

    vec![
        def("Grinding machine", 0.92, 0.9, 0.38, 4.0, 20.0, 0.15, 1.33),
        def("Drilling machine", 0.92, 0.9, 0.38, 2.0, 14.0, 0.12, 1.00),
        def("Shaping machine", 0.92, 0.9, 0.38, 4.0, 42.0, 0.15, 1.33),
        def("Circular saw", 0.92, 0.9, 0.38, 1.0, 36.0, 0.3, 1.52),
        def("Press", 0.92, 0.9, 0.38, 1.0, 20.0, 0.5, 0.75),
        def("Polishing machine", 0.92, 0.9, 0.38, 1.0, 40.0, 0.2, 1.00),
        def("Milling machine", 0.92, 0.9, 0.38, 2.0, 32.0, 0.2, 1.00),
        def("Fan", 0.92, 0.9, 0.38, 1.0, 20.0, 0.65, 0.75),
        welding,
        drying,
    ]
}

impl Project {
    /// Project holding the built-in registry and the reference workshop totals.
    pub fn default_registry() -> Self {
        Project {
            version: LATEST_VERSION,
            name: "Mechanical workshop".to_string(),
            equipment: default_equipment(),
            excluded_names: Vec::new(),
            workshop: None,
        }
    }
}
