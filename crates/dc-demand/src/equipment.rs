//! Equipment records: one physical class of electrical device in a group.

use serde::{Deserialize, Serialize};

/// Ratings of one class of devices.
///
/// `quantity` is carried as a real number so that any input can be
/// represented; validation upstream only admits positive integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique within a registry
    pub name: String,
    /// Efficiency η, `0 < η <= 1`
    pub efficiency: f64,
    /// Power factor cosφ, `0 < cosφ <= 1`
    pub cos_phi: f64,
    /// Rated line voltage U_H [kV]
    pub voltage_kv: f64,
    /// Number of units n
    pub quantity: f64,
    /// Rated power per unit P_H [kW]
    pub rated_power_kw: f64,
    /// Utilization factor K_V, `0 <= K_V <= 1`
    pub utilization: f64,
    /// Reactive power ratio tgφ, `>= 0`
    pub tan_phi: f64,
    /// Whether the device contributes to the group sums. Heavy or
    /// non-representative loads (welding transformers, drying cabinets) are
    /// usually left out.
    #[serde(default = "default_include")]
    pub include_in_group: bool,
}

fn default_include() -> bool {
    true
}

impl Equipment {
    /// Connected power of all units, `n · P_H` [kW].
    pub fn total_power_kw(&self) -> f64 {
        self.quantity * self.rated_power_kw
    }

    /// Same record, left out of the group sums.
    pub fn excluded(mut self) -> Self {
        self.include_in_group = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grinder() -> Equipment {
        Equipment {
            name: "grinder".to_string(),
            efficiency: 0.92,
            cos_phi: 0.9,
            voltage_kv: 0.38,
            quantity: 4.0,
            rated_power_kw: 20.0,
            utilization: 0.15,
            tan_phi: 1.33,
            include_in_group: true,
        }
    }

    #[test]
    fn total_power() {
        assert_eq!(grinder().total_power_kw(), 80.0);
    }

    #[test]
    fn excluded_clears_flag() {
        assert!(!grinder().excluded().include_in_group);
    }

    #[test]
    fn include_flag_defaults_to_true() {
        let json = r#"{"name":"fan","efficiency":0.92,"cos_phi":0.9,"voltage_kv":0.38,
            "quantity":1,"rated_power_kw":20,"utilization":0.65,"tan_phi":0.75}"#;
        let eq: Equipment = serde_json::from_str(json).unwrap();
        assert!(eq.include_in_group);
    }
}
