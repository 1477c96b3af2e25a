// dc-core/src/units.rs

use uom::si::f64::{
    ElectricCurrent as UomElectricCurrent, ElectricPotential as UomElectricPotential,
    Power as UomPower,
};

// Public canonical unit types (SI, f64)
pub type Current = UomElectricCurrent;
pub type Voltage = UomElectricPotential;
pub type Power = UomPower;

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn kv(v: f64) -> Voltage {
    use uom::si::electric_potential::kilovolt;
    Voltage::new::<kilovolt>(v)
}

#[inline]
pub fn as_amps(i: Current) -> f64 {
    use uom::si::electric_current::ampere;
    i.get::<ampere>()
}

/// Three-phase line current of a consumer:
///
/// ```text
/// I = P / (√3 · U · cosφ · η)
/// ```
pub fn three_phase_current(power: Power, voltage: Voltage, cos_phi: f64, eta: f64) -> Current {
    power / (voltage * (3f64.sqrt() * cos_phi * eta))
}

/// Bus current used for group demand, `I = P / U`.
pub fn bus_current(power: Power, voltage: Voltage) -> Current {
    power / voltage
}

pub mod constants {
    /// Rated line voltage of the low-voltage distribution bus.
    pub const LV_BUS_KV: f64 = 0.38;
}
