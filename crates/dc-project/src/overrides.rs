//! Per-field equipment overrides (`name.field=value`).
//!
//! All user-supplied edits go through [`apply_overrides`], which decides in
//! one place what a malformed value means: under [`OverridePolicy::Reject`]
//! it is an error, under [`OverridePolicy::KeepPrevious`] the prior value is
//! kept and the override is reported back as skipped. Unknown equipment or
//! field names are errors under both policies. Range checks are left to
//! [`crate::validate_project`], which runs after the overrides.

use crate::schema::EquipmentDef;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OverrideError {
    #[error("Malformed override '{input}' (expected <equipment>.<field>=<value>)")]
    Syntax { input: String },

    #[error("Unknown equipment field: {field}")]
    UnknownField { field: String },

    #[error("Unknown equipment: {name}")]
    UnknownEquipment { name: String },

    #[error("Malformed value for {equipment}.{field}: '{value}'")]
    MalformedValue {
        equipment: String,
        field: EquipmentField,
        value: String,
    },
}

/// What to do with a value that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverridePolicy {
    #[default]
    Reject,
    KeepPrevious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentField {
    Efficiency,
    CosPhi,
    VoltageKv,
    Quantity,
    RatedPowerKw,
    Utilization,
    TanPhi,
    IncludeInGroup,
}

impl EquipmentField {
    pub const ALL: [EquipmentField; 8] = [
        EquipmentField::Efficiency,
        EquipmentField::CosPhi,
        EquipmentField::VoltageKv,
        EquipmentField::Quantity,
        EquipmentField::RatedPowerKw,
        EquipmentField::Utilization,
        EquipmentField::TanPhi,
        EquipmentField::IncludeInGroup,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EquipmentField::Efficiency => "efficiency",
            EquipmentField::CosPhi => "cos_phi",
            EquipmentField::VoltageKv => "voltage_kv",
            EquipmentField::Quantity => "quantity",
            EquipmentField::RatedPowerKw => "rated_power_kw",
            EquipmentField::Utilization => "utilization",
            EquipmentField::TanPhi => "tan_phi",
            EquipmentField::IncludeInGroup => "include_in_group",
        }
    }
}

impl fmt::Display for EquipmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EquipmentField {
    type Err = OverrideError;

    /// Accepts the schema keys and the short symbols (`eta`, `cosphi`, `uh`,
    /// `n`, `ph`, `kv`, `tgphi`, `include`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim().to_ascii_lowercase().as_str() {
            "efficiency" | "eta" => EquipmentField::Efficiency,
            "cos_phi" | "cosphi" => EquipmentField::CosPhi,
            "voltage_kv" | "uh" => EquipmentField::VoltageKv,
            "quantity" | "n" => EquipmentField::Quantity,
            "rated_power_kw" | "ph" => EquipmentField::RatedPowerKw,
            "utilization" | "kv" => EquipmentField::Utilization,
            "tan_phi" | "tgphi" => EquipmentField::TanPhi,
            "include_in_group" | "include" => EquipmentField::IncludeInGroup,
            _ => {
                return Err(OverrideError::UnknownField {
                    field: s.to_string(),
                });
            }
        };
        Ok(field)
    }
}

/// One requested edit, value still unparsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOverride {
    pub equipment: String,
    pub field: EquipmentField,
    pub raw_value: String,
}

impl FromStr for FieldOverride {
    type Err = OverrideError;

    /// Equipment names may contain dots; the last dot before `=` separates
    /// the field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || OverrideError::Syntax {
            input: s.to_string(),
        };
        let (target, value) = s.split_once('=').ok_or_else(syntax)?;
        let (equipment, field) = target.rsplit_once('.').ok_or_else(syntax)?;
        if equipment.trim().is_empty() {
            return Err(syntax());
        }
        Ok(FieldOverride {
            equipment: equipment.trim().to_string(),
            field: field.parse()?,
            raw_value: value.trim().to_string(),
        })
    }
}

/// An override dropped under [`OverridePolicy::KeepPrevious`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedOverride {
    pub request: FieldOverride,
    pub reason: String,
}

enum ParsedValue {
    Number(f64),
    Flag(bool),
}

fn parse_value(field: EquipmentField, raw: &str) -> Option<ParsedValue> {
    match field {
        EquipmentField::IncludeInGroup => match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(ParsedValue::Flag(true)),
            "false" | "no" | "0" => Some(ParsedValue::Flag(false)),
            _ => None,
        },
        _ => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(ParsedValue::Number),
    }
}

fn assign(eq: &mut EquipmentDef, field: EquipmentField, value: ParsedValue) {
    match (field, value) {
        (EquipmentField::IncludeInGroup, ParsedValue::Flag(b)) => eq.include_in_group = b,
        (EquipmentField::Efficiency, ParsedValue::Number(v)) => eq.efficiency = v,
        (EquipmentField::CosPhi, ParsedValue::Number(v)) => eq.cos_phi = v,
        (EquipmentField::VoltageKv, ParsedValue::Number(v)) => eq.voltage_kv = v,
        (EquipmentField::Quantity, ParsedValue::Number(v)) => eq.quantity = v,
        (EquipmentField::RatedPowerKw, ParsedValue::Number(v)) => eq.rated_power_kw = v,
        (EquipmentField::Utilization, ParsedValue::Number(v)) => eq.utilization = v,
        (EquipmentField::TanPhi, ParsedValue::Number(v)) => eq.tan_phi = v,
        // parse_value only yields flags for IncludeInGroup and numbers otherwise
        _ => {}
    }
}

/// Apply overrides in order to an owned equipment list.
///
/// Returns the overrides skipped under [`OverridePolicy::KeepPrevious`].
pub fn apply_overrides(
    equipment: &mut [EquipmentDef],
    overrides: &[FieldOverride],
    policy: OverridePolicy,
) -> Result<Vec<SkippedOverride>, OverrideError> {
    let mut skipped = Vec::new();

    for request in overrides {
        let eq = equipment
            .iter_mut()
            .find(|e| e.name == request.equipment)
            .ok_or_else(|| OverrideError::UnknownEquipment {
                name: request.equipment.clone(),
            })?;

        match parse_value(request.field, &request.raw_value) {
            Some(value) => assign(eq, request.field, value),
            None => match policy {
                OverridePolicy::Reject => {
                    return Err(OverrideError::MalformedValue {
                        equipment: request.equipment.clone(),
                        field: request.field,
                        value: request.raw_value.clone(),
                    });
                }
                OverridePolicy::KeepPrevious => {
                    warn!(
                        equipment = %request.equipment,
                        field = %request.field,
                        value = %request.raw_value,
                        "malformed override, keeping previous value"
                    );
                    skipped.push(SkippedOverride {
                        request: request.clone(),
                        reason: format!("'{}' is not a valid {}", request.raw_value, request.field),
                    });
                }
            },
        }
    }

    Ok(skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Project;

    fn registry() -> Vec<EquipmentDef> {
        Project::default_registry().equipment
    }

    #[test]
    fn parses_override_syntax() {
        let o: FieldOverride = "Press.n=3".parse().unwrap();
        assert_eq!(o.equipment, "Press");
        assert_eq!(o.field, EquipmentField::Quantity);
        assert_eq!(o.raw_value, "3");
    }

    #[test]
    fn names_may_contain_dots() {
        let o: FieldOverride = "Saw No. 2.kv=0.3".parse().unwrap();
        assert_eq!(o.equipment, "Saw No. 2");
        assert_eq!(o.field, EquipmentField::Utilization);
    }

    #[test]
    fn rejects_bad_syntax() {
        assert!(matches!(
            "Press=3".parse::<FieldOverride>(),
            Err(OverrideError::Syntax { .. })
        ));
        assert!(matches!(
            "Press.n".parse::<FieldOverride>(),
            Err(OverrideError::Syntax { .. })
        ));
        assert!(matches!(
            "Press.colour=red".parse::<FieldOverride>(),
            Err(OverrideError::UnknownField { .. })
        ));
    }

    #[test]
    fn field_keys_round_trip() {
        for field in EquipmentField::ALL {
            assert_eq!(field.key().parse::<EquipmentField>().unwrap(), field);
        }
    }

    #[test]
    fn applies_numeric_and_flag_overrides() {
        let mut eqs = registry();
        let overrides: Vec<FieldOverride> = vec![
            "Press.quantity=3".parse().unwrap(),
            "Welding transformer.include=yes".parse().unwrap(),
        ];
        let skipped = apply_overrides(&mut eqs, &overrides, OverridePolicy::Reject).unwrap();
        assert!(skipped.is_empty());
        assert_eq!(eqs[4].quantity, 3.0);
        assert!(eqs[8].include_in_group);
    }

    #[test]
    fn reject_policy_fails_on_malformed_value() {
        let mut eqs = registry();
        let overrides: Vec<FieldOverride> = vec!["Press.ph=abc".parse().unwrap()];
        let err = apply_overrides(&mut eqs, &overrides, OverridePolicy::Reject).unwrap_err();
        assert!(matches!(err, OverrideError::MalformedValue { .. }));
    }

    #[test]
    fn keep_previous_policy_retains_value() {
        let mut eqs = registry();
        let before = eqs[4].rated_power_kw;
        let overrides: Vec<FieldOverride> = vec![
            "Press.ph=abc".parse().unwrap(),
            "Press.tgphi=NaN".parse().unwrap(),
            "Press.kv=0.6".parse().unwrap(),
        ];
        let skipped = apply_overrides(&mut eqs, &overrides, OverridePolicy::KeepPrevious).unwrap();
        assert_eq!(skipped.len(), 2);
        assert_eq!(eqs[4].rated_power_kw, before);
        assert_eq!(eqs[4].tan_phi, 0.75);
        assert_eq!(eqs[4].utilization, 0.6);
    }

    #[test]
    fn unknown_equipment_is_always_an_error() {
        let mut eqs = registry();
        let overrides: Vec<FieldOverride> = vec!["Kiln.n=1".parse().unwrap()];
        for policy in [OverridePolicy::Reject, OverridePolicy::KeepPrevious] {
            assert!(matches!(
                apply_overrides(&mut eqs, &overrides, policy),
                Err(OverrideError::UnknownEquipment { .. })
            ));
        }
    }
}
