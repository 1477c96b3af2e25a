//! Project validation logic.

use crate::schema::{EquipmentDef, Project, WorkshopTotalsDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate equipment name: {name}")]
    DuplicateName { name: String },

    #[error("Missing value: {field}")]
    Missing { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Legacy field '{field}' requires version 0 (found version {version})")]
    LegacyField { field: String, version: u32 },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if project.name.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "project name".to_string(),
        });
    }

    if !project.excluded_names.is_empty() && project.version > 0 {
        return Err(ValidationError::LegacyField {
            field: "excluded_names".to_string(),
            version: project.version,
        });
    }

    let mut names = HashSet::new();
    for eq in &project.equipment {
        if eq.name.trim().is_empty() {
            return Err(ValidationError::Missing {
                field: "equipment name".to_string(),
            });
        }
        if !names.insert(eq.name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: eq.name.clone(),
            });
        }
        validate_equipment(eq)?;
    }

    if let Some(totals) = &project.workshop {
        validate_workshop(totals)?;
    }

    Ok(())
}

fn invalid(field: String, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check(
    owner: &str,
    field: &str,
    value: f64,
    ok: impl Fn(f64) -> bool,
    reason: &str,
) -> Result<(), ValidationError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(invalid(format!("{owner} {field}"), value, reason))
    }
}

fn validate_equipment(eq: &EquipmentDef) -> Result<(), ValidationError> {
    let owner = format!("equipment '{}'", eq.name);

    check(&owner, "efficiency", eq.efficiency, |v| v > 0.0 && v <= 1.0, "must be in (0, 1]")?;
    check(&owner, "cos_phi", eq.cos_phi, |v| v > 0.0 && v <= 1.0, "must be in (0, 1]")?;
    check(&owner, "voltage_kv", eq.voltage_kv, |v| v > 0.0, "must be positive and finite")?;
    check(
        &owner,
        "quantity",
        eq.quantity,
        |v| v >= 1.0 && v.fract() == 0.0,
        "must be a positive integer",
    )?;
    check(&owner, "rated_power_kw", eq.rated_power_kw, |v| v >= 0.0, "must be non-negative")?;
    check(&owner, "utilization", eq.utilization, |v| (0.0..=1.0).contains(&v), "must be in [0, 1]")?;
    check(&owner, "tan_phi", eq.tan_phi, |v| v >= 0.0, "must be non-negative")?;

    Ok(())
}

fn validate_workshop(totals: &WorkshopTotalsDef) -> Result<(), ValidationError> {
    let owner = "workshop";
    let non_negative = |v: f64| v >= 0.0;
    check(owner, "total_power_kw", totals.total_power_kw, non_negative, "must be non-negative")?;
    check(owner, "weighted_power_kw", totals.weighted_power_kw, non_negative, "must be non-negative")?;
    check(
        owner,
        "weighted_reactive_kvar",
        totals.weighted_reactive_kvar,
        non_negative,
        "must be non-negative",
    )?;
    check(owner, "squared_power_kw2", totals.squared_power_kw2, non_negative, "must be non-negative")?;
    Ok(())
}
