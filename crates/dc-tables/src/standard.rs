//! Standard demand-factor tables.
//!
//! Both tables share the utilization axis `0.1 ..= 0.8`. The group table is
//! indexed by effective counts up to 25, the workshop table up to 50.

use crate::error::TableError;
use crate::table::DemandFactorTable;
use std::fmt;
use std::str::FromStr;

const UTILIZATION_AXIS: [f64; 9] = [0.1, 0.15, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];

const GROUP_ROWS: [i64; 16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 14, 16, 18, 20, 25];

#[rustfmt::skip]
const GROUP_VALUES: [[f64; 9]; 16] = [
    [8.00, 5.33, 4.00, 2.67, 2.00, 1.60, 1.33, 1.14, 1.00],
    [6.22, 4.33, 3.06, 2.45, 1.98, 1.60, 1.33, 1.14, 1.00],
    [4.66, 2.89, 2.31, 1.74, 1.45, 1.34, 1.22, 1.14, 1.00],
    [3.24, 2.35, 1.91, 1.47, 1.25, 1.21, 1.12, 1.06, 1.00],
    [2.84, 2.09, 1.72, 1.35, 1.16, 1.16, 1.08, 1.03, 1.00],
    [2.64, 1.96, 1.62, 1.28, 1.14, 1.13, 1.06, 1.01, 1.00],
    [2.49, 1.86, 1.54, 1.23, 1.12, 1.10, 1.04, 1.00, 1.00],
    [2.37, 1.78, 1.48, 1.19, 1.10, 1.08, 1.02, 1.00, 1.00],
    [2.27, 1.71, 1.43, 1.16, 1.09, 1.07, 1.01, 1.00, 1.00],
    [2.18, 1.65, 1.39, 1.13, 1.07, 1.05, 1.00, 1.00, 1.00],
    [2.04, 1.56, 1.32, 1.08, 1.05, 1.03, 1.00, 1.00, 1.00],
    [1.94, 1.49, 1.27, 1.05, 1.02, 1.00, 1.00, 1.00, 1.00],
    [1.85, 1.43, 1.23, 1.02, 1.00, 1.00, 1.00, 1.00, 1.00],
    [1.78, 1.39, 1.19, 1.00, 1.00, 1.00, 1.00, 1.00, 1.00],
    [1.72, 1.35, 1.16, 1.00, 1.00, 1.00, 1.00, 1.00, 1.00],
    [1.60, 1.27, 1.10, 1.00, 1.00, 1.00, 1.00, 1.00, 1.00],
];

const WORKSHOP_ROWS: [i64; 9] = [1, 2, 3, 4, 5, 6, 9, 10, 50];

#[rustfmt::skip]
const WORKSHOP_VALUES: [[f64; 9]; 9] = [
    [8.00, 5.33, 4.00, 2.67, 2.00, 1.60, 1.33, 1.14, 1.14],
    [5.01, 3.44, 2.69, 1.90, 1.52, 1.24, 1.11, 1.00, 1.00],
    [2.40, 2.17, 1.80, 1.42, 1.23, 1.14, 1.08, 1.00, 1.00],
    [2.28, 1.73, 1.46, 1.19, 1.06, 1.04, 0.97, 0.94, 0.94],
    [1.31, 1.20, 1.00, 0.96, 0.95, 0.94, 0.93, 0.91, 0.91],
    [1.10, 0.97, 0.91, 0.91, 0.90, 0.90, 0.90, 0.90, 0.90],
    [0.80, 0.80, 0.80, 0.85, 0.85, 0.85, 0.85, 0.85, 0.85],
    [0.75, 0.75, 0.75, 0.75, 0.75, 0.75, 0.85, 0.85, 0.85],
    [0.65, 0.65, 0.65, 0.70, 0.70, 0.70, 0.75, 0.80, 0.80],
];

fn from_static<const R: usize, const C: usize>(
    rows: &[i64; R],
    cols: &[f64; C],
    values: &[[f64; C]; R],
) -> DemandFactorTable {
    DemandFactorTable::from_parts_unchecked(
        rows.to_vec(),
        cols.to_vec(),
        values.iter().flatten().copied().collect(),
    )
}

/// Group-level table (individual equipment groups).
pub fn group_table() -> DemandFactorTable {
    from_static(&GROUP_ROWS, &UTILIZATION_AXIS, &GROUP_VALUES)
}

/// Workshop-level table (whole facility, larger effective counts).
pub fn workshop_table() -> DemandFactorTable {
    from_static(&WORKSHOP_ROWS, &UTILIZATION_AXIS, &WORKSHOP_VALUES)
}

/// Which of the two standard tables to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Group,
    Workshop,
}

impl TableKind {
    pub fn label(self) -> &'static str {
        match self {
            TableKind::Group => "group",
            TableKind::Workshop => "workshop",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TableKind {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "group" => Ok(TableKind::Group),
            "workshop" => Ok(TableKind::Workshop),
            other => Err(TableError::UnknownKind {
                name: other.to_string(),
            }),
        }
    }
}

/// Both standard tables, built once per calculation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardTables {
    pub group: DemandFactorTable,
    pub workshop: DemandFactorTable,
}

impl StandardTables {
    pub fn new() -> Self {
        Self {
            group: group_table(),
            workshop: workshop_table(),
        }
    }

    pub fn get(&self, kind: TableKind) -> &DemandFactorTable {
        match kind {
            TableKind::Group => &self.group,
            TableKind::Workshop => &self.workshop,
        }
    }
}

impl Default for StandardTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_are_valid() {
        group_table().validate().unwrap();
        workshop_table().validate().unwrap();
        assert_eq!(group_table().dimensions(), (16, 9));
        assert_eq!(workshop_table().dimensions(), (9, 9));
    }

    #[test]
    fn tables_differ() {
        let tables = StandardTables::new();
        assert_ne!(tables.group, tables.workshop);
        assert_eq!(tables.get(TableKind::Workshop).row_breakpoints()[8], 50);
    }

    #[test]
    fn table_kind_parses() {
        assert_eq!("group".parse::<TableKind>().unwrap(), TableKind::Group);
        assert_eq!(" Workshop ".parse::<TableKind>().unwrap(), TableKind::Workshop);
        assert!("plant".parse::<TableKind>().is_err());
        assert_eq!(TableKind::Workshop.to_string(), "workshop");
    }
}
