//! Demand-factor standards tables and their bilinear lookup.
//!
//! A [`DemandFactorTable`] maps an (effective equipment count, utilization
//! factor) pair to the demand factor k_R. Two instances ship with the crate:
//! the group-level table and the workshop-level table (see [`standard`]).

pub mod error;
pub mod standard;
pub mod table;

pub use error::{TableError, TableResult};
pub use standard::{StandardTables, TableKind, group_table, workshop_table};
pub use table::DemandFactorTable;
