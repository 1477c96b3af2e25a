//! Whole-workshop demand pass.

use crate::aggregate::GroupAggregate;
use crate::demand::{DemandRules, DemandSummary, compute_demand};
use crate::error::DemandResult;
use dc_tables::DemandFactorTable;

/// Workshop pass over facility totals, independent of any equipment list.
///
/// Same algorithm as the group pass, driven by the workshop table and
/// [`DemandRules::workshop`].
pub fn compute_workshop(
    totals: &GroupAggregate,
    table: &DemandFactorTable,
) -> DemandResult<DemandSummary> {
    compute_demand(totals, table, &DemandRules::workshop())
}
