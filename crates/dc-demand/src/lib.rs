//! Group electrical-load demand calculation.
//!
//! Data flow:
//!
//! ```text
//! [Equipment] --aggregate--> (EquipmentResult per device, GroupAggregate)
//! GroupAggregate + group table    --compute_demand--> group DemandSummary
//! workshop totals + workshop table --compute_demand--> workshop DemandSummary
//! ```
//!
//! Every function here is pure. The equipment list is an immutable input
//! snapshot; nothing is shared between calculation passes.

pub mod aggregate;
pub mod demand;
pub mod equipment;
pub mod error;
pub mod report;
pub mod workshop;

pub use aggregate::{Aggregation, EquipmentResult, GroupAggregate, aggregate};
pub use demand::{DemandRules, DemandSummary, ReactiveDemand, compute_demand, compute_group};
pub use equipment::Equipment;
pub use error::{DemandError, DemandResult};
pub use report::{CalculationReport, calculate};
pub use workshop::compute_workshop;
