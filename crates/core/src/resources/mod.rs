//! Production areas and resource (labor/machine) cost.

pub mod aggregator;
pub mod area;
pub mod error;


pub use aggregator::{
    CostStages, ProductionAreaCostBreakdown, ResourceCost, ResourceCostAggregator, ResourceCostBreakdown,
};
pub use area::ProductionArea;
pub use error::ResourceError;
