//! Input datasets and the reference data loader.
//!
//! Raw rows are kept close to the file layout; [`ReferenceData::from_datasets`]
//! validates them and joins them into per-article and per-resource records.

pub mod error;
pub mod loader;
pub mod records;
pub mod types;

pub use error::DatasetError;
pub use records::{Article, MaterialCost, ReferenceData, Resource};
pub use types::{
    ConsumptionRow, CustomerRow, DatasetKind, ExchangeRateRow, HourlyCostRow, RawDatasets,
    SalesRow, Scenario, TimeUsageRow,
};
