//! File adapters around the analysis engine.
//!
//! - [`loader`]: reads the seven input datasets from CSV files
//! - [`export`]: writes report tables as CSV and the report as JSON
//! - [`long_format`]: reshapes tables for grouped bar charts

pub mod error;
pub mod export;
pub mod loader;
pub mod long_format;

pub use error::{IoError, IoResult};
pub use export::Exporter;
pub use loader::{dataset_path, find_missing_datasets, load_datasets, read_csv};
pub use long_format::{LongRow, area_costs_long, resource_costs_long, summary_long};
