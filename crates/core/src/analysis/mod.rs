//! End-to-end analysis: engine, report and report cache.
//!
//! The engine runs, in order: validation, price/rate resolution, revenue and
//! material decomposition, resource aggregation, summary rollup and
//! reconciliation. Any fatal error aborts the run without a partial report.

pub mod cache;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod report;


pub use cache::{AnalysisCache, CachedAnalysis};
pub use engine::AnalysisEngine;
pub use error::AnalysisError;
pub use fingerprint::InputFingerprint;
pub use report::{AnalysisReport, MaterialCostRow, PriceVarianceRow, ShareColumn, VolumeMixRow};
