//! Variance decomposition engine.
//!
//! This crate contains pure computation with ZERO file or network dependencies.
//! It turns the seven normalized input datasets into budget-vs-actual variance
//! tables, chaining every line through Budget, Standard Mix, Effective Mix and
//! Actual so that the total delta splits into volume, mix and price effects.
//!
//! # Modules
//!
//! - `dataset` - Raw dataset rows, normalized records and the reference data loader
//! - `currency` - Exchange rates and the price/rate resolver
//! - `mix` - Volume and mix shares, standard-mix anchor quantities
//! - `variance` - Four-stage variance lines and the decomposer
//! - `resources` - Production areas and resource cost aggregation
//! - `rollup` - Five-row summary and consistency reconciliation
//! - `grouping` - Threshold grouping of small shares into "Other"
//! - `analysis` - End-to-end engine, report and report cache

pub mod analysis;
pub mod currency;
pub mod dataset;
pub mod grouping;
pub mod mix;
pub mod resources;
pub mod rollup;
pub mod variance;
