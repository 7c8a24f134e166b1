//! Four-stage variance lines and the decomposer.

pub mod decomposer;
pub mod line;


pub use decomposer::{Decomposer, Decomposition, DecompositionItem, ItemDecomposition};
pub use line::{LineVariance, Stage, VarianceEffects, VarianceLine, VarianceType};
