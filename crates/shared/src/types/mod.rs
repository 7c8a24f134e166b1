//! Common types used across the workspace.

pub mod decimal;
pub mod id;

pub use decimal::{Tolerance, round_half_even};
pub use id::*;
