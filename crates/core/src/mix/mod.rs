//! Volume and mix shares.

pub mod calculator;
pub mod error;


pub use calculator::{MixCalculator, MixColumn, VolumeMix, VolumeMixEntry};
pub use error::MixError;
