//! Mix error types.

use thiserror::Error;

use super::calculator::MixColumn;

/// Errors raised while computing mix shares.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MixError {
    /// A column's total volume is zero, so shares are undefined.
    #[error("Total {column} volume is zero, mix shares are undefined")]
    ZeroVolumeBase {
        /// The column with no volume.
        column: MixColumn,
    },
}
