//! Resource error types.

use scostamenti_shared::types::ResourceId;
use thiserror::Error;

/// Errors raised while aggregating resource costs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    /// A resource's area code is not one of the plant's production areas.
    #[error("Resource {resource} has unknown production area '{area_code}'")]
    UnknownProductionArea {
        /// Resource code.
        resource: ResourceId,
        /// Area code as found in the data.
        area_code: String,
    },
}
