//! Analysis error types.

use scostamenti_shared::AppError;
use thiserror::Error;

use crate::currency::CurrencyError;
use crate::dataset::DatasetError;
use crate::mix::MixError;
use crate::resources::ResourceError;

/// Errors that abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input data failed validation.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// An exchange rate is missing.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// A volume column sums to zero.
    #[error(transparent)]
    Mix(#[from] MixError),

    /// A resource cannot be placed in a production area.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The input set could not be serialized for fingerprinting.
    #[error("Failed to fingerprint input datasets: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Short machine-readable kind of the error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Dataset(_) => "invalid_dataset",
            Self::Currency(CurrencyError::MissingExchangeRate { .. }) => "missing_exchange_rate",
            Self::Mix(MixError::ZeroVolumeBase { .. }) => "zero_volume_base",
            Self::Resource(ResourceError::UnknownProductionArea { .. }) => "unknown_production_area",
            Self::Fingerprint(_) => "fingerprint",
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Dataset(_) => Self::Validation(err.to_string()),
            AnalysisError::Currency(_) | AnalysisError::Mix(_) | AnalysisError::Resource(_) => {
                Self::BusinessRule(err.to_string())
            }
            AnalysisError::Fingerprint(_) => Self::Internal(err.to_string()),
        }
    }
}
