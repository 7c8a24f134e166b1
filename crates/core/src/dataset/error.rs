//! Dataset error types.

use rust_decimal::Decimal;
use scostamenti_shared::types::{ArticleId, CurrencyCode, CustomerId, ResourceId};
use thiserror::Error;

use super::types::DatasetKind;

/// Errors raised while validating and joining the raw datasets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    /// A required dataset has no rows.
    #[error("Dataset '{0}' is empty")]
    EmptyDataset(DatasetKind),

    /// The same customer appears twice in the customer master data.
    #[error("Duplicate customer: {0}")]
    DuplicateCustomer(CustomerId),

    /// A sales row references a customer that is not in the master data.
    #[error("Sales row for article {article} references unknown customer {customer}")]
    UnknownCustomer {
        /// Article of the offending row.
        article: ArticleId,
        /// Missing customer.
        customer: CustomerId,
    },

    /// A consumption row or material cost references an article that was never sold.
    #[error("Material consumption references article {0} which has no sales")]
    UnknownArticle(ArticleId),

    /// An article has more than one material cost record.
    #[error("Duplicate material cost for article {0}")]
    DuplicateMaterialCost(ArticleId),

    /// The same currency appears twice in the exchange-rate table.
    #[error("Duplicate exchange rate for currency {0}")]
    DuplicateExchangeRate(CurrencyCode),

    /// A rate (exchange or hourly) is zero or negative.
    #[error("Rate must be positive in {dataset} for {key}: {value}")]
    NonPositiveRate {
        /// Dataset holding the rate.
        dataset: DatasetKind,
        /// Currency or resource code.
        key: String,
        /// Offending value.
        value: Decimal,
    },

    /// A quantity, price, cost or hour figure is negative.
    #[error("Negative {field} in {dataset} for {key}: {value}")]
    NegativeValue {
        /// Dataset holding the value.
        dataset: DatasetKind,
        /// Column name.
        field: &'static str,
        /// Article, material or resource code.
        key: String,
        /// Offending value.
        value: Decimal,
    },

    /// A resource has booked hours but no hourly rate in either rate table.
    #[error("Resource {0} has booked hours but no hourly rate")]
    MissingHourlyRate(ResourceId),

    /// The budget and actual rate tables assign a resource to different areas.
    #[error("Resource {resource} is in area {budget_area} in the budget but {actual_area} in the actual rates")]
    AreaMismatch {
        /// Resource code.
        resource: ResourceId,
        /// Area code from the budget table.
        budget_area: String,
        /// Area code from the actual table.
        actual_area: String,
    },

    /// A resource is listed twice in the same rate table.
    #[error("Duplicate resource {resource} in {dataset}")]
    DuplicateResource {
        /// Rate table.
        dataset: DatasetKind,
        /// Resource code.
        resource: ResourceId,
    },
}
