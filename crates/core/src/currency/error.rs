//! Currency error types.

use scostamenti_shared::types::{ArticleId, CurrencyCode};
use thiserror::Error;

/// Errors raised while resolving prices into the reporting currency.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// An article is sold in a currency with no exchange-rate row.
    #[error("No exchange rate for currency {currency} (article {article})")]
    MissingExchangeRate {
        /// Article being resolved.
        article: ArticleId,
        /// Currency without a rate.
        currency: CurrencyCode,
    },
}
