//! Exchange rates and the price/rate resolver.

pub mod error;
pub mod exchange;
pub mod resolver;

pub use error::CurrencyError;
pub use exchange::{ExchangeRate, ExchangeRateTable};
pub use resolver::{PriceResolution, PriceResolver, StageUnitValues};
