//! Exchange rate types and lookup.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use scostamenti_shared::types::CurrencyCode;

/// Standard and actual rate of one currency against the reporting currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Currency code.
    pub currency: CurrencyCode,
    /// Rate used for the budget (1 currency = rate reporting units).
    pub standard_rate: Decimal,
    /// Rate observed in the period.
    pub actual_rate: Decimal,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(currency: CurrencyCode, standard_rate: Decimal, actual_rate: Decimal) -> Self {
        Self {
            currency,
            standard_rate,
            actual_rate,
        }
    }

    /// Converts a foreign amount at the standard rate.
    #[must_use]
    pub fn at_standard(&self, amount: Decimal) -> Decimal {
        amount * self.standard_rate
    }

    /// Converts a foreign amount at the actual rate.
    #[must_use]
    pub fn at_actual(&self, amount: Decimal) -> Decimal {
        amount * self.actual_rate
    }
}

/// Exchange rates keyed by currency, one entry per currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRateTable {
    rates: BTreeMap<CurrencyCode, ExchangeRate>,
}

impl ExchangeRateTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rate, returning the one it replaced.
    pub fn insert(&mut self, rate: ExchangeRate) -> Option<ExchangeRate> {
        self.rates.insert(rate.currency.clone(), rate)
    }

    /// Looks up the rate of a currency.
    #[must_use]
    pub fn get(&self, currency: &CurrencyCode) -> Option<&ExchangeRate> {
        self.rates.get(currency)
    }

    /// Iterates over the rates in currency order.
    pub fn iter(&self) -> impl Iterator<Item = &ExchangeRate> {
        self.rates.values()
    }

    /// Number of currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table holds no rate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<ExchangeRate> for ExchangeRateTable {
    fn from_iter<I: IntoIterator<Item = ExchangeRate>>(iter: I) -> Self {
        let mut table = Self::new();
        for rate in iter {
            table.insert(rate);
        }
        table
    }
}
