//! Resolves article prices and exchange rates into stage unit values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use scostamenti_shared::types::{ArticleId, CurrencyCode};

use super::error::CurrencyError;
use super::exchange::{ExchangeRate, ExchangeRateTable};
use crate::dataset::{Article, MaterialCost};

/// Unit value of an item at each of the four stages, reporting currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageUnitValues {
    /// Standard price at standard rate.
    pub budget: Decimal,
    /// Standard price at standard rate.
    pub standard_mix: Decimal,
    /// Standard price at actual rate.
    pub effective_mix: Decimal,
    /// Actual price at actual rate.
    pub actual: Decimal,
}

impl StageUnitValues {
    /// Unit revenue of an article at each stage.
    ///
    /// The rate moves at the effective-mix stage, the price at the actual stage.
    #[must_use]
    pub fn for_revenue(article: &Article, rate: &ExchangeRate) -> Self {
        let standard = rate.at_standard(article.standard_price);
        Self {
            budget: standard,
            standard_mix: standard,
            effective_mix: rate.at_actual(article.standard_price),
            actual: rate.at_actual(article.actual_price),
        }
    }

    /// Unit material cost of an article at each stage (no exchange rate involved).
    #[must_use]
    pub const fn for_cost(cost: &MaterialCost) -> Self {
        Self {
            budget: cost.standard_unit_cost,
            standard_mix: cost.standard_unit_cost,
            effective_mix: cost.standard_unit_cost,
            actual: cost.actual_unit_cost,
        }
    }
}

/// Resolved prices and rates of one article/currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResolution {
    /// Article number.
    pub article_id: ArticleId,
    /// Invoicing currency.
    pub currency: CurrencyCode,
    /// Standard unit price, foreign currency.
    pub standard_price: Decimal,
    /// Actual unit price, foreign currency.
    pub actual_price: Decimal,
    /// Standard exchange rate.
    pub standard_rate: Decimal,
    /// Actual exchange rate.
    pub actual_rate: Decimal,
    /// Stage unit values, reporting currency.
    pub unit_values: StageUnitValues,
}

impl PriceResolution {
    /// Change of unit revenue caused by the exchange rate alone.
    #[must_use]
    pub fn unit_exchange_delta(&self) -> Decimal {
        self.standard_price * (self.actual_rate - self.standard_rate)
    }

    /// Change of unit revenue caused by the price alone, valued at the actual rate.
    #[must_use]
    pub fn unit_price_delta(&self) -> Decimal {
        (self.actual_price - self.standard_price) * self.actual_rate
    }
}

/// Looks up exchange rates for articles.
#[derive(Debug, Clone, Copy)]
pub struct PriceResolver<'a> {
    rates: &'a ExchangeRateTable,
}

impl<'a> PriceResolver<'a> {
    /// Creates a resolver over an exchange-rate table.
    #[must_use]
    pub const fn new(rates: &'a ExchangeRateTable) -> Self {
        Self { rates }
    }

    /// Resolves one article.
    ///
    /// # Errors
    ///
    /// Returns `MissingExchangeRate` if the article's currency has no rate.
    pub fn resolve(&self, article: &Article) -> Result<PriceResolution, CurrencyError> {
        let rate = self
            .rates
            .get(&article.currency)
            .ok_or_else(|| CurrencyError::MissingExchangeRate {
                article: article.article_id.clone(),
                currency: article.currency.clone(),
            })?;

        Ok(PriceResolution {
            article_id: article.article_id.clone(),
            currency: article.currency.clone(),
            standard_price: article.standard_price,
            actual_price: article.actual_price,
            standard_rate: rate.standard_rate,
            actual_rate: rate.actual_rate,
            unit_values: StageUnitValues::for_revenue(article, rate),
        })
    }

    /// Resolves every article, stopping at the first missing rate.
    ///
    /// # Errors
    ///
    /// Returns `MissingExchangeRate` for the first article whose currency has no rate.
    pub fn resolve_all(&self, articles: &[Article]) -> Result<Vec<PriceResolution>, CurrencyError> {
        articles.iter().map(|article| self.resolve(article)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn article(currency: &str, standard_price: Decimal, actual_price: Decimal) -> Article {
        Article {
            article_id: ArticleId::new("A"),
            currency: CurrencyCode::new(currency),
            budget_quantity: dec!(10),
            actual_quantity: dec!(12),
            standard_price,
            actual_price,
        }
    }

    fn table() -> ExchangeRateTable {
        [
            ExchangeRate::new(CurrencyCode::new("EUR"), dec!(1), dec!(1)),
            ExchangeRate::new(CurrencyCode::new("USD"), dec!(0.9), dec!(0.95)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_stage_values_move_rate_then_price() {
        let rates = table();
        let resolved = PriceResolver::new(&rates)
            .resolve(&article("USD", dec!(10), dec!(12)))
            .unwrap();
        assert_eq!(resolved.unit_values.budget, dec!(9));
        assert_eq!(resolved.unit_values.standard_mix, dec!(9));
        assert_eq!(resolved.unit_values.effective_mix, dec!(9.5));
        assert_eq!(resolved.unit_values.actual, dec!(11.4));
    }

    #[test]
    fn test_exchange_and_price_deltas_split_unit_change() {
        let rates = table();
        let resolved = PriceResolver::new(&rates)
            .resolve(&article("USD", dec!(10), dec!(12)))
            .unwrap();
        assert_eq!(resolved.unit_exchange_delta(), dec!(0.5));
        assert_eq!(resolved.unit_price_delta(), dec!(1.9));
        assert_eq!(
            resolved.unit_exchange_delta() + resolved.unit_price_delta(),
            resolved.unit_values.actual - resolved.unit_values.budget
        );
    }

    #[test]
    fn test_unchanged_price_and_rate_have_no_delta() {
        let rates = table();
        let resolved = PriceResolver::new(&rates)
            .resolve(&article("EUR", dec!(10), dec!(10)))
            .unwrap();
        assert_eq!(resolved.unit_exchange_delta(), Decimal::ZERO);
        assert_eq!(resolved.unit_price_delta(), Decimal::ZERO);
        assert_eq!(resolved.unit_values.actual, resolved.unit_values.budget);
    }

    #[test]
    fn test_missing_exchange_rate() {
        let rates = table();
        let result = PriceResolver::new(&rates).resolve(&article("JPY", dec!(10), dec!(10)));
        assert_eq!(
            result,
            Err(CurrencyError::MissingExchangeRate {
                article: ArticleId::new("A"),
                currency: CurrencyCode::new("JPY"),
            })
        );
    }

    #[test]
    fn test_resolve_all_stops_at_first_missing_rate() {
        let rates = table();
        let articles = vec![article("EUR", dec!(1), dec!(1)), article("GBP", dec!(1), dec!(1))];
        assert!(PriceResolver::new(&rates).resolve_all(&articles).is_err());
        assert_eq!(
            PriceResolver::new(&rates).resolve_all(&articles[..1]).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_cost_stage_values() {
        let cost = MaterialCost {
            article_id: ArticleId::new("A"),
            standard_unit_cost: dec!(4),
            actual_unit_cost: dec!(4.5),
        };
        let values = StageUnitValues::for_cost(&cost);
        assert_eq!(values.budget, dec!(4));
        assert_eq!(values.standard_mix, dec!(4));
        assert_eq!(values.effective_mix, dec!(4));
        assert_eq!(values.actual, dec!(4.5));
    }
}
