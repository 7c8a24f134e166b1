//! Normalized records consumed by the engine.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use scostamenti_shared::types::{ArticleId, CurrencyCode, ResourceId};

use super::error::DatasetError;
use super::types::DatasetKind;
use crate::currency::ExchangeRateTable;

/// One article sold in one currency, with both scenarios' quantity and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article number.
    pub article_id: ArticleId,
    /// Currency the article is invoiced in.
    pub currency: CurrencyCode,
    /// Budgeted quantity.
    pub budget_quantity: Decimal,
    /// Actual quantity.
    pub actual_quantity: Decimal,
    /// Standard (budget) unit price, in `currency`.
    pub standard_price: Decimal,
    /// Actual unit price, in `currency`.
    pub actual_price: Decimal,
}

/// Material cost of one unit of an article, in the reporting currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialCost {
    /// Article number.
    pub article_id: ArticleId,
    /// Standard unit material cost.
    pub standard_unit_cost: Decimal,
    /// Actual unit material cost.
    pub actual_unit_cost: Decimal,
}

/// A production resource with both scenarios' rate and hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource code.
    pub resource_id: ResourceId,
    /// Production area code as found in the rate tables.
    pub area_code: String,
    /// Budgeted hourly rate.
    pub standard_rate: Decimal,
    /// Actual hourly rate.
    pub actual_rate: Decimal,
    /// Budgeted hours.
    pub standard_hours: Decimal,
    /// Actual hours.
    pub actual_hours: Decimal,
}

/// Everything one analysis run needs, already joined and validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Articles, ordered by id then currency.
    pub articles: Vec<Article>,
    /// Material costs, at most one per sold article.
    pub material_costs: Vec<MaterialCost>,
    /// Exchange rates by currency.
    pub exchange_rates: ExchangeRateTable,
    /// Resources, ordered by id.
    pub resources: Vec<Resource>,
}

pub(crate) fn check_non_negative(
    dataset: DatasetKind,
    field: &'static str,
    key: &str,
    value: Decimal,
) -> Result<(), DatasetError> {
    if value < Decimal::ZERO {
        return Err(DatasetError::NegativeValue {
            dataset,
            field,
            key: key.to_string(),
            value,
        });
    }
    Ok(())
}

pub(crate) fn check_positive(dataset: DatasetKind, key: &str, value: Decimal) -> Result<(), DatasetError> {
    if value <= Decimal::ZERO {
        return Err(DatasetError::NonPositiveRate {
            dataset,
            key: key.to_string(),
            value,
        });
    }
    Ok(())
}

impl ReferenceData {
    /// Re-checks the record invariants.
    ///
    /// Loaded data already satisfies them; this is for reference data built by hand.
    ///
    /// # Errors
    ///
    /// Returns `NegativeValue` for a negative quantity, price, cost or hour figure,
    /// `NonPositiveRate` for a zero or negative exchange or hourly rate,
    /// `DuplicateMaterialCost` for an article costed twice and `UnknownArticle`
    /// for a material cost of an article that is not sold.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let sold: BTreeSet<&ArticleId> = self.articles.iter().map(|a| &a.article_id).collect();
        let mut costed = BTreeSet::new();
        for article in &self.articles {
            let key = article.article_id.as_str();
            check_non_negative(DatasetKind::Sales, "budget_quantity", key, article.budget_quantity)?;
            check_non_negative(DatasetKind::Sales, "actual_quantity", key, article.actual_quantity)?;
            check_non_negative(DatasetKind::Sales, "standard_price", key, article.standard_price)?;
            check_non_negative(DatasetKind::Sales, "actual_price", key, article.actual_price)?;
        }

        for cost in &self.material_costs {
            if !sold.contains(&cost.article_id) {
                return Err(DatasetError::UnknownArticle(cost.article_id.clone()));
            }
            if !costed.insert(&cost.article_id) {
                return Err(DatasetError::DuplicateMaterialCost(cost.article_id.clone()));
            }
            let key = cost.article_id.as_str();
            check_non_negative(DatasetKind::Consumption, "standard_unit_cost", key, cost.standard_unit_cost)?;
            check_non_negative(DatasetKind::Consumption, "actual_unit_cost", key, cost.actual_unit_cost)?;
        }

        for rate in self.exchange_rates.iter() {
            let key = rate.currency.as_str();
            check_positive(DatasetKind::ExchangeRates, key, rate.standard_rate)?;
            check_positive(DatasetKind::ExchangeRates, key, rate.actual_rate)?;
        }

        for resource in &self.resources {
            let key = resource.resource_id.as_str();
            check_positive(DatasetKind::HourlyCostBudget, key, resource.standard_rate)?;
            check_positive(DatasetKind::HourlyCostActual, key, resource.actual_rate)?;
            check_non_negative(DatasetKind::TimeUsage, "standard_hours", key, resource.standard_hours)?;
            check_non_negative(DatasetKind::TimeUsage, "actual_hours", key, resource.actual_hours)?;
        }

        Ok(())
    }

    /// Looks up the material cost of an article.
    #[must_use]
    pub fn material_cost(&self, article_id: &ArticleId) -> Option<&MaterialCost> {
        self.material_costs
            .iter()
            .find(|cost| &cost.article_id == article_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::ExchangeRate;
    use rust_decimal_macros::dec;

    fn sample() -> ReferenceData {
        let mut exchange_rates = ExchangeRateTable::new();
        exchange_rates.insert(ExchangeRate::new(CurrencyCode::new("EUR"), dec!(1), dec!(1)));
        ReferenceData {
            articles: vec![Article {
                article_id: ArticleId::new("A"),
                currency: CurrencyCode::new("EUR"),
                budget_quantity: dec!(100),
                actual_quantity: dec!(120),
                standard_price: dec!(10),
                actual_price: dec!(10.5),
            }],
            material_costs: vec![MaterialCost {
                article_id: ArticleId::new("A"),
                standard_unit_cost: dec!(4),
                actual_unit_cost: dec!(4.2),
            }],
            exchange_rates,
            resources: vec![Resource {
                resource_id: ResourceId::new("R1"),
                area_code: "A20".to_string(),
                standard_rate: dec!(20),
                actual_rate: dec!(22),
                standard_hours: dec!(100),
                actual_hours: dec!(120),
            }],
        }
    }

    #[test]
    fn test_valid_reference_data_passes() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut data = sample();
        data.articles[0].actual_quantity = dec!(-1);
        assert!(matches!(
            data.validate(),
            Err(DatasetError::NegativeValue { field: "actual_quantity", .. })
        ));
    }

    #[test]
    fn test_zero_hourly_rate_rejected() {
        let mut data = sample();
        data.resources[0].actual_rate = Decimal::ZERO;
        assert!(matches!(
            data.validate(),
            Err(DatasetError::NonPositiveRate {
                dataset: DatasetKind::HourlyCostActual,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_quantity_and_price_allowed() {
        let mut data = sample();
        data.articles[0].budget_quantity = Decimal::ZERO;
        data.articles[0].standard_price = Decimal::ZERO;
        assert_eq!(data.validate(), Ok(()));
    }

    #[test]
    fn test_material_cost_lookup() {
        let data = sample();
        assert!(data.material_cost(&ArticleId::new("A")).is_some());
        assert!(data.material_cost(&ArticleId::new("B")).is_none());
    }

    fn with_article_b(mut data: ReferenceData) -> ReferenceData {
        let mut b = data.articles[0].clone();
        b.article_id = ArticleId::new("B");
        data.articles.push(b);
        data
    }

    #[test]
    fn test_material_cost_lookup_ignores_row_order() {
        let mut data = with_article_b(sample());
        data.material_costs.insert(
            0,
            MaterialCost {
                article_id: ArticleId::new("B"),
                standard_unit_cost: dec!(2),
                actual_unit_cost: dec!(2),
            },
        );

        assert_eq!(data.validate(), Ok(()));
        assert_eq!(data.material_cost(&ArticleId::new("A")).unwrap().standard_unit_cost, dec!(4));
        assert_eq!(data.material_cost(&ArticleId::new("B")).unwrap().standard_unit_cost, dec!(2));
    }

    #[test]
    fn test_duplicate_material_cost_rejected() {
        let mut data = sample();
        data.material_costs.push(data.material_costs[0].clone());
        assert_eq!(
            data.validate(),
            Err(DatasetError::DuplicateMaterialCost(ArticleId::new("A")))
        );
    }

    #[test]
    fn test_material_cost_of_unsold_article_rejected() {
        let mut data = sample();
        data.material_costs[0].article_id = ArticleId::new("Z");
        assert_eq!(data.validate(), Err(DatasetError::UnknownArticle(ArticleId::new("Z"))));
    }
}
