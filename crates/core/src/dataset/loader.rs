//! Joins the seven raw datasets into [`ReferenceData`].

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use scostamenti_shared::types::{ArticleId, CurrencyCode, CustomerId, ResourceId};
use tracing::debug;

use super::error::DatasetError;
use super::records::{Article, MaterialCost, ReferenceData, Resource, check_non_negative, check_positive};
use super::types::{DatasetKind, HourlyCostRow, RawDatasets, Scenario};
use crate::currency::{ExchangeRate, ExchangeRateTable};

/// Running totals of one scenario's sales for an article/currency.
#[derive(Debug, Clone, Copy, Default)]
struct SalesTotals {
    quantity: Decimal,
    amount: Decimal,
}

impl SalesTotals {
    fn unit_price(self) -> Option<Decimal> {
        (!self.quantity.is_zero()).then(|| self.amount / self.quantity)
    }
}

/// Picks this scenario's value, falling back to the other scenario's, then zero.
fn with_fallback(own: Option<Decimal>, other: Option<Decimal>) -> Decimal {
    own.or(other).unwrap_or(Decimal::ZERO)
}

const fn scenario_index(scenario: Scenario) -> usize {
    match scenario {
        Scenario::Budget => 0,
        Scenario::Actual => 1,
    }
}

impl ReferenceData {
    /// Validates the raw datasets and joins them into normalized records.
    ///
    /// Sales are aggregated per article and currency with a quantity-weighted
    /// average price. A scenario without priced sales (or without consumption,
    /// or missing from a rate table) takes the other scenario's value so that
    /// no spurious price or rate variance appears.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] describing the first violation found.
    pub fn from_datasets(raw: &RawDatasets) -> Result<Self, DatasetError> {
        for kind in [DatasetKind::Customers, DatasetKind::Sales, DatasetKind::ExchangeRates] {
            if raw.row_count(kind) == 0 {
                return Err(DatasetError::EmptyDataset(kind));
            }
        }

        let currencies = customer_currencies(raw)?;
        let articles = load_articles(raw, &currencies)?;
        let material_costs = load_material_costs(raw, &articles)?;
        let exchange_rates = load_exchange_rates(raw)?;
        let resources = load_resources(raw)?;

        debug!(
            articles = articles.len(),
            material_costs = material_costs.len(),
            currencies = exchange_rates.len(),
            resources = resources.len(),
            "Reference data loaded"
        );

        Ok(Self {
            articles,
            material_costs,
            exchange_rates,
            resources,
        })
    }
}

fn customer_currencies(raw: &RawDatasets) -> Result<BTreeMap<CustomerId, CurrencyCode>, DatasetError> {
    let mut currencies = BTreeMap::new();
    for row in &raw.customers {
        if currencies
            .insert(row.customer_id.clone(), row.currency.clone())
            .is_some()
        {
            return Err(DatasetError::DuplicateCustomer(row.customer_id.clone()));
        }
    }
    Ok(currencies)
}

fn load_articles(
    raw: &RawDatasets,
    currencies: &BTreeMap<CustomerId, CurrencyCode>,
) -> Result<Vec<Article>, DatasetError> {
    let mut totals: BTreeMap<(ArticleId, CurrencyCode), [SalesTotals; 2]> = BTreeMap::new();

    for row in &raw.sales {
        let key = row.article_id.as_str();
        check_non_negative(DatasetKind::Sales, "quantity", key, row.quantity)?;
        check_non_negative(DatasetKind::Sales, "unit_price", key, row.unit_price)?;

        let currency = currencies
            .get(&row.customer_id)
            .ok_or_else(|| DatasetError::UnknownCustomer {
                article: row.article_id.clone(),
                customer: row.customer_id.clone(),
            })?;

        let entry = totals
            .entry((row.article_id.clone(), currency.clone()))
            .or_default();
        let slot = &mut entry[scenario_index(row.scenario)];
        slot.quantity += row.quantity;
        slot.amount += row.quantity * row.unit_price;
    }

    Ok(totals
        .into_iter()
        .map(|((article_id, currency), [budget, actual])| Article {
            article_id,
            currency,
            budget_quantity: budget.quantity,
            actual_quantity: actual.quantity,
            standard_price: with_fallback(budget.unit_price(), actual.unit_price()),
            actual_price: with_fallback(actual.unit_price(), budget.unit_price()),
        })
        .collect())
}

fn load_material_costs(
    raw: &RawDatasets,
    articles: &[Article],
) -> Result<Vec<MaterialCost>, DatasetError> {
    let sold: BTreeSet<&ArticleId> = articles.iter().map(|a| &a.article_id).collect();
    let mut unit_costs: BTreeMap<&ArticleId, [Option<Decimal>; 2]> =
        sold.iter().map(|id| (*id, [None, None])).collect();

    for row in &raw.consumption {
        let key = row.article_id.as_str();
        check_non_negative(DatasetKind::Consumption, "quantity_per_unit", key, row.quantity_per_unit)?;
        check_non_negative(DatasetKind::Consumption, "unit_cost", key, row.unit_cost)?;

        let entry = unit_costs
            .get_mut(&row.article_id)
            .ok_or_else(|| DatasetError::UnknownArticle(row.article_id.clone()))?;
        let slot = &mut entry[scenario_index(row.scenario)];
        *slot = Some(slot.unwrap_or(Decimal::ZERO) + row.quantity_per_unit * row.unit_cost);
    }

    Ok(unit_costs
        .into_iter()
        .map(|(article_id, [budget, actual])| MaterialCost {
            article_id: article_id.clone(),
            standard_unit_cost: with_fallback(budget, actual),
            actual_unit_cost: with_fallback(actual, budget),
        })
        .collect())
}

fn load_exchange_rates(raw: &RawDatasets) -> Result<ExchangeRateTable, DatasetError> {
    let mut table = ExchangeRateTable::new();
    for row in &raw.exchange_rates {
        let key = row.currency.as_str();
        check_positive(DatasetKind::ExchangeRates, key, row.standard_rate)?;
        check_positive(DatasetKind::ExchangeRates, key, row.actual_rate)?;
        let rate = ExchangeRate::new(row.currency.clone(), row.standard_rate, row.actual_rate);
        if table.insert(rate).is_some() {
            return Err(DatasetError::DuplicateExchangeRate(row.currency.clone()));
        }
    }
    Ok(table)
}

fn rate_table(
    rows: &[HourlyCostRow],
    dataset: DatasetKind,
) -> Result<BTreeMap<&ResourceId, &HourlyCostRow>, DatasetError> {
    let mut table = BTreeMap::new();
    for row in rows {
        check_positive(dataset, row.resource_id.as_str(), row.hourly_rate)?;
        if table.insert(&row.resource_id, row).is_some() {
            return Err(DatasetError::DuplicateResource {
                dataset,
                resource: row.resource_id.clone(),
            });
        }
    }
    Ok(table)
}

fn load_resources(raw: &RawDatasets) -> Result<Vec<Resource>, DatasetError> {
    let budget_rates = rate_table(&raw.hourly_cost_budget, DatasetKind::HourlyCostBudget)?;
    let actual_rates = rate_table(&raw.hourly_cost_actual, DatasetKind::HourlyCostActual)?;

    let mut hours: BTreeMap<&ResourceId, [Decimal; 2]> = BTreeMap::new();
    for row in &raw.time_usage {
        check_non_negative(DatasetKind::TimeUsage, "hours", row.resource_id.as_str(), row.hours)?;
        hours.entry(&row.resource_id).or_default()[scenario_index(row.scenario)] += row.hours;
    }

    let ids: BTreeSet<&ResourceId> = budget_rates
        .keys()
        .chain(actual_rates.keys())
        .chain(hours.keys())
        .copied()
        .collect();

    let mut resources = Vec::with_capacity(ids.len());
    for id in ids {
        let budget = budget_rates.get(id).copied();
        let actual = actual_rates.get(id).copied();

        let (budget, actual) = match (budget, actual) {
            (Some(b), Some(a)) => (b, a),
            (Some(b), None) => (b, b),
            (None, Some(a)) => (a, a),
            (None, None) => return Err(DatasetError::MissingHourlyRate(id.clone())),
        };

        if !budget.area_code.trim().eq_ignore_ascii_case(actual.area_code.trim()) {
            return Err(DatasetError::AreaMismatch {
                resource: id.clone(),
                budget_area: budget.area_code.clone(),
                actual_area: actual.area_code.clone(),
            });
        }

        let [standard_hours, actual_hours] = hours.get(id).copied().unwrap_or_default();
        resources.push(Resource {
            resource_id: id.clone(),
            area_code: budget.area_code.trim().to_string(),
            standard_rate: budget.hourly_rate,
            actual_rate: actual.hourly_rate,
            standard_hours,
            actual_hours,
        });
    }

    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::types::{ConsumptionRow, CustomerRow, ExchangeRateRow, SalesRow, TimeUsageRow};
    use rust_decimal_macros::dec;
    use scostamenti_shared::types::MaterialId;

    fn customer(id: &str, currency: &str) -> CustomerRow {
        CustomerRow {
            customer_id: CustomerId::new(id),
            name: format!("Customer {id}"),
            currency: CurrencyCode::new(currency),
        }
    }

    fn sale(scenario: Scenario, article: &str, customer: &str, quantity: Decimal, price: Decimal) -> SalesRow {
        SalesRow {
            scenario,
            article_id: ArticleId::new(article),
            customer_id: CustomerId::new(customer),
            quantity,
            unit_price: price,
        }
    }

    fn hourly(resource: &str, area: &str, rate: Decimal) -> HourlyCostRow {
        HourlyCostRow {
            resource_id: ResourceId::new(resource),
            area_code: area.to_string(),
            hourly_rate: rate,
        }
    }

    fn usage(scenario: Scenario, resource: &str, hours: Decimal) -> TimeUsageRow {
        TimeUsageRow {
            scenario,
            resource_id: ResourceId::new(resource),
            hours,
        }
    }

    fn base() -> RawDatasets {
        RawDatasets {
            customers: vec![customer("C1", "EUR"), customer("C2", "USD")],
            consumption: vec![
                ConsumptionRow {
                    scenario: Scenario::Budget,
                    article_id: ArticleId::new("A"),
                    material_id: MaterialId::new("STEEL"),
                    quantity_per_unit: dec!(2),
                    unit_cost: dec!(1.5),
                },
                ConsumptionRow {
                    scenario: Scenario::Budget,
                    article_id: ArticleId::new("A"),
                    material_id: MaterialId::new("PAINT"),
                    quantity_per_unit: dec!(0.5),
                    unit_cost: dec!(2),
                },
            ],
            hourly_cost_budget: vec![hourly("R1", "A20", dec!(20))],
            hourly_cost_actual: vec![hourly("R1", "A20", dec!(22))],
            time_usage: vec![
                usage(Scenario::Budget, "R1", dec!(60)),
                usage(Scenario::Budget, "R1", dec!(40)),
                usage(Scenario::Actual, "R1", dec!(120)),
            ],
            exchange_rates: vec![
                ExchangeRateRow {
                    currency: CurrencyCode::new("EUR"),
                    standard_rate: dec!(1),
                    actual_rate: dec!(1),
                },
                ExchangeRateRow {
                    currency: CurrencyCode::new("USD"),
                    standard_rate: dec!(0.9),
                    actual_rate: dec!(0.92),
                },
            ],
            sales: vec![
                sale(Scenario::Budget, "A", "C1", dec!(100), dec!(10)),
                sale(Scenario::Actual, "A", "C1", dec!(60), dec!(10)),
                sale(Scenario::Actual, "A", "C1", dec!(60), dec!(11)),
                sale(Scenario::Budget, "B", "C2", dec!(50), dec!(20)),
            ],
        }
    }

    #[test]
    fn test_weighted_average_price() {
        let data = ReferenceData::from_datasets(&base()).unwrap();
        let a = &data.articles[0];
        assert_eq!(a.article_id, ArticleId::new("A"));
        assert_eq!(a.currency, CurrencyCode::new("EUR"));
        assert_eq!(a.budget_quantity, dec!(100));
        assert_eq!(a.actual_quantity, dec!(120));
        assert_eq!(a.standard_price, dec!(10));
        assert_eq!(a.actual_price, dec!(10.5));
    }

    #[test]
    fn test_price_falls_back_to_other_scenario() {
        let data = ReferenceData::from_datasets(&base()).unwrap();
        let b = &data.articles[1];
        assert_eq!(b.article_id, ArticleId::new("B"));
        assert_eq!(b.currency, CurrencyCode::new("USD"));
        assert_eq!(b.actual_quantity, Decimal::ZERO);
        assert_eq!(b.actual_price, dec!(20));
        assert_eq!(b.standard_price, dec!(20));
    }

    #[test]
    fn test_material_cost_sums_components_with_fallback() {
        let data = ReferenceData::from_datasets(&base()).unwrap();
        let a = data.material_cost(&ArticleId::new("A")).unwrap();
        assert_eq!(a.standard_unit_cost, dec!(4));
        assert_eq!(a.actual_unit_cost, dec!(4));

        let b = data.material_cost(&ArticleId::new("B")).unwrap();
        assert_eq!(b.standard_unit_cost, Decimal::ZERO);
        assert_eq!(b.actual_unit_cost, Decimal::ZERO);
    }

    #[test]
    fn test_resource_hours_are_summed() {
        let data = ReferenceData::from_datasets(&base()).unwrap();
        assert_eq!(data.resources.len(), 1);
        let r = &data.resources[0];
        assert_eq!(r.area_code, "A20");
        assert_eq!(r.standard_hours, dec!(100));
        assert_eq!(r.actual_hours, dec!(120));
        assert_eq!(r.standard_rate, dec!(20));
        assert_eq!(r.actual_rate, dec!(22));
    }

    #[test]
    fn test_unknown_customer() {
        let mut raw = base();
        raw.sales.push(sale(Scenario::Actual, "A", "C9", dec!(1), dec!(1)));
        assert_eq!(
            ReferenceData::from_datasets(&raw),
            Err(DatasetError::UnknownCustomer {
                article: ArticleId::new("A"),
                customer: CustomerId::new("C9"),
            })
        );
    }

    #[test]
    fn test_duplicate_customer() {
        let mut raw = base();
        raw.customers.push(customer("C1", "USD"));
        assert_eq!(
            ReferenceData::from_datasets(&raw),
            Err(DatasetError::DuplicateCustomer(CustomerId::new("C1")))
        );
    }

    #[test]
    fn test_consumption_for_unsold_article() {
        let mut raw = base();
        raw.consumption.push(ConsumptionRow {
            scenario: Scenario::Actual,
            article_id: ArticleId::new("Z"),
            material_id: MaterialId::new("STEEL"),
            quantity_per_unit: dec!(1),
            unit_cost: dec!(1),
        });
        assert_eq!(
            ReferenceData::from_datasets(&raw),
            Err(DatasetError::UnknownArticle(ArticleId::new("Z")))
        );
    }

    #[test]
    fn test_missing_hourly_rate() {
        let mut raw = base();
        raw.time_usage.push(usage(Scenario::Actual, "R2", dec!(5)));
        assert_eq!(
            ReferenceData::from_datasets(&raw),
            Err(DatasetError::MissingHourlyRate(ResourceId::new("R2")))
        );
    }

    #[test]
    fn test_rate_falls_back_to_other_table() {
        let mut raw = base();
        raw.hourly_cost_budget.push(hourly("R2", "A30", dec!(30)));
        raw.time_usage.push(usage(Scenario::Actual, "R2", dec!(5)));
        let data = ReferenceData::from_datasets(&raw).unwrap();
        let r2 = &data.resources[1];
        assert_eq!(r2.actual_rate, dec!(30));
        assert_eq!(r2.standard_hours, Decimal::ZERO);
    }

    #[test]
    fn test_area_mismatch() {
        let mut raw = base();
        raw.hourly_cost_actual[0].area_code = "A30".to_string();
        assert_eq!(
            ReferenceData::from_datasets(&raw),
            Err(DatasetError::AreaMismatch {
                resource: ResourceId::new("R1"),
                budget_area: "A20".to_string(),
                actual_area: "A30".to_string(),
            })
        );
    }

    #[test]
    fn test_area_codes_compare_case_insensitively() {
        let mut raw = base();
        raw.hourly_cost_actual[0].area_code = " a20 ".to_string();
        let data = ReferenceData::from_datasets(&raw).unwrap();
        assert_eq!(data.resources[0].area_code, "A20");
    }

    #[test]
    fn test_duplicate_resource_in_rate_table() {
        let mut raw = base();
        raw.hourly_cost_budget.push(hourly("R1", "A20", dec!(21)));
        assert_eq!(
            ReferenceData::from_datasets(&raw),
            Err(DatasetError::DuplicateResource {
                dataset: DatasetKind::HourlyCostBudget,
                resource: ResourceId::new("R1"),
            })
        );
    }

    #[test]
    fn test_duplicate_exchange_rate() {
        let mut raw = base();
        raw.exchange_rates.push(ExchangeRateRow {
            currency: CurrencyCode::new("eur"),
            standard_rate: dec!(1),
            actual_rate: dec!(1),
        });
        assert_eq!(
            ReferenceData::from_datasets(&raw),
            Err(DatasetError::DuplicateExchangeRate(CurrencyCode::new("EUR")))
        );
    }

    #[test]
    fn test_non_positive_exchange_rate() {
        let mut raw = base();
        raw.exchange_rates[1].actual_rate = Decimal::ZERO;
        assert!(matches!(
            ReferenceData::from_datasets(&raw),
            Err(DatasetError::NonPositiveRate {
                dataset: DatasetKind::ExchangeRates,
                ..
            })
        ));
    }

    #[test]
    fn test_negative_hours() {
        let mut raw = base();
        raw.time_usage.push(usage(Scenario::Actual, "R1", dec!(-1)));
        assert!(matches!(
            ReferenceData::from_datasets(&raw),
            Err(DatasetError::NegativeValue { field: "hours", .. })
        ));
    }

    #[test]
    fn test_empty_sales() {
        let mut raw = base();
        raw.sales.clear();
        assert_eq!(
            ReferenceData::from_datasets(&raw),
            Err(DatasetError::EmptyDataset(DatasetKind::Sales))
        );
    }

    #[test]
    fn test_loaded_data_passes_validation() {
        let data = ReferenceData::from_datasets(&base()).unwrap();
        assert_eq!(data.validate(), Ok(()));
    }
}
