//! Raw dataset rows as they arrive from the input files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use scostamenti_shared::types::{ArticleId, CurrencyCode, CustomerId, MaterialId, ResourceId};

/// Which side of the comparison a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Planned figures.
    Budget,
    /// Realized figures (consuntivo).
    #[serde(alias = "consuntivo")]
    Actual,
}

impl Scenario {
    /// Both scenarios, budget first.
    pub const ALL: [Self; 2] = [Self::Budget, Self::Actual];

    /// Returns the other scenario.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Budget => Self::Actual,
            Self::Actual => Self::Budget,
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Budget => write!(f, "budget"),
            Self::Actual => write!(f, "actual"),
        }
    }
}

/// The seven datasets a run requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// Customer master data (currency per customer).
    Customers,
    /// Material consumption per article.
    Consumption,
    /// Budgeted hourly cost per resource.
    HourlyCostBudget,
    /// Actual hourly cost per resource.
    HourlyCostActual,
    /// Hours booked per resource.
    TimeUsage,
    /// Standard and actual exchange rates.
    ExchangeRates,
    /// Sales by article and customer.
    Sales,
}

impl DatasetKind {
    /// Every dataset, in the order they are listed to users.
    pub const ALL: [Self; 7] = [
        Self::Customers,
        Self::Consumption,
        Self::HourlyCostBudget,
        Self::HourlyCostActual,
        Self::TimeUsage,
        Self::ExchangeRates,
        Self::Sales,
    ];

    /// Canonical file stem (without extension).
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Consumption => "consumption",
            Self::HourlyCostBudget => "hourly_cost_budget",
            Self::HourlyCostActual => "hourly_cost_actual",
            Self::TimeUsage => "resource_time_usage",
            Self::ExchangeRates => "exchange_rates",
            Self::Sales => "sales",
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// A customer and the currency it is invoiced in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRow {
    /// Customer code.
    pub customer_id: CustomerId,
    /// Display name.
    pub name: String,
    /// Invoicing currency.
    pub currency: CurrencyCode,
}

/// A sales line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRow {
    /// Budget or actual.
    pub scenario: Scenario,
    /// Article sold.
    pub article_id: ArticleId,
    /// Customer invoiced.
    pub customer_id: CustomerId,
    /// Units sold.
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    /// Unit price in the customer's currency.
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
}

/// Material consumed per unit of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRow {
    /// Budget or actual.
    pub scenario: Scenario,
    /// Article the material goes into.
    pub article_id: ArticleId,
    /// Material code.
    pub material_id: MaterialId,
    /// Material quantity per unit of article.
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity_per_unit: Decimal,
    /// Material cost per unit of material, reporting currency.
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_cost: Decimal,
}

/// Hourly cost of a resource (one dataset per scenario).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCostRow {
    /// Resource code.
    pub resource_id: ResourceId,
    /// Production area code, e.g. `A20`.
    pub area_code: String,
    /// Cost per hour, reporting currency.
    #[serde(with = "rust_decimal::serde::str")]
    pub hourly_rate: Decimal,
}

/// Hours booked on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeUsageRow {
    /// Budget or actual.
    pub scenario: Scenario,
    /// Resource code.
    pub resource_id: ResourceId,
    /// Hours.
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
}

/// Standard and actual exchange rate of a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateRow {
    /// Currency code.
    pub currency: CurrencyCode,
    /// Rate used for the budget (1 unit of currency = rate reporting units).
    #[serde(with = "rust_decimal::serde::str")]
    pub standard_rate: Decimal,
    /// Rate observed in the period.
    #[serde(with = "rust_decimal::serde::str")]
    pub actual_rate: Decimal,
}

/// The complete input set of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDatasets {
    /// Customer master data.
    pub customers: Vec<CustomerRow>,
    /// Material consumption.
    pub consumption: Vec<ConsumptionRow>,
    /// Budgeted hourly resource cost.
    pub hourly_cost_budget: Vec<HourlyCostRow>,
    /// Actual hourly resource cost.
    pub hourly_cost_actual: Vec<HourlyCostRow>,
    /// Resource time usage.
    pub time_usage: Vec<TimeUsageRow>,
    /// Exchange rates.
    pub exchange_rates: Vec<ExchangeRateRow>,
    /// Sales.
    pub sales: Vec<SalesRow>,
}

impl RawDatasets {
    /// Number of rows in the given dataset.
    #[must_use]
    pub fn row_count(&self, kind: DatasetKind) -> usize {
        match kind {
            DatasetKind::Customers => self.customers.len(),
            DatasetKind::Consumption => self.consumption.len(),
            DatasetKind::HourlyCostBudget => self.hourly_cost_budget.len(),
            DatasetKind::HourlyCostActual => self.hourly_cost_actual.len(),
            DatasetKind::TimeUsage => self.time_usage.len(),
            DatasetKind::ExchangeRates => self.exchange_rates.len(),
            DatasetKind::Sales => self.sales.len(),
        }
    }
}
