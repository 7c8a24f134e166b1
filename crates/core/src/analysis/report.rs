//! Analysis report and its tables.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use scostamenti_shared::types::{ArticleId, CurrencyCode};
use uuid::Uuid;

use crate::grouping::{ShareEntry, ShareTable};
use crate::resources::ResourceCostBreakdown;
use crate::rollup::{ReconciliationMismatch, SummaryTable};

/// Volume and mix of one article, quantities summed across currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMixRow {
    /// Article number.
    pub article_id: ArticleId,
    /// Budgeted quantity.
    pub budget_quantity: Decimal,
    /// Actual quantity.
    pub actual_quantity: Decimal,
    /// Share of the budget volume.
    pub budget_mix: Decimal,
    /// Share of the actual volume.
    pub actual_mix: Decimal,
    /// Actual volume in budget mix.
    pub standard_mix_quantity: Decimal,
}

/// Price and exchange-rate variance of one article/currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceVarianceRow {
    /// Article number.
    pub article_id: ArticleId,
    /// Invoicing currency.
    pub currency: CurrencyCode,
    /// Budgeted quantity.
    pub budget_quantity: Decimal,
    /// Actual quantity.
    pub actual_quantity: Decimal,
    /// Standard unit price, foreign currency.
    pub standard_price: Decimal,
    /// Actual unit price, foreign currency.
    pub actual_price: Decimal,
    /// Standard exchange rate.
    pub standard_rate: Decimal,
    /// Actual exchange rate.
    pub actual_rate: Decimal,
    /// Budget revenue, reporting currency.
    pub budget_revenue: Decimal,
    /// Actual revenue, reporting currency.
    pub actual_revenue: Decimal,
    /// Actual quantity times the unit exchange delta.
    pub exchange_effect: Decimal,
    /// Actual quantity times the unit price delta.
    pub price_effect: Decimal,
}

/// Material cost of one article at the four stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialCostRow {
    /// Article number.
    pub article_id: ArticleId,
    /// Budgeted quantity.
    pub budget_quantity: Decimal,
    /// Actual quantity.
    pub actual_quantity: Decimal,
    /// Standard unit material cost.
    pub standard_unit_cost: Decimal,
    /// Actual unit material cost.
    pub actual_unit_cost: Decimal,
    /// Budget cost.
    pub budget_cost: Decimal,
    /// Standard-mix cost.
    pub standard_mix_cost: Decimal,
    /// Effective-mix cost.
    pub effective_mix_cost: Decimal,
    /// Actual cost.
    pub actual_cost: Decimal,
}

/// Column a share table can be derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareColumn {
    /// Budgeted quantity per article.
    BudgetVolume,
    /// Actual quantity per article.
    ActualVolume,
    /// Budget mix per article.
    BudgetMix,
    /// Actual mix per article.
    ActualMix,
    /// Budget resource cost per area.
    BudgetAreaCost,
    /// Actual resource cost per area.
    ActualAreaCost,
}

impl ShareColumn {
    /// Every column.
    pub const ALL: [Self; 6] = [
        Self::BudgetVolume,
        Self::ActualVolume,
        Self::BudgetMix,
        Self::ActualMix,
        Self::BudgetAreaCost,
        Self::ActualAreaCost,
    ];

    /// Stable name, used for file names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BudgetVolume => "budget_volume",
            Self::ActualVolume => "actual_volume",
            Self::BudgetMix => "budget_mix",
            Self::ActualMix => "actual_mix",
            Self::BudgetAreaCost => "budget_area_cost",
            Self::ActualAreaCost => "actual_area_cost",
        }
    }
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Identifier of the run.
    pub run_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Fingerprint of the raw input set, when the run started from raw datasets.
    pub input_fingerprint: Option<String>,
    /// Five-row summary.
    pub summary: SummaryTable,
    /// Volume and mix per article.
    pub volume_mix: Vec<VolumeMixRow>,
    /// Price and exchange variance per article/currency.
    pub price_variance: Vec<PriceVarianceRow>,
    /// Material cost per article.
    pub material_costs: Vec<MaterialCostRow>,
    /// Resource cost per area and resource.
    pub resource_costs: ResourceCostBreakdown,
    /// Failed consistency checks.
    pub warnings: Vec<ReconciliationMismatch>,
}

impl AnalysisReport {
    /// True if every consistency check passed.
    #[must_use]
    pub fn is_reconciled(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Derives the share table of a column (ungrouped).
    #[must_use]
    pub fn share_table(&self, column: ShareColumn) -> ShareTable {
        let by_article = |value: fn(&VolumeMixRow) -> Decimal| -> ShareTable {
            self.volume_mix
                .iter()
                .map(|row| ShareEntry::new(row.article_id.as_str(), value(row)))
                .collect()
        };
        let by_area = |actual: bool| -> ShareTable {
            self.resource_costs
                .areas
                .iter()
                .map(|area| {
                    let value = if actual { area.cost.actual } else { area.cost.budget };
                    ShareEntry::new(area.area.code(), value)
                })
                .collect()
        };

        match column {
            ShareColumn::BudgetVolume => by_article(|row| row.budget_quantity),
            ShareColumn::ActualVolume => by_article(|row| row.actual_quantity),
            ShareColumn::BudgetMix => by_article(|row| row.budget_mix),
            ShareColumn::ActualMix => by_article(|row| row.actual_mix),
            ShareColumn::BudgetAreaCost => by_area(false),
            ShareColumn::ActualAreaCost => by_area(true),
        }
    }
}
