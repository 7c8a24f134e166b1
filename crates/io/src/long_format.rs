//! Long ("melted") table layout for grouped bar charts.
//!
//! Every value becomes one `(category, series, value)` row: the category is
//! the x-axis group and the series the bar within the group.

use rust_decimal::Decimal;
use scostamenti_core::resources::{CostStages, ResourceCostBreakdown};
use scostamenti_core::rollup::SummaryTable;
use scostamenti_core::variance::Stage;
use serde::{Deserialize, Serialize};

/// One row of a long table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongRow {
    /// Group on the x axis.
    pub category: String,
    /// Bar within the group.
    pub series: String,
    /// Bar height.
    pub value: Decimal,
}

impl LongRow {
    fn new(category: impl Into<String>, series: impl Into<String>, value: Decimal) -> Self {
        Self {
            category: category.into(),
            series: series.into(),
            value,
        }
    }
}

/// Summary rows by stage: one category per summary row, one series per stage.
#[must_use]
pub fn summary_long(summary: &SummaryTable) -> Vec<LongRow> {
    summary
        .lines
        .iter()
        .flat_map(|line| {
            Stage::ALL
                .into_iter()
                .map(move |stage| LongRow::new(line.row.label(), stage.label(), line.line.value(stage)))
        })
        .collect()
}

fn cost_rows(category: &str, cost: CostStages) -> [LongRow; 3] {
    [
        LongRow::new(category, "Budget", cost.budget),
        LongRow::new(category, "Effective Hours", cost.effective_hours),
        LongRow::new(category, "Actual", cost.actual),
    ]
}

/// Area costs by stage: one category per area.
#[must_use]
pub fn area_costs_long(breakdown: &ResourceCostBreakdown) -> Vec<LongRow> {
    breakdown
        .areas
        .iter()
        .flat_map(|area| cost_rows(area.area.code(), area.cost))
        .collect()
}

/// Resource costs by stage: one category per resource.
#[must_use]
pub fn resource_costs_long(breakdown: &ResourceCostBreakdown) -> Vec<LongRow> {
    breakdown
        .resources()
        .flat_map(|resource| cost_rows(resource.resource_id.as_str(), resource.cost))
        .collect()
}
