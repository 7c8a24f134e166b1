//! Five-row budget vs actual summary.

use serde::{Deserialize, Serialize};

use crate::variance::{LineVariance, VarianceLine};

/// Rows of the summary table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryRow {
    /// Sales revenue.
    Revenue,
    /// Material cost of the goods sold.
    MaterialCost,
    /// Revenue minus material cost.
    MaterialMargin,
    /// Resource (labor and machine) cost.
    ResourceCost,
    /// Operating margin: revenue minus material and resource cost.
    Mol,
}

impl SummaryRow {
    /// Rows in display order.
    pub const ALL: [Self; 5] = [
        Self::Revenue,
        Self::MaterialCost,
        Self::MaterialMargin,
        Self::ResourceCost,
        Self::Mol,
    ];

    /// Row label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::MaterialCost => "Material Cost",
            Self::MaterialMargin => "Material Margin",
            Self::ResourceCost => "Resource Cost",
            Self::Mol => "MOL",
        }
    }

    /// True for cost rows, where a rise is unfavorable.
    #[must_use]
    pub const fn is_cost(self) -> bool {
        matches!(self, Self::MaterialCost | Self::ResourceCost)
    }
}

/// One row of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    /// Which row.
    pub row: SummaryRow,
    /// Values at the four stages.
    pub line: VarianceLine,
}

impl SummaryLine {
    /// Budget vs actual, signed for the row's nature.
    #[must_use]
    pub fn variance(&self) -> LineVariance {
        if self.row.is_cost() {
            LineVariance::for_cost(&self.line)
        } else {
            LineVariance::for_revenue(&self.line)
        }
    }
}

/// The five summary rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTable {
    /// Rows in display order.
    pub lines: Vec<SummaryLine>,
}

impl SummaryTable {
    /// Builds the summary from the three source lines.
    #[must_use]
    pub fn build(revenue: VarianceLine, material_cost: VarianceLine, resource_cost: VarianceLine) -> Self {
        let material_margin = revenue - material_cost;
        let mol = revenue - material_cost - resource_cost;

        let lines = SummaryRow::ALL
            .into_iter()
            .map(|row| SummaryLine {
                row,
                line: match row {
                    SummaryRow::Revenue => revenue,
                    SummaryRow::MaterialCost => material_cost,
                    SummaryRow::MaterialMargin => material_margin,
                    SummaryRow::ResourceCost => resource_cost,
                    SummaryRow::Mol => mol,
                },
            })
            .collect();

        Self { lines }
    }

    /// Line of a row.
    #[must_use]
    pub fn line(&self, row: SummaryRow) -> VarianceLine {
        self.lines
            .iter()
            .find(|l| l.row == row)
            .map(|l| l.line)
            .unwrap_or_default()
    }
}
