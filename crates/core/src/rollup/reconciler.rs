//! Consistency checks run on every analysis.
//!
//! A failed check never aborts the run: the mismatch is logged and attached to
//! the report, and the unreconciled values are kept.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use scostamenti_shared::types::Tolerance;
use thiserror::Error;
use tracing::warn;

use super::summary::{SummaryRow, SummaryTable};
use crate::resources::{CostStages, ResourceCostBreakdown};
use crate::variance::{Decomposition, Stage, VarianceLine};

/// A check whose two sides disagree beyond the tolerance.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Reconciliation check '{check}' failed: expected {expected}, got {actual}")]
pub struct ReconciliationMismatch {
    /// Name of the check, e.g. `revenue.items.actual`.
    pub check: String,
    /// Value the check expected.
    pub expected: Decimal,
    /// Value found.
    pub actual: Decimal,
}

/// Everything the reconciler looks at.
#[derive(Debug, Clone, Copy)]
pub struct ReconciliationInput<'a> {
    /// Five-row summary.
    pub summary: &'a SummaryTable,
    /// Revenue decomposition with per-item lines.
    pub revenue: &'a Decomposition,
    /// Material cost decomposition with per-item lines.
    pub material: &'a Decomposition,
    /// Resource cost breakdown.
    pub resources: &'a ResourceCostBreakdown,
}

/// Runs the consistency checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    tolerance: Tolerance,
}

impl Reconciler {
    /// Creates a reconciler with the given tolerance.
    #[must_use]
    pub const fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Runs every check and returns the failures, in check order.
    #[must_use]
    pub fn reconcile(&self, input: &ReconciliationInput<'_>) -> Vec<ReconciliationMismatch> {
        let mut mismatches = Vec::new();
        let mut check = |name: String, expected: Decimal, actual: Decimal| {
            if !self.tolerance.within(expected, actual) {
                mismatches.push(ReconciliationMismatch {
                    check: name,
                    expected,
                    actual,
                });
            }
        };

        for summary in &input.summary.lines {
            let effects = summary.line.effects();
            check(
                format!("summary.{}.effects", row_key(summary.row)),
                effects.total,
                effects.sum(),
            );
        }

        let revenue = input.summary.line(SummaryRow::Revenue).effects();
        let material = input.summary.line(SummaryRow::MaterialCost).effects();
        let resource = input.summary.line(SummaryRow::ResourceCost).effects();
        let mol = input.summary.line(SummaryRow::Mol).effects();
        check(
            "mol.linearity.volume".to_string(),
            revenue.volume - material.volume - resource.volume,
            mol.volume,
        );
        check(
            "mol.linearity.mix".to_string(),
            revenue.mix - material.mix - resource.mix,
            mol.mix,
        );
        check(
            "mol.linearity.price".to_string(),
            revenue.price - material.price - resource.price,
            mol.price,
        );

        for (name, decomposition) in [("revenue", input.revenue), ("material", input.material)] {
            let items: VarianceLine = decomposition.items.iter().map(|i| i.line).sum();
            for stage in Stage::ALL {
                check(
                    format!("{name}.items.{}", stage_key(stage)),
                    decomposition.total.value(stage),
                    items.value(stage),
                );
            }
        }

        for area in &input.resources.areas {
            let sum: CostStages = area.resources.iter().map(|r| r.cost).sum();
            for (stage, expected, actual) in cost_pairs(area.cost, sum) {
                check(format!("resources.{}.{stage}", area.area.code()), expected, actual);
            }
        }
        let areas: CostStages = input.resources.areas.iter().map(|a| a.cost).sum();
        for (stage, expected, actual) in cost_pairs(input.resources.plant, areas) {
            check(format!("resources.plant.{stage}"), expected, actual);
        }

        for mismatch in &mismatches {
            warn!(
                check = %mismatch.check,
                expected = %mismatch.expected,
                actual = %mismatch.actual,
                "Reconciliation mismatch"
            );
        }
        mismatches
    }
}

const fn row_key(row: SummaryRow) -> &'static str {
    match row {
        SummaryRow::Revenue => "revenue",
        SummaryRow::MaterialCost => "material_cost",
        SummaryRow::MaterialMargin => "material_margin",
        SummaryRow::ResourceCost => "resource_cost",
        SummaryRow::Mol => "mol",
    }
}

const fn stage_key(stage: Stage) -> &'static str {
    match stage {
        Stage::Budget => "budget",
        Stage::StandardMix => "standard_mix",
        Stage::EffectiveMix => "effective_mix",
        Stage::Actual => "actual",
    }
}

fn cost_pairs(expected: CostStages, actual: CostStages) -> [(&'static str, Decimal, Decimal); 3] {
    [
        ("budget", expected.budget, actual.budget),
        ("effective_hours", expected.effective_hours, actual.effective_hours),
        ("actual", expected.actual, actual.actual),
    ]
}
