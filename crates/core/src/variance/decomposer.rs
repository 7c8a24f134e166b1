//! Budget to actual decomposition of a set of items.
//!
//! ```text
//! Budget       = Σ budgetQty      × budget unit value
//! StandardMix  = Σ standardMixQty × standard-mix unit value
//! EffectiveMix = Σ actualQty      × effective-mix unit value
//! Actual       = Σ actualQty      × actual unit value
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line::VarianceLine;
use crate::currency::StageUnitValues;
use crate::mix::{MixCalculator, MixError, VolumeMixEntry};

/// One item to decompose: its quantities and stage unit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompositionItem {
    /// Budgeted quantity.
    pub budget_quantity: Decimal,
    /// Actual quantity.
    pub actual_quantity: Decimal,
    /// Unit value at each stage.
    pub unit_values: StageUnitValues,
}

/// Mix figures and variance line of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDecomposition {
    /// Volume and mix of the item.
    pub mix: VolumeMixEntry,
    /// Contribution of the item at each stage.
    pub line: VarianceLine,
}

/// Result of a decomposition, items in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Sum of budgeted quantities.
    pub budget_volume: Decimal,
    /// Sum of actual quantities.
    pub actual_volume: Decimal,
    /// Per-item contributions.
    pub items: Vec<ItemDecomposition>,
    /// Sum of the item lines.
    pub total: VarianceLine,
}

/// Chains items through the four stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decomposer;

impl Decomposer {
    /// Decomposes a set of items.
    ///
    /// # Errors
    ///
    /// Returns `ZeroVolumeBase` if the budget or actual quantities sum to zero.
    pub fn decompose(items: &[DecompositionItem]) -> Result<Decomposition, MixError> {
        let volume_mix = MixCalculator::calculate(
            items
                .iter()
                .map(|item| (item.budget_quantity, item.actual_quantity)),
        )?;

        let items: Vec<ItemDecomposition> = items
            .iter()
            .zip(volume_mix.entries)
            .map(|(item, mix)| {
                let units = item.unit_values;
                let line = VarianceLine::new(
                    mix.budget_quantity * units.budget,
                    mix.standard_mix_quantity * units.standard_mix,
                    mix.effective_mix_quantity * units.effective_mix,
                    mix.effective_mix_quantity * units.actual,
                );
                ItemDecomposition { mix, line }
            })
            .collect();

        let total = items.iter().map(|item| item.line).sum();

        Ok(Decomposition {
            budget_volume: volume_mix.budget_total,
            actual_volume: volume_mix.actual_total,
            items,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(budget_quantity: Decimal, actual_quantity: Decimal, unit: Decimal) -> DecompositionItem {
        DecompositionItem {
            budget_quantity,
            actual_quantity,
            unit_values: StageUnitValues {
                budget: unit,
                standard_mix: unit,
                effective_mix: unit,
                actual: unit,
            },
        }
    }

    #[test]
    fn test_pure_volume_change() {
        let result = Decomposer::decompose(&[item(dec!(100), dec!(110), dec!(10))]).unwrap();
        let total = result.total;
        assert_eq!(total.budget, dec!(1000));
        assert_eq!(total.actual, dec!(1100));
        assert_eq!(total.volume_effect(), dec!(100));
        assert_eq!(total.mix_effect(), dec!(0));
        assert_eq!(total.price_effect(), dec!(0));
    }

    #[test]
    fn test_pure_mix_change() {
        // same total volume, shifted toward the dearer item
        let result = Decomposer::decompose(&[
            item(dec!(50), dec!(30), dec!(10)),
            item(dec!(50), dec!(70), dec!(20)),
        ])
        .unwrap();
        let total = result.total;
        assert_eq!(total.volume_effect(), dec!(0));
        assert_eq!(total.mix_effect(), dec!(200));
        assert_eq!(total.price_effect(), dec!(0));
        assert_eq!(result.budget_volume, result.actual_volume);
    }

    #[test]
    fn test_items_foot_to_total() {
        let result = Decomposer::decompose(&[
            item(dec!(7), dec!(3), dec!(1.5)),
            item(dec!(11), dec!(13), dec!(2.25)),
        ])
        .unwrap();
        let sum: VarianceLine = result.items.iter().map(|i| i.line).sum();
        assert_eq!(sum, result.total);
    }

    #[test]
    fn test_zero_volume_propagates() {
        let result = Decomposer::decompose(&[item(dec!(0), dec!(0), dec!(1))]);
        assert!(matches!(result, Err(MixError::ZeroVolumeBase { .. })));
    }
}
