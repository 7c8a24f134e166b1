//! Volume and mix calculation.
//!
//! Mix share is an item's quantity over the column total. The standard-mix
//! quantity redistributes the actual total volume with the budget shares:
//! it is what each item would have sold had the budget mix held.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::MixError;

/// Quantity column a share is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixColumn {
    /// Budgeted quantities.
    Budget,
    /// Actual quantities.
    Actual,
}

impl std::fmt::Display for MixColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Budget => write!(f, "budget"),
            Self::Actual => write!(f, "actual"),
        }
    }
}

/// Volume and mix figures of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMixEntry {
    /// Budgeted quantity.
    pub budget_quantity: Decimal,
    /// Actual quantity.
    pub actual_quantity: Decimal,
    /// Share of the budget total.
    pub budget_share: Decimal,
    /// Share of the actual total.
    pub actual_share: Decimal,
    /// Budget share applied to the actual total.
    pub standard_mix_quantity: Decimal,
    /// Actual quantity (the effective mix).
    pub effective_mix_quantity: Decimal,
}

/// Volume and mix figures of a set of items, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMix {
    /// Sum of budgeted quantities.
    pub budget_total: Decimal,
    /// Sum of actual quantities.
    pub actual_total: Decimal,
    /// One entry per input item.
    pub entries: Vec<VolumeMixEntry>,
}

/// Computes mix shares and anchor quantities.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixCalculator;

impl MixCalculator {
    /// Computes volume and mix for `(budget_quantity, actual_quantity)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `ZeroVolumeBase` if either column sums to zero.
    pub fn calculate<I>(items: I) -> Result<VolumeMix, MixError>
    where
        I: IntoIterator<Item = (Decimal, Decimal)>,
    {
        let quantities: Vec<(Decimal, Decimal)> = items.into_iter().collect();
        let budget_total: Decimal = quantities.iter().map(|(b, _)| *b).sum();
        let actual_total: Decimal = quantities.iter().map(|(_, a)| *a).sum();

        if budget_total.is_zero() {
            return Err(MixError::ZeroVolumeBase {
                column: MixColumn::Budget,
            });
        }
        if actual_total.is_zero() {
            return Err(MixError::ZeroVolumeBase {
                column: MixColumn::Actual,
            });
        }

        let entries = quantities
            .into_iter()
            .map(|(budget_quantity, actual_quantity)| VolumeMixEntry {
                budget_quantity,
                actual_quantity,
                budget_share: budget_quantity / budget_total,
                actual_share: actual_quantity / actual_total,
                // multiply first so the value is exact when the totals match
                standard_mix_quantity: budget_quantity * actual_total / budget_total,
                effective_mix_quantity: actual_quantity,
            })
            .collect();

        Ok(VolumeMix {
            budget_total,
            actual_total,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_shares_and_standard_mix() {
        let mix = MixCalculator::calculate([(dec!(100), dec!(120)), (dec!(50), dec!(40))]).unwrap();
        assert_eq!(mix.budget_total, dec!(150));
        assert_eq!(mix.actual_total, dec!(160));

        let a = mix.entries[0];
        assert_eq!(a.actual_share, dec!(0.75));
        assert_eq!(a.effective_mix_quantity, dec!(120));
        // 100 * 160 / 150
        assert_eq!(a.standard_mix_quantity.round_dp(6), dec!(106.666667));

        let b = mix.entries[1];
        assert_eq!(b.actual_share, dec!(0.25));
        assert_eq!(
            (a.standard_mix_quantity + b.standard_mix_quantity).round_dp(20),
            dec!(160)
        );
    }

    #[test]
    fn test_standard_mix_equals_budget_when_totals_match() {
        let mix = MixCalculator::calculate([(dec!(30), dec!(10)), (dec!(70), dec!(90))]).unwrap();
        assert_eq!(mix.entries[0].standard_mix_quantity, dec!(30));
        assert_eq!(mix.entries[1].standard_mix_quantity, dec!(70));
    }

    #[test]
    fn test_zero_budget_column() {
        let result = MixCalculator::calculate([(dec!(0), dec!(5))]);
        assert_eq!(
            result,
            Err(MixError::ZeroVolumeBase {
                column: MixColumn::Budget
            })
        );
    }

    #[test]
    fn test_zero_actual_column() {
        let result = MixCalculator::calculate([(dec!(5), dec!(0)), (dec!(1), dec!(0))]);
        assert_eq!(
            result,
            Err(MixError::ZeroVolumeBase {
                column: MixColumn::Actual
            })
        );
    }

    #[test]
    fn test_empty_input_is_zero_volume() {
        let result = MixCalculator::calculate(std::iter::empty());
        assert!(matches!(result, Err(MixError::ZeroVolumeBase { .. })));
    }
}
