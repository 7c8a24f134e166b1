//! Four-stage variance lines.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stage of the budget-to-actual chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Budget quantities at standard price and rate.
    Budget,
    /// Actual total volume in budget mix, standard price and rate.
    StandardMix,
    /// Actual quantities, standard price, actual rate.
    EffectiveMix,
    /// Actual quantities, price and rate.
    Actual,
}

impl Stage {
    /// Stages in chain order.
    pub const ALL: [Self; 4] = [Self::Budget, Self::StandardMix, Self::EffectiveMix, Self::Actual];

    /// Column label used in exported tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::StandardMix => "Standard Mix",
            Self::EffectiveMix => "Effective Mix",
            Self::Actual => "Actual",
        }
    }
}

/// Values of one line at the four stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceLine {
    /// Budget value.
    pub budget: Decimal,
    /// Standard-mix value.
    pub standard_mix: Decimal,
    /// Effective-mix value.
    pub effective_mix: Decimal,
    /// Actual (consuntivo) value.
    pub actual: Decimal,
}

/// The three effects of a line and the total they explain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceEffects {
    /// Standard mix minus budget.
    pub volume: Decimal,
    /// Effective mix minus standard mix.
    pub mix: Decimal,
    /// Actual minus effective mix.
    pub price: Decimal,
    /// Actual minus budget.
    pub total: Decimal,
}

impl VarianceEffects {
    /// Sum of the three effects.
    #[must_use]
    pub fn sum(&self) -> Decimal {
        self.volume + self.mix + self.price
    }
}

impl VarianceLine {
    /// Creates a line from its four stage values.
    #[must_use]
    pub const fn new(budget: Decimal, standard_mix: Decimal, effective_mix: Decimal, actual: Decimal) -> Self {
        Self {
            budget,
            standard_mix,
            effective_mix,
            actual,
        }
    }

    /// Value at a stage.
    #[must_use]
    pub const fn value(&self, stage: Stage) -> Decimal {
        match stage {
            Stage::Budget => self.budget,
            Stage::StandardMix => self.standard_mix,
            Stage::EffectiveMix => self.effective_mix,
            Stage::Actual => self.actual,
        }
    }

    /// Standard mix minus budget.
    #[must_use]
    pub fn volume_effect(&self) -> Decimal {
        self.standard_mix - self.budget
    }

    /// Effective mix minus standard mix.
    #[must_use]
    pub fn mix_effect(&self) -> Decimal {
        self.effective_mix - self.standard_mix
    }

    /// Actual minus effective mix.
    #[must_use]
    pub fn price_effect(&self) -> Decimal {
        self.actual - self.effective_mix
    }

    /// Actual minus budget.
    #[must_use]
    pub fn total_variance(&self) -> Decimal {
        self.actual - self.budget
    }

    /// All effects at once.
    #[must_use]
    pub fn effects(&self) -> VarianceEffects {
        VarianceEffects {
            volume: self.volume_effect(),
            mix: self.mix_effect(),
            price: self.price_effect(),
            total: self.total_variance(),
        }
    }

    fn zip_with(self, rhs: Self, op: impl Fn(Decimal, Decimal) -> Decimal) -> Self {
        Self {
            budget: op(self.budget, rhs.budget),
            standard_mix: op(self.standard_mix, rhs.standard_mix),
            effective_mix: op(self.effective_mix, rhs.effective_mix),
            actual: op(self.actual, rhs.actual),
        }
    }
}

impl Add for VarianceLine {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for VarianceLine {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl AddAssign for VarianceLine {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for VarianceLine {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a Self> for VarianceLine {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Direction of a variance from the company's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceType {
    /// Revenue above budget, or cost below budget.
    Favorable,
    /// Revenue below budget, or cost above budget.
    Unfavorable,
    /// No variance.
    None,
}

/// Budget vs actual of a line, signed for its nature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineVariance {
    /// Budget value.
    pub budget_amount: Decimal,
    /// Actual value.
    pub actual_amount: Decimal,
    /// Actual minus budget.
    pub variance_amount: Decimal,
    /// Variance over budget, in percent (zero when the budget is zero).
    pub variance_percentage: Decimal,
    /// Favorable or not, given the line's nature.
    pub variance_type: VarianceType,
}

impl LineVariance {
    /// Variance of a cost line: under budget is favorable.
    #[must_use]
    pub fn for_cost(line: &VarianceLine) -> Self {
        Self::classify(line, true)
    }

    /// Variance of a revenue or margin line: over budget is favorable.
    #[must_use]
    pub fn for_revenue(line: &VarianceLine) -> Self {
        Self::classify(line, false)
    }

    fn classify(line: &VarianceLine, is_cost: bool) -> Self {
        let variance = line.total_variance();
        let percentage = if line.budget.is_zero() {
            Decimal::ZERO
        } else {
            (variance / line.budget.abs()) * Decimal::ONE_HUNDRED
        };

        let variance_type = if variance.is_zero() {
            VarianceType::None
        } else if variance.is_sign_positive() != is_cost {
            VarianceType::Favorable
        } else {
            VarianceType::Unfavorable
        };

        Self {
            budget_amount: line.budget,
            actual_amount: line.actual,
            variance_amount: variance,
            variance_percentage: percentage,
            variance_type,
        }
    }
}
