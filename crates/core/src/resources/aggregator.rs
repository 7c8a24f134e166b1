//! Resource cost aggregation: per resource, per area, plant-wide.
//!
//! ```text
//! Budget         = standardHours × standardRate
//! EffectiveHours = actualHours   × standardRate
//! Actual         = actualHours   × actualRate
//! ```

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use scostamenti_shared::types::ResourceId;

use super::area::ProductionArea;
use super::error::ResourceError;
use crate::dataset::Resource;
use crate::variance::VarianceLine;

/// Cost of a resource (or group of resources) at the three cost stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostStages {
    /// Budgeted hours at budgeted rate.
    pub budget: Decimal,
    /// Actual hours at budgeted rate.
    pub effective_hours: Decimal,
    /// Actual hours at actual rate.
    pub actual: Decimal,
}

impl CostStages {
    /// Cost stages of a single resource.
    #[must_use]
    pub fn of(resource: &Resource) -> Self {
        Self {
            budget: resource.standard_hours * resource.standard_rate,
            effective_hours: resource.actual_hours * resource.standard_rate,
            actual: resource.actual_hours * resource.actual_rate,
        }
    }

    /// Effective-hours cost minus budget.
    #[must_use]
    pub fn efficiency_effect(&self) -> Decimal {
        self.effective_hours - self.budget
    }

    /// Actual cost minus effective-hours cost.
    #[must_use]
    pub fn rate_effect(&self) -> Decimal {
        self.actual - self.effective_hours
    }

    /// Actual minus budget.
    #[must_use]
    pub fn total_variance(&self) -> Decimal {
        self.actual - self.budget
    }

    /// Maps onto a four-stage line: no volume effect, efficiency as mix, rate as price.
    #[must_use]
    pub const fn to_variance_line(&self) -> VarianceLine {
        VarianceLine::new(self.budget, self.budget, self.effective_hours, self.actual)
    }
}

impl Add for CostStages {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            budget: self.budget + rhs.budget,
            effective_hours: self.effective_hours + rhs.effective_hours,
            actual: self.actual + rhs.actual,
        }
    }
}

impl Sum for CostStages {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Cost of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCost {
    /// Resource code.
    pub resource_id: ResourceId,
    /// Area the resource belongs to.
    pub area: ProductionArea,
    /// Budgeted hours.
    pub standard_hours: Decimal,
    /// Actual hours.
    pub actual_hours: Decimal,
    /// Budgeted hourly rate.
    pub standard_rate: Decimal,
    /// Actual hourly rate.
    pub actual_rate: Decimal,
    /// Cost at each stage.
    pub cost: CostStages,
}

/// Cost of one production area with its resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionAreaCostBreakdown {
    /// Production area.
    pub area: ProductionArea,
    /// Area total.
    pub cost: CostStages,
    /// Resources of the area, ordered by id.
    pub resources: Vec<ResourceCost>,
}

/// Resource cost of the whole plant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCostBreakdown {
    /// Areas with at least one resource, in area order.
    pub areas: Vec<ProductionAreaCostBreakdown>,
    /// Plant total.
    pub plant: CostStages,
}

impl ResourceCostBreakdown {
    /// Every resource row, in area then id order.
    pub fn resources(&self) -> impl Iterator<Item = &ResourceCost> {
        self.areas.iter().flat_map(|area| area.resources.iter())
    }
}

/// Builds the resource cost breakdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceCostAggregator;

impl ResourceCostAggregator {
    /// Aggregates resource costs bottom-up.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProductionArea` if a resource's area code is not a known area.
    pub fn aggregate(resources: &[Resource]) -> Result<ResourceCostBreakdown, ResourceError> {
        let mut costs = resources
            .iter()
            .map(|resource| {
                let area = resource
                    .area_code
                    .parse::<ProductionArea>()
                    .map_err(|_| ResourceError::UnknownProductionArea {
                        resource: resource.resource_id.clone(),
                        area_code: resource.area_code.clone(),
                    })?;
                Ok(ResourceCost {
                    resource_id: resource.resource_id.clone(),
                    area,
                    standard_hours: resource.standard_hours,
                    actual_hours: resource.actual_hours,
                    standard_rate: resource.standard_rate,
                    actual_rate: resource.actual_rate,
                    cost: CostStages::of(resource),
                })
            })
            .collect::<Result<Vec<_>, ResourceError>>()?;
        costs.sort_by(|a, b| a.resource_id.cmp(&b.resource_id));

        let mut areas = Vec::new();
        for area in ProductionArea::ALL {
            let members: Vec<ResourceCost> = costs.iter().filter(|c| c.area == area).cloned().collect();
            if members.is_empty() {
                continue;
            }
            areas.push(ProductionAreaCostBreakdown {
                area,
                cost: members.iter().map(|c| c.cost).sum(),
                resources: members,
            });
        }

        let plant = areas.iter().map(|a| a.cost).sum();
        Ok(ResourceCostBreakdown { areas, plant })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn resource(id: &str, area: &str, rates: (Decimal, Decimal), hours: (Decimal, Decimal)) -> Resource {
        Resource {
            resource_id: ResourceId::new(id),
            area_code: area.to_string(),
            standard_rate: rates.0,
            actual_rate: rates.1,
            standard_hours: hours.0,
            actual_hours: hours.1,
        }
    }

    #[test]
    fn test_turning_resource_costs() {
        let r = resource("TORN-01", "A20", (dec!(20), dec!(22)), (dec!(100), dec!(120)));
        let cost = CostStages::of(&r);
        assert_eq!(cost.budget, dec!(2000));
        assert_eq!(cost.effective_hours, dec!(2400));
        assert_eq!(cost.actual, dec!(2640));
        assert_eq!(cost.efficiency_effect(), dec!(400));
        assert_eq!(cost.rate_effect(), dec!(240));
        assert_eq!(cost.total_variance(), dec!(640));
    }

    #[test]
    fn test_variance_line_mapping() {
        let cost = CostStages {
            budget: dec!(2000),
            effective_hours: dec!(2400),
            actual: dec!(2640),
        };
        let line = cost.to_variance_line();
        assert_eq!(line.volume_effect(), Decimal::ZERO);
        assert_eq!(line.mix_effect(), cost.efficiency_effect());
        assert_eq!(line.price_effect(), cost.rate_effect());
    }

    #[test]
    fn test_aggregates_by_area_and_plant() {
        let breakdown = ResourceCostAggregator::aggregate(&[
            resource("R3", "A40", (dec!(10), dec!(10)), (dec!(5), dec!(5))),
            resource("R2", "A20", (dec!(30), dec!(30)), (dec!(10), dec!(12))),
            resource("R1", "A20", (dec!(20), dec!(22)), (dec!(100), dec!(120))),
        ])
        .unwrap();

        let areas: Vec<_> = breakdown.areas.iter().map(|a| a.area).collect();
        assert_eq!(areas, vec![ProductionArea::A20, ProductionArea::A40]);

        let turning = &breakdown.areas[0];
        assert_eq!(turning.resources[0].resource_id, ResourceId::new("R1"));
        assert_eq!(turning.cost.budget, dec!(2300));
        assert_eq!(turning.cost.actual, dec!(3000));

        assert_eq!(breakdown.plant.budget, dec!(2350));
        assert_eq!(breakdown.plant.actual, dec!(3050));
        assert_eq!(breakdown.resources().count(), 3);
    }

    #[test]
    fn test_unknown_area() {
        let result = ResourceCostAggregator::aggregate(&[resource(
            "R9",
            "B99",
            (dec!(1), dec!(1)),
            (dec!(1), dec!(1)),
        )]);
        assert_eq!(
            result,
            Err(ResourceError::UnknownProductionArea {
                resource: ResourceId::new("R9"),
                area_code: "B99".to_string(),
            })
        );
    }

    #[test]
    fn test_no_resources_is_empty_plant() {
        let breakdown = ResourceCostAggregator::aggregate(&[]).unwrap();
        assert!(breakdown.areas.is_empty());
        assert_eq!(breakdown.plant, CostStages::default());
    }
}
