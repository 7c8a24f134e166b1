//! End-to-end analysis pipeline.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use scostamenti_shared::config::AnalysisConfig;
use scostamenti_shared::types::{ArticleId, Tolerance};
use tracing::{debug, info};
use uuid::Uuid;

use super::error::AnalysisError;
use super::fingerprint::InputFingerprint;
use super::report::{AnalysisReport, MaterialCostRow, PriceVarianceRow, VolumeMixRow};
use crate::currency::{PriceResolution, PriceResolver, StageUnitValues};
use crate::dataset::{MaterialCost, RawDatasets, ReferenceData};
use crate::resources::ResourceCostAggregator;
use crate::rollup::{ReconciliationInput, Reconciler, SummaryRow, SummaryTable};
use crate::variance::{Decomposer, Decomposition, DecompositionItem};

/// Runs the variance analysis.
///
/// Each run is a single synchronous pass; nothing is carried over between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisEngine {
    tolerance: Tolerance,
}

impl AnalysisEngine {
    /// Creates an engine with the given reconciliation tolerance.
    #[must_use]
    pub const fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Creates an engine from configuration.
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(Tolerance::new(config.tolerance))
    }

    /// Reconciliation tolerance.
    #[must_use]
    pub const fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Loads the raw datasets and runs the analysis, stamping the report with
    /// the input fingerprint.
    ///
    /// # Errors
    ///
    /// Returns an error if the datasets are invalid or the analysis cannot be computed.
    pub fn run_datasets(&self, datasets: &RawDatasets) -> Result<AnalysisReport, AnalysisError> {
        let fingerprint = InputFingerprint::of(datasets)?;
        let data = ReferenceData::from_datasets(datasets)?;
        let mut report = self.run(&data)?;
        report.input_fingerprint = Some(fingerprint.into());
        Ok(report)
    }

    /// Runs the analysis over reference data.
    ///
    /// # Errors
    ///
    /// Returns an error if a record invariant is violated, an exchange rate is
    /// missing, a volume column sums to zero, or a resource has an unknown area.
    pub fn run(&self, data: &ReferenceData) -> Result<AnalysisReport, AnalysisError> {
        data.validate()?;

        let resolutions = PriceResolver::new(&data.exchange_rates).resolve_all(&data.articles)?;
        let revenue = Decomposer::decompose(&revenue_items(&resolutions, data))?;

        let material_rows = article_totals(data);
        let material = Decomposer::decompose(
            &material_rows
                .values()
                .map(|(quantities, units)| DecompositionItem {
                    budget_quantity: quantities.0,
                    actual_quantity: quantities.1,
                    unit_values: *units,
                })
                .collect::<Vec<_>>(),
        )?;

        let resource_costs = ResourceCostAggregator::aggregate(&data.resources)?;

        let summary = SummaryTable::build(
            revenue.total,
            material.total,
            resource_costs.plant.to_variance_line(),
        );
        let warnings = Reconciler::new(self.tolerance).reconcile(&ReconciliationInput {
            summary: &summary,
            revenue: &revenue,
            material: &material,
            resources: &resource_costs,
        });

        let mol = summary.line(SummaryRow::Mol);
        info!(
            articles = data.articles.len(),
            resources = data.resources.len(),
            budget_mol = %mol.budget,
            actual_mol = %mol.actual,
            warnings = warnings.len(),
            "Variance analysis completed"
        );

        Ok(AnalysisReport {
            run_id: Uuid::now_v7(),
            generated_at: Utc::now(),
            input_fingerprint: None,
            volume_mix: volume_mix_rows(&material_rows, &material),
            price_variance: price_variance_rows(&resolutions, data, &revenue),
            material_costs: material_cost_rows(&material_rows, &material),
            summary,
            resource_costs,
            warnings,
        })
    }
}

fn revenue_items(resolutions: &[PriceResolution], data: &ReferenceData) -> Vec<DecompositionItem> {
    resolutions
        .iter()
        .zip(&data.articles)
        .map(|(resolution, article)| DecompositionItem {
            budget_quantity: article.budget_quantity,
            actual_quantity: article.actual_quantity,
            unit_values: resolution.unit_values,
        })
        .collect()
}

/// Per-article quantities summed across currencies, with material unit costs.
type ArticleTotals = BTreeMap<ArticleId, ((Decimal, Decimal), StageUnitValues)>;

fn article_totals(data: &ReferenceData) -> ArticleTotals {
    let costs: BTreeMap<&ArticleId, &MaterialCost> = data
        .material_costs
        .iter()
        .map(|cost| (&cost.article_id, cost))
        .collect();

    let mut totals = ArticleTotals::new();
    for article in &data.articles {
        let entry = totals.entry(article.article_id.clone()).or_insert_with(|| {
            let units = costs
                .get(&article.article_id)
                .map(|cost| StageUnitValues::for_cost(cost))
                .unwrap_or_default();
            ((Decimal::ZERO, Decimal::ZERO), units)
        });
        entry.0.0 += article.budget_quantity;
        entry.0.1 += article.actual_quantity;
    }
    debug!(articles = totals.len(), "Article totals for material cost");
    totals
}

fn volume_mix_rows(totals: &ArticleTotals, material: &Decomposition) -> Vec<VolumeMixRow> {
    totals
        .keys()
        .zip(&material.items)
        .map(|(article_id, item)| VolumeMixRow {
            article_id: article_id.clone(),
            budget_quantity: item.mix.budget_quantity,
            actual_quantity: item.mix.actual_quantity,
            budget_mix: item.mix.budget_share,
            actual_mix: item.mix.actual_share,
            standard_mix_quantity: item.mix.standard_mix_quantity,
        })
        .collect()
}

fn price_variance_rows(
    resolutions: &[PriceResolution],
    data: &ReferenceData,
    revenue: &Decomposition,
) -> Vec<PriceVarianceRow> {
    resolutions
        .iter()
        .zip(&data.articles)
        .zip(&revenue.items)
        .map(|((resolution, article), item)| PriceVarianceRow {
            article_id: resolution.article_id.clone(),
            currency: resolution.currency.clone(),
            budget_quantity: article.budget_quantity,
            actual_quantity: article.actual_quantity,
            standard_price: resolution.standard_price,
            actual_price: resolution.actual_price,
            standard_rate: resolution.standard_rate,
            actual_rate: resolution.actual_rate,
            budget_revenue: item.line.budget,
            actual_revenue: item.line.actual,
            exchange_effect: article.actual_quantity * resolution.unit_exchange_delta(),
            price_effect: article.actual_quantity * resolution.unit_price_delta(),
        })
        .collect()
}

fn material_cost_rows(totals: &ArticleTotals, material: &Decomposition) -> Vec<MaterialCostRow> {
    totals
        .iter()
        .zip(&material.items)
        .map(|((article_id, (_, units)), item)| MaterialCostRow {
            article_id: article_id.clone(),
            budget_quantity: item.mix.budget_quantity,
            actual_quantity: item.mix.actual_quantity,
            standard_unit_cost: units.budget,
            actual_unit_cost: units.actual,
            budget_cost: item.line.budget,
            standard_mix_cost: item.line.standard_mix,
            effective_mix_cost: item.line.effective_mix,
            actual_cost: item.line.actual,
        })
        .collect()
}
