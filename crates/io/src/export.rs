//! Writes an analysis report as CSV tables plus a JSON document.
//!
//! Figures are rounded with banker's rounding at this point only; the report
//! itself keeps full precision. Mix shares keep four more decimal places than
//! the monetary columns.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use scostamenti_core::analysis::{AnalysisReport, ShareColumn};
use scostamenti_core::grouping::ShareEntry;
use scostamenti_core::resources::CostStages;
use scostamenti_core::variance::VarianceType;
use scostamenti_shared::config::AnalysisConfig;
use scostamenti_shared::types::round_half_even;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{IoError, IoResult};
use crate::long_format::{LongRow, area_costs_long, resource_costs_long, summary_long};

/// Extra decimal places kept for mix shares.
const SHARE_EXTRA_PLACES: u32 = 4;

/// Label of the plant total row in the area cost table.
const PLANT_LABEL: &str = "Plant";

// Column names, written even when a table has no rows.
const SUMMARY_HEADER: &[&str] = &[
    "row",
    "budget",
    "standard_mix",
    "effective_mix",
    "actual",
    "volume_effect",
    "mix_effect",
    "price_effect",
    "total_variance",
    "variance_percentage",
    "variance_type",
];
const VOLUME_MIX_HEADER: &[&str] = &[
    "article_id",
    "budget_quantity",
    "actual_quantity",
    "budget_mix",
    "actual_mix",
    "standard_mix_quantity",
];
const PRICE_VARIANCE_HEADER: &[&str] = &[
    "article_id",
    "currency",
    "budget_quantity",
    "actual_quantity",
    "standard_price",
    "actual_price",
    "standard_rate",
    "actual_rate",
    "budget_revenue",
    "actual_revenue",
    "exchange_effect",
    "price_effect",
];
const MATERIAL_COST_HEADER: &[&str] = &[
    "article_id",
    "budget_quantity",
    "actual_quantity",
    "standard_unit_cost",
    "actual_unit_cost",
    "budget_cost",
    "standard_mix_cost",
    "effective_mix_cost",
    "actual_cost",
];
const AREA_COST_HEADER: &[&str] = &[
    "area",
    "description",
    "budget",
    "effective_hours",
    "actual",
    "efficiency_effect",
    "rate_effect",
    "total_variance",
];
const RESOURCE_COST_HEADER: &[&str] = &[
    "resource_id",
    "area",
    "standard_hours",
    "actual_hours",
    "standard_rate",
    "actual_rate",
    "budget",
    "effective_hours",
    "actual",
    "efficiency_effect",
    "rate_effect",
];
const SHARE_HEADER: &[&str] = &["label", "value", "share_percent"];
const LONG_HEADER: &[&str] = &["category", "series", "value"];
const WARNING_HEADER: &[&str] = &["check", "expected", "actual"];

#[derive(Serialize)]
struct SummaryCsvRow<'a> {
    row: &'a str,
    budget: Decimal,
    standard_mix: Decimal,
    effective_mix: Decimal,
    actual: Decimal,
    volume_effect: Decimal,
    mix_effect: Decimal,
    price_effect: Decimal,
    total_variance: Decimal,
    variance_percentage: Decimal,
    variance_type: VarianceType,
}

#[derive(Serialize)]
struct AreaCostCsvRow<'a> {
    area: &'a str,
    description: &'a str,
    budget: Decimal,
    effective_hours: Decimal,
    actual: Decimal,
    efficiency_effect: Decimal,
    rate_effect: Decimal,
    total_variance: Decimal,
}

#[derive(Serialize)]
struct ResourceCostCsvRow<'a> {
    resource_id: &'a str,
    area: &'a str,
    standard_hours: Decimal,
    actual_hours: Decimal,
    standard_rate: Decimal,
    actual_rate: Decimal,
    budget: Decimal,
    effective_hours: Decimal,
    actual: Decimal,
    efficiency_effect: Decimal,
    rate_effect: Decimal,
}

#[derive(Serialize)]
struct ShareCsvRow<'a> {
    label: &'a str,
    value: Decimal,
    share_percent: Decimal,
}

/// Writes report tables into an output directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    decimal_places: u32,
    grouped_shares: bool,
}

impl Exporter {
    /// Creates an exporter writing to `output_dir` with two decimal places.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            decimal_places: 2,
            grouped_shares: false,
        }
    }

    /// Creates an exporter using the configured decimal places.
    #[must_use]
    pub fn from_config(output_dir: impl Into<PathBuf>, config: &AnalysisConfig) -> Self {
        Self::new(output_dir).with_decimal_places(config.output_decimal_places)
    }

    /// Sets the number of decimal places of exported figures.
    #[must_use]
    pub const fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Collapses small shares into "Other" in the share tables.
    #[must_use]
    pub const fn with_grouped_shares(mut self, grouped: bool) -> Self {
        self.grouped_shares = grouped;
        self
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes every table of `report` and returns the written paths.
    ///
    /// # Errors
    ///
    /// Returns `Write` if the directory or a file cannot be written and
    /// `Json` if the report cannot be serialized.
    pub fn export(&self, report: &AnalysisReport) -> IoResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir).map_err(|err| IoError::Write {
            path: self.output_dir.clone(),
            message: err.to_string(),
        })?;

        let mut written = vec![
            self.write_summary(report)?,
            self.write_volume_mix(report)?,
            self.write_price_variance(report)?,
            self.write_material_costs(report)?,
            self.write_area_costs(report)?,
            self.write_resource_costs(report)?,
        ];
        for column in ShareColumn::ALL {
            written.push(self.write_shares(report, column)?);
        }
        written.push(self.write_long("summary_chart.csv", &summary_long(&report.summary))?);
        written.push(self.write_long("area_costs_chart.csv", &area_costs_long(&report.resource_costs))?);
        written.push(self.write_long(
            "resource_costs_chart.csv",
            &resource_costs_long(&report.resource_costs),
        )?);
        written.push(self.write_csv("warnings.csv", WARNING_HEADER, &report.warnings)?);
        written.push(self.write_json(report)?);

        info!(
            dir = %self.output_dir.display(),
            files = written.len(),
            run_id = %report.run_id,
            "Report exported"
        );
        Ok(written)
    }

    fn round(&self, value: Decimal) -> Decimal {
        round_half_even(value, self.decimal_places)
    }

    fn round_share(&self, value: Decimal) -> Decimal {
        round_half_even(value, self.decimal_places + SHARE_EXTRA_PLACES)
    }

    fn write_summary(&self, report: &AnalysisReport) -> IoResult<PathBuf> {
        let rows: Vec<_> = report
            .summary
            .lines
            .iter()
            .map(|summary| {
                let line = summary.line;
                let variance = summary.variance();
                SummaryCsvRow {
                    row: summary.row.label(),
                    budget: self.round(line.budget),
                    standard_mix: self.round(line.standard_mix),
                    effective_mix: self.round(line.effective_mix),
                    actual: self.round(line.actual),
                    volume_effect: self.round(line.volume_effect()),
                    mix_effect: self.round(line.mix_effect()),
                    price_effect: self.round(line.price_effect()),
                    total_variance: self.round(line.total_variance()),
                    variance_percentage: self.round(variance.variance_percentage),
                    variance_type: variance.variance_type,
                }
            })
            .collect();
        self.write_csv("summary.csv", SUMMARY_HEADER, &rows)
    }

    fn write_volume_mix(&self, report: &AnalysisReport) -> IoResult<PathBuf> {
        let rows: Vec<_> = report
            .volume_mix
            .iter()
            .cloned()
            .map(|mut row| {
                row.budget_quantity = self.round(row.budget_quantity);
                row.actual_quantity = self.round(row.actual_quantity);
                row.budget_mix = self.round_share(row.budget_mix);
                row.actual_mix = self.round_share(row.actual_mix);
                row.standard_mix_quantity = self.round(row.standard_mix_quantity);
                row
            })
            .collect();
        self.write_csv("volume_mix.csv", VOLUME_MIX_HEADER, &rows)
    }

    fn write_price_variance(&self, report: &AnalysisReport) -> IoResult<PathBuf> {
        let rows: Vec<_> = report
            .price_variance
            .iter()
            .cloned()
            .map(|mut row| {
                row.budget_quantity = self.round(row.budget_quantity);
                row.actual_quantity = self.round(row.actual_quantity);
                row.standard_price = self.round(row.standard_price);
                row.actual_price = self.round(row.actual_price);
                row.budget_revenue = self.round(row.budget_revenue);
                row.actual_revenue = self.round(row.actual_revenue);
                row.exchange_effect = self.round(row.exchange_effect);
                row.price_effect = self.round(row.price_effect);
                row
            })
            .collect();
        self.write_csv("price_variance.csv", PRICE_VARIANCE_HEADER, &rows)
    }

    fn write_material_costs(&self, report: &AnalysisReport) -> IoResult<PathBuf> {
        let rows: Vec<_> = report
            .material_costs
            .iter()
            .cloned()
            .map(|mut row| {
                row.budget_quantity = self.round(row.budget_quantity);
                row.actual_quantity = self.round(row.actual_quantity);
                row.standard_unit_cost = self.round(row.standard_unit_cost);
                row.actual_unit_cost = self.round(row.actual_unit_cost);
                row.budget_cost = self.round(row.budget_cost);
                row.standard_mix_cost = self.round(row.standard_mix_cost);
                row.effective_mix_cost = self.round(row.effective_mix_cost);
                row.actual_cost = self.round(row.actual_cost);
                row
            })
            .collect();
        self.write_csv("material_costs.csv", MATERIAL_COST_HEADER, &rows)
    }

    fn area_row<'a>(&self, area: &'a str, description: &'a str, cost: CostStages) -> AreaCostCsvRow<'a> {
        AreaCostCsvRow {
            area,
            description,
            budget: self.round(cost.budget),
            effective_hours: self.round(cost.effective_hours),
            actual: self.round(cost.actual),
            efficiency_effect: self.round(cost.efficiency_effect()),
            rate_effect: self.round(cost.rate_effect()),
            total_variance: self.round(cost.total_variance()),
        }
    }

    fn write_area_costs(&self, report: &AnalysisReport) -> IoResult<PathBuf> {
        let breakdown = &report.resource_costs;
        let mut rows: Vec<_> = breakdown
            .areas
            .iter()
            .map(|area| self.area_row(area.area.code(), area.area.description(), area.cost))
            .collect();
        rows.push(self.area_row(PLANT_LABEL, "", breakdown.plant));
        self.write_csv("area_costs.csv", AREA_COST_HEADER, &rows)
    }

    fn write_resource_costs(&self, report: &AnalysisReport) -> IoResult<PathBuf> {
        let rows: Vec<_> = report
            .resource_costs
            .resources()
            .map(|resource| ResourceCostCsvRow {
                resource_id: resource.resource_id.as_str(),
                area: resource.area.code(),
                standard_hours: self.round(resource.standard_hours),
                actual_hours: self.round(resource.actual_hours),
                standard_rate: self.round(resource.standard_rate),
                actual_rate: self.round(resource.actual_rate),
                budget: self.round(resource.cost.budget),
                effective_hours: self.round(resource.cost.effective_hours),
                actual: self.round(resource.cost.actual),
                efficiency_effect: self.round(resource.cost.efficiency_effect()),
                rate_effect: self.round(resource.cost.rate_effect()),
            })
            .collect();
        self.write_csv("resource_costs.csv", RESOURCE_COST_HEADER, &rows)
    }

    fn write_shares(&self, report: &AnalysisReport, column: ShareColumn) -> IoResult<PathBuf> {
        let table = report.share_table(column);
        let entries: Vec<ShareEntry> = if self.grouped_shares {
            table.grouped().entries
        } else {
            table.entries
        };
        let total: Decimal = entries.iter().map(|entry| entry.value).sum();

        let rows: Vec<_> = entries
            .iter()
            .map(|entry| ShareCsvRow {
                label: &entry.label,
                value: self.round_share(entry.value),
                share_percent: self.round(
                    (entry.value * Decimal::ONE_HUNDRED)
                        .checked_div(total)
                        .unwrap_or(Decimal::ZERO),
                ),
            })
            .collect();
        self.write_csv(&format!("shares_{}.csv", column.name()), SHARE_HEADER, &rows)
    }

    fn write_long(&self, name: &str, rows: &[LongRow]) -> IoResult<PathBuf> {
        let rounded: Vec<_> = rows
            .iter()
            .cloned()
            .map(|mut row| {
                row.value = self.round(row.value);
                row
            })
            .collect();
        self.write_csv(name, LONG_HEADER, &rounded)
    }

    fn write_json(&self, report: &AnalysisReport) -> IoResult<PathBuf> {
        let path = self.output_dir.join("report.json");
        let body = serde_json::to_vec_pretty(report)?;
        fs::write(&path, body).map_err(|err| IoError::Write {
            path: path.clone(),
            message: err.to_string(),
        })?;
        debug!(path = %path.display(), "JSON written");
        Ok(path)
    }

    fn write_csv<T: Serialize>(&self, name: &str, header: &[&str], rows: &[T]) -> IoResult<PathBuf> {
        let path = self.output_dir.join(name);
        let write_error = |message: String| IoError::Write {
            path: path.clone(),
            message,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(|err| write_error(err.to_string()))?;
        writer
            .write_record(header)
            .map_err(|err| write_error(err.to_string()))?;
        for row in rows {
            writer.serialize(row).map_err(|err| write_error(err.to_string()))?;
        }
        writer.flush().map_err(|err| write_error(err.to_string()))?;

        debug!(path = %path.display(), rows = rows.len(), "CSV written");
        Ok(path)
    }
}
