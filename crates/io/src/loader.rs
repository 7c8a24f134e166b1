//! Reads the seven input datasets from a directory of CSV files.
//!
//! Each dataset lives in `<dir>/<stem>.csv` with a header row whose column
//! names match the row fields. Surrounding whitespace is trimmed.

use std::fs::File;
use std::path::{Path, PathBuf};

use scostamenti_core::dataset::{DatasetKind, RawDatasets};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{IoError, IoResult};

/// Path of a dataset file inside `dir`.
#[must_use]
pub fn dataset_path(dir: &Path, kind: DatasetKind) -> PathBuf {
    dir.join(format!("{}.csv", kind.file_stem()))
}

/// Lists the datasets whose file is absent from `dir`, in canonical order.
#[must_use]
pub fn find_missing_datasets(dir: &Path) -> Vec<DatasetKind> {
    DatasetKind::ALL
        .into_iter()
        .filter(|kind| !dataset_path(dir, *kind).is_file())
        .collect()
}

/// Reads every dataset from `dir`.
///
/// # Errors
///
/// Returns `MissingDatasets` listing every absent file before reading any,
/// or the first read/parse error.
pub fn load_datasets(dir: &Path) -> IoResult<RawDatasets> {
    let missing = find_missing_datasets(dir);
    if !missing.is_empty() {
        return Err(IoError::MissingDatasets(missing));
    }

    let datasets = RawDatasets {
        customers: read_csv(&dataset_path(dir, DatasetKind::Customers))?,
        consumption: read_csv(&dataset_path(dir, DatasetKind::Consumption))?,
        hourly_cost_budget: read_csv(&dataset_path(dir, DatasetKind::HourlyCostBudget))?,
        hourly_cost_actual: read_csv(&dataset_path(dir, DatasetKind::HourlyCostActual))?,
        time_usage: read_csv(&dataset_path(dir, DatasetKind::TimeUsage))?,
        exchange_rates: read_csv(&dataset_path(dir, DatasetKind::ExchangeRates))?,
        sales: read_csv(&dataset_path(dir, DatasetKind::Sales))?,
    };

    info!(
        dir = %dir.display(),
        sales = datasets.sales.len(),
        resources = datasets.time_usage.len(),
        "Datasets loaded"
    );
    Ok(datasets)
}

/// Reads a CSV file into rows.
///
/// # Errors
///
/// Returns `Read` if the file cannot be opened and `Parse` (with the line
/// number) for the first record that does not deserialize.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> IoResult<Vec<T>> {
    let file = File::open(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|err| parse_error(path, &err))?;

    debug!(path = %path.display(), rows = rows.len(), "CSV read");
    Ok(rows)
}

fn parse_error(path: &Path, err: &csv::Error) -> IoError {
    let file = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    IoError::Parse {
        file,
        line: err.position().map(csv::Position::line),
        message: err.to_string(),
    }
}
