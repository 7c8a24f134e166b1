//! Adapter error types.

use std::path::PathBuf;

use scostamenti_core::dataset::DatasetKind;
use scostamenti_shared::AppError;
use thiserror::Error;

/// Result type alias using `IoError`.
pub type IoResult<T> = Result<T, IoError>;

/// Errors raised while reading datasets or writing exports.
#[derive(Debug, Error)]
pub enum IoError {
    /// One or more required datasets are not present.
    #[error("Missing datasets: {}", format_kinds(.0))]
    MissingDatasets(Vec<DatasetKind>),

    /// A file could not be opened or read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A CSV record could not be parsed.
    #[error("Invalid record in {file}{}: {message}", format_line(*.line))]
    Parse {
        /// File name.
        file: String,
        /// 1-based line number, when known.
        line: Option<u64>,
        /// Parser message.
        message: String,
    },

    /// A file could not be created or written.
    #[error("Failed to write {path}: {message}")]
    Write {
        /// File path.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// The report could not be serialized to JSON.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_kinds(kinds: &[DatasetKind]) -> String {
    kinds
        .iter()
        .map(|k| k.file_stem())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_line(line: Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl From<IoError> for AppError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::MissingDatasets(_) => Self::NotFound(err.to_string()),
            IoError::Parse { .. } => Self::Validation(err.to_string()),
            IoError::Read { .. } | IoError::Write { .. } => Self::Io(err.to_string()),
            IoError::Json(_) => Self::Internal(err.to_string()),
        }
    }
}
