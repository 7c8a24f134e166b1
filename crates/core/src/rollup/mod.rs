//! Summary rollup and consistency reconciliation.

pub mod reconciler;
pub mod summary;

pub use reconciler::{ReconciliationInput, ReconciliationMismatch, Reconciler};
pub use summary::{SummaryLine, SummaryRow, SummaryTable};
