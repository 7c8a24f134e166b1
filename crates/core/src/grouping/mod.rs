//! Threshold grouping of share tables.

pub mod threshold;

#[cfg(test)]
mod tests;

pub use threshold::{
    DEFAULT_THRESHOLD_PERCENT, GroupedShareTable, OTHER_LABEL, ShareEntry, ShareTable, group_shares,
    group_shares_with_threshold,
};
