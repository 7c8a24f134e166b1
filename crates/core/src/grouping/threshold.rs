//! Collapses small shares into a single "Other" entry.
//!
//! An entry is small when `value × 100 ÷ column sum` is strictly below the
//! threshold (1 by default); an entry at exactly the threshold is kept.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label of the bucket small entries are merged into.
pub const OTHER_LABEL: &str = "Other";

/// Share threshold in percent of the column sum.
pub const DEFAULT_THRESHOLD_PERCENT: Decimal = Decimal::ONE;

/// A labelled value of a share table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEntry {
    /// Item label (article, area...).
    pub label: String,
    /// Value of the item in the column.
    pub value: Decimal,
}

impl ShareEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    fn is_other(&self) -> bool {
        self.label == OTHER_LABEL
    }
}

/// An ordered list of share entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareTable {
    /// Entries in display order.
    pub entries: Vec<ShareEntry>,
}

impl ShareTable {
    /// Creates a table from entries.
    #[must_use]
    pub const fn new(entries: Vec<ShareEntry>) -> Self {
        Self { entries }
    }

    /// Sum of the values.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Groups small entries under the default threshold.
    #[must_use]
    pub fn grouped(&self) -> GroupedShareTable {
        group_shares(&self.entries)
    }
}

impl FromIterator<ShareEntry> for ShareTable {
    fn from_iter<I: IntoIterator<Item = ShareEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A share table after grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedShareTable {
    /// Kept entries in input order, then "Other" if anything was merged.
    pub entries: Vec<ShareEntry>,
}

impl GroupedShareTable {
    /// Sum of the values.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// The "Other" entry, if any.
    #[must_use]
    pub fn other(&self) -> Option<&ShareEntry> {
        self.entries.iter().find(|e| e.is_other())
    }
}

/// Groups entries below 1% of the column sum.
#[must_use]
pub fn group_shares(entries: &[ShareEntry]) -> GroupedShareTable {
    group_shares_with_threshold(entries, DEFAULT_THRESHOLD_PERCENT)
}

/// Groups entries whose share of the column sum is below `threshold_percent`.
///
/// A zero column sum leaves the table unchanged.
#[must_use]
pub fn group_shares_with_threshold(entries: &[ShareEntry], threshold_percent: Decimal) -> GroupedShareTable {
    let total: Decimal = entries.iter().map(|e| e.value).sum();
    if total.is_zero() {
        return GroupedShareTable {
            entries: entries.to_vec(),
        };
    }

    let mut kept = Vec::with_capacity(entries.len());
    let mut other: Option<Decimal> = None;
    for entry in entries {
        let share = entry.value * Decimal::ONE_HUNDRED / total;
        if entry.is_other() || share < threshold_percent {
            *other.get_or_insert(Decimal::ZERO) += entry.value;
        } else {
            kept.push(entry.clone());
        }
    }

    if let Some(value) = other {
        kept.push(ShareEntry::new(OTHER_LABEL, value));
    }
    GroupedShareTable { entries: kept }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entries(values: &[(&str, Decimal)]) -> Vec<ShareEntry> {
        values.iter().map(|(l, v)| ShareEntry::new(*l, *v)).collect()
    }

    #[test]
    fn test_small_entries_merge_into_other() {
        let grouped = group_shares(&entries(&[
            ("A", dec!(900)),
            ("B", dec!(5)),
            ("C", dec!(90)),
            ("D", dec!(5)),
        ]));
        assert_eq!(
            grouped.entries,
            entries(&[("A", dec!(900)), ("C", dec!(90)), ("Other", dec!(10))])
        );
        assert_eq!(grouped.total(), dec!(1000));
    }

    #[test]
    fn test_exactly_one_percent_is_kept() {
        let grouped = group_shares(&entries(&[("A", dec!(99)), ("B", dec!(1))]));
        assert_eq!(grouped.entries.len(), 2);
        assert!(grouped.other().is_none());
    }

    #[test]
    fn test_existing_other_is_folded_in() {
        let input = entries(&[("Other", dec!(50)), ("A", dec!(940)), ("B", dec!(20)), ("C", dec!(0.5))]);
        let grouped = group_shares(&input);
        assert_eq!(grouped.entries[0].label, "A");
        assert_eq!(grouped.entries[1].label, "B");
        assert_eq!(grouped.other().map(|o| o.value), Some(dec!(50.5)));
        assert_eq!(grouped.entries.last().map(|e| e.label.as_str()), Some(OTHER_LABEL));
    }

    #[test]
    fn test_zero_sum_is_unchanged() {
        let input = entries(&[("A", dec!(0)), ("B", dec!(0))]);
        assert_eq!(group_shares(&input).entries, input);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let input = entries(&[("A", dec!(500)), ("B", dec!(3)), ("C", dec!(497)), ("D", dec!(2))]);
        let once = group_shares(&input);
        let twice = group_shares(&once.entries);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_custom_threshold() {
        let input = entries(&[("A", dec!(90)), ("B", dec!(6)), ("C", dec!(4))]);
        let grouped = group_shares_with_threshold(&input, dec!(5));
        assert_eq!(grouped.entries, entries(&[("A", dec!(90)), ("B", dec!(6)), ("Other", dec!(4))]));
    }

    #[test]
    fn test_share_table_grouped() {
        let table: ShareTable = entries(&[("A", dec!(1000)), ("B", dec!(1))]).into_iter().collect();
        assert_eq!(table.total(), dec!(1001));
        assert_eq!(table.grouped().other().map(|o| o.value), Some(dec!(1)));
    }
}
