//! Property-based tests for grouping module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::threshold::{OTHER_LABEL, ShareEntry, group_shares};

fn entries() -> impl Strategy<Value = Vec<ShareEntry>> {
    prop::collection::vec(0i64..1_000_000, 0..40).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| ShareEntry::new(format!("ART-{index:03}"), Decimal::new(value, 2)))
            .collect()
    })
}

proptest! {
    /// Grouping preserves the column sum
    #[test]
    fn test_grouping_preserves_sum(entries in entries()) {
        let before: Decimal = entries.iter().map(|e| e.value).sum();
        let grouped = group_shares(&entries);
        prop_assert_eq!(grouped.total(), before);
    }

    /// Grouping a grouped table changes nothing
    #[test]
    fn test_grouping_is_idempotent(entries in entries()) {
        let once = group_shares(&entries);
        let twice = group_shares(&once.entries);
        prop_assert_eq!(once, twice);
    }

    /// Every kept entry is at least 1% of the column, and "Other" is last
    #[test]
    fn test_kept_entries_reach_threshold(entries in entries()) {
        let total: Decimal = entries.iter().map(|e| e.value).sum();
        prop_assume!(!total.is_zero());
        let grouped = group_shares(&entries);

        for (index, entry) in grouped.entries.iter().enumerate() {
            if entry.label == OTHER_LABEL {
                prop_assert_eq!(index, grouped.entries.len() - 1);
            } else {
                prop_assert!(entry.value * Decimal::ONE_HUNDRED / total >= Decimal::ONE);
            }
        }
    }
}
