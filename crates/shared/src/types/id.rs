//! Typed identifiers for type-safe references between datasets.
//!
//! Using typed IDs prevents accidentally joining a `CustomerId` against a
//! `ResourceId` column. All IDs are string-backed because the source datasets
//! use business codes (article numbers, resource codes), not surrogate keys.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
///
/// The optional third argument normalizes the raw value; it also runs on
/// deserialization, so IDs read from files and IDs built in code compare equal.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        typed_id!($name, $doc, |raw: &str| raw.trim().to_string());
    };
    ($name:ident, $doc:expr, $normalize:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates an ID from a raw value, normalizing it.
            #[must_use]
            pub fn new(raw: impl AsRef<str>) -> Self {
                let normalize: fn(&str) -> String = $normalize;
                Self(normalize(raw.as_ref()))
            }

            /// Returns the normalized value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the normalized value is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::new(raw)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::new(s))
            }
        }
    };
}

typed_id!(ArticleId, "Article number as it appears in sales and consumption.");
typed_id!(CustomerId, "Customer code referenced by sales rows.");
typed_id!(ResourceId, "Production resource (machine or work center) code.");
typed_id!(MaterialId, "Raw material code referenced by consumption rows.");
typed_id!(
    CurrencyCode,
    "ISO 4217 currency code, stored upper-case.",
    |raw: &str| raw.trim().to_uppercase()
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_trims() {
        let id = ArticleId::new("  ART-001 ");
        assert_eq!(id.as_str(), "ART-001");
    }

    #[test]
    fn test_currency_code_upper_cases() {
        assert_eq!(CurrencyCode::new(" usd").as_str(), "USD");
        assert_eq!(CurrencyCode::from("eur"), CurrencyCode::new("EUR"));
    }

    #[test]
    fn test_typed_id_display() {
        let id = ResourceId::new("TORN-01");
        assert_eq!(format!("{id}"), "TORN-01");
    }

    #[test]
    fn test_typed_id_from_str() {
        let id = CustomerId::from_str("C042").unwrap();
        assert_eq!(id, CustomerId::new("C042"));
    }

    #[test]
    fn test_typed_id_is_empty() {
        assert!(MaterialId::new("   ").is_empty());
        assert!(!MaterialId::new("STEEL").is_empty());
    }

    #[test]
    fn test_deserialize_normalizes() {
        // serde goes through From<String>, so normalization applies to file input too
        let code: CurrencyCode = String::from(" chf ").into();
        assert_eq!(code.as_str(), "CHF");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut ids = vec![ArticleId::new("B"), ArticleId::new("A"), ArticleId::new("C")];
        ids.sort();
        assert_eq!(ids, vec![ArticleId::new("A"), ArticleId::new("B"), ArticleId::new("C")]);
    }
}
