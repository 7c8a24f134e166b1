//! Content hash of an input set.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::dataset::RawDatasets;

/// SHA-256 of the JSON serialization of the raw datasets, hex encoded.
///
/// Row order is part of the content: the same rows in another order hash differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputFingerprint(String);

impl InputFingerprint {
    /// Fingerprints an input set.
    ///
    /// # Errors
    ///
    /// Returns an error if the datasets cannot be serialized.
    pub fn of(datasets: &RawDatasets) -> Result<Self, serde_json::Error> {
        let bytes = serde_json::to_vec(datasets)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(Self(format!("{:x}", hasher.finalize())))
    }

    /// Hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InputFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<InputFingerprint> for String {
    fn from(fingerprint: InputFingerprint) -> Self {
        fingerprint.0
    }
}
