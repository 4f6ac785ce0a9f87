//! Subject identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized identity of a tracked subject (usually an NPC name).
///
/// Surrounding whitespace is trimmed, inner whitespace runs collapse to a
/// single space and the result is lowercased, so `"Moss giant"` and
/// `" MOSS  giant"` name the same subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SubjectKey(String);

impl SubjectKey {
    /// Builds a key from any raw name.
    pub fn new(raw: &str) -> Self {
        let normalized = raw
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        Self(normalized)
    }

    /// Returns the normalized key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the raw name was empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SubjectKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SubjectKey {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<SubjectKey> for String {
    fn from(key: SubjectKey) -> Self {
        key.0
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
