use serde::{Deserialize, Serialize};

/// Configuration for a [`Utf8Checker`](crate::Utf8Checker).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Character written in place of invalid bytes by [`FixMode::Replace`](crate::FixMode).
    pub replacement_char: char,
    /// Validation stops once this many issues have been recorded.
    pub max_issues: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            replacement_char: char::REPLACEMENT_CHARACTER,
            max_issues: 10_000,
        }
    }
}
