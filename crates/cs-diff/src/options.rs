use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a [`DiffChecker`](crate::DiffChecker).
///
/// Captured when the checker is built and never changed during a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiffOptions {
    /// Unchanged lines shown before and after each change region.
    pub context_lines: usize,
    /// Trim leading and trailing whitespace of every line before aligning.
    pub ignore_whitespace: bool,
    /// Lowercase both inputs before aligning.
    pub ignore_case: bool,
    /// Chunk size hint carried for callers that stream input in pieces.
    pub chunk_size: usize,
    /// Maximum number of entries kept in [`Stats::changed_lines`](crate::Stats).
    pub max_display_changes: usize,
    /// Line count above which the slice-based large-input strategy is used.
    pub large_input_threshold: usize,
    /// Deadline for the alignment algorithm. Past it, a coarser alignment
    /// is returned.
    #[serde(with = "opt_millis")]
    pub timeout: Option<Duration>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context_lines: 3,
            ignore_whitespace: false,
            ignore_case: false,
            chunk_size: 50_000,
            max_display_changes: 10_000,
            large_input_threshold: 100_000,
            timeout: None,
        }
    }
}

impl DiffOptions {
    /// Options with the given number of context lines.
    pub fn with_context(context_lines: usize) -> Self {
        Self {
            context_lines,
            ..Default::default()
        }
    }
}

/// Serializes the timeout as an optional millisecond count.
mod opt_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let o = DiffOptions::default();
        assert_eq!(o.context_lines, 3);
        assert!(!o.ignore_whitespace);
        assert!(!o.ignore_case);
        assert_eq!(o.chunk_size, 50_000);
        assert_eq!(o.max_display_changes, 10_000);
        assert_eq!(o.large_input_threshold, 100_000);
        assert!(o.timeout.is_none());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let o: DiffOptions =
            serde_json::from_str(r#"{"contextLines": 5, "timeout": 250}"#).unwrap();
        assert_eq!(o.context_lines, 5);
        assert_eq!(o.timeout, Some(Duration::from_millis(250)));
        assert_eq!(o.max_display_changes, 10_000);
    }
}
