//! Line statistics and the human readable summary.

use serde::Serialize;

use crate::part::DiffPart;

/// Which side a changed line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
}

/// A changed line, numbered in its own file (1-based).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChangedLine {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub line: usize,
}

/// Aggregate line statistics of a comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub total_changes: usize,
    /// 0 to 100.
    pub similarity_percent: u32,
    /// Changed lines in the order they were encountered, capped at the
    /// configured `max_display_changes`.
    pub changed_lines: Vec<ChangedLine>,
}

impl Stats {
    /// Returns `true` if nothing was added or removed.
    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Walk the parts and count lines per tag.
///
/// `original_lines1` and `original_lines2` are the line counts of the two
/// inputs; the similarity is measured against the longer one.
pub fn calculate_stats(
    parts: &[DiffPart<'_>],
    original_lines1: usize,
    original_lines2: usize,
    max_display_changes: usize,
) -> Stats {
    let mut stats = Stats::default();
    let mut current_line1 = 1;
    let mut current_line2 = 1;

    for part in parts {
        let n = part.len();
        match part {
            DiffPart::Added(_) => {
                stats.added += n;
                record_changes(&mut stats.changed_lines, ChangeKind::Added, current_line2, n, max_display_changes);
                current_line2 += n;
            }
            DiffPart::Removed(_) => {
                stats.removed += n;
                record_changes(&mut stats.changed_lines, ChangeKind::Removed, current_line1, n, max_display_changes);
                current_line1 += n;
            }
            DiffPart::Unchanged(_) => {
                stats.unchanged += n;
                current_line1 += n;
                current_line2 += n;
            }
        }
    }

    stats.total_changes = stats.added + stats.removed;
    stats.similarity_percent = similarity(stats.total_changes, original_lines1.max(original_lines2));
    stats
}

fn record_changes(out: &mut Vec<ChangedLine>, kind: ChangeKind, first: usize, n: usize, cap: usize) {
    let room = cap.saturating_sub(out.len()).min(n);
    out.extend((first..first + room).map(|line| ChangedLine { kind, line }));
}

fn similarity(total_changes: usize, max_lines: usize) -> u32 {
    if max_lines == 0 {
        return 100;
    }
    let pct = (1.0 - total_changes as f64 / max_lines as f64) * 100.0;
    pct.round().max(0.0) as u32
}

/// One-line description of the comparison outcome.
pub fn generate_summary(stats: &Stats) -> String {
    if stats.is_identical() {
        return "Files are identical".to_string();
    }

    let mut clauses = Vec::with_capacity(3);
    if stats.added > 0 {
        clauses.push(format!("{} {} added", stats.added, plural_lines(stats.added)));
    }
    if stats.removed > 0 {
        clauses.push(format!("{} {} removed", stats.removed, plural_lines(stats.removed)));
    }
    clauses.push(format!("{}% similar", stats.similarity_percent));
    clauses.join(", ")
}

fn plural_lines(n: usize) -> &'static str {
    if n == 1 { "line" } else { "lines" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_line_numbers() {
        let parts = [
            DiffPart::Unchanged(&["a\n"][..]),
            DiffPart::Removed(&["b\n", "c\n"][..]),
            DiffPart::Added(&["x\n"][..]),
            DiffPart::Unchanged(&["d\n"][..]),
            DiffPart::Added(&["y\n"][..]),
        ];
        let stats = calculate_stats(&parts, 4, 4, 100);
        assert_eq!(stats.added, 2);
        assert_eq!(stats.removed, 2);
        assert_eq!(stats.unchanged, 2);
        assert_eq!(stats.total_changes, 4);
        assert_eq!(stats.similarity_percent, 0);
        assert_eq!(
            stats.changed_lines,
            vec![
                ChangedLine { kind: ChangeKind::Removed, line: 2 },
                ChangedLine { kind: ChangeKind::Removed, line: 3 },
                ChangedLine { kind: ChangeKind::Added, line: 2 },
                ChangedLine { kind: ChangeKind::Added, line: 4 },
            ]
        );
    }

    #[test]
    fn changed_lines_are_capped() {
        let added = ["1\n", "2\n", "3\n", "4\n", "5\n"];
        let parts = [DiffPart::Added(&added[..])];
        let stats = calculate_stats(&parts, 0, 5, 3);
        assert_eq!(stats.added, 5);
        assert_eq!(stats.changed_lines.len(), 3);
        assert_eq!(stats.changed_lines[2].line, 3);
    }

    #[test]
    fn similarity_of_empty_inputs_is_full() {
        let stats = calculate_stats(&[], 0, 0, 10);
        assert_eq!(stats.similarity_percent, 100);
    }

    #[test]
    fn similarity_is_rounded() {
        // 1 change over 3 lines: 66.67 -> 67
        assert_eq!(similarity(1, 3), 67);
        assert_eq!(similarity(0, 3), 100);
        assert_eq!(similarity(10, 3), 0);
    }

    #[test]
    fn summary_identical() {
        assert_eq!(generate_summary(&Stats::default()), "Files are identical");
    }

    #[test]
    fn summary_clauses() {
        let stats = Stats {
            added: 1,
            removed: 3,
            similarity_percent: 60,
            ..Default::default()
        };
        assert_eq!(generate_summary(&stats), "1 line added, 3 lines removed, 60% similar");

        let stats = Stats {
            removed: 1,
            similarity_percent: 90,
            ..Default::default()
        };
        assert_eq!(generate_summary(&stats), "1 line removed, 90% similar");
    }

    #[test]
    fn changed_line_serializes_type_tag() {
        let json = serde_json::to_string(&ChangedLine { kind: ChangeKind::Added, line: 7 }).unwrap();
        assert_eq!(json, r#"{"type":"added","line":7}"#);
    }
}
