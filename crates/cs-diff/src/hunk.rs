//! Hunk generation: group change regions with surrounding context.
//!
//! Hunks are built against the original (unprocessed) texts so that the
//! displayed content is never altered by case or whitespace folding.

use serde::Serialize;
use tracing::warn;

use crate::part::{split_lines, DiffPart};

/// Upper bound on the number of hunks produced for one comparison.
pub const MAX_HUNKS: usize = 500;

/// A contiguous region of changes plus its context lines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    /// First old line covered by this hunk (1-based).
    pub old_start: usize,
    /// First new line covered by this hunk (1-based).
    pub new_start: usize,
    pub lines: Vec<HunkLine>,
    /// Number of old lines in this hunk (context + removed).
    pub old_lines: usize,
    /// Number of new lines in this hunk (context + added).
    pub new_lines: usize,
}

impl Hunk {
    fn open(old_start: usize, new_start: usize) -> Self {
        Self {
            old_start,
            new_start,
            ..Default::default()
        }
    }

    fn push_context(&mut self, old_index: usize, new_index: usize, content: &str) {
        self.lines.push(HunkLine {
            kind: HunkLineKind::Context,
            content: content.to_string(),
            old_line: Some(old_index + 1),
            new_line: Some(new_index + 1),
        });
        self.old_lines += 1;
        self.new_lines += 1;
    }

    fn push_added(&mut self, new_index: usize, content: &str) {
        self.lines.push(HunkLine {
            kind: HunkLineKind::Added,
            content: content.to_string(),
            old_line: None,
            new_line: Some(new_index + 1),
        });
        self.new_lines += 1;
    }

    fn push_removed(&mut self, old_index: usize, content: &str) {
        self.lines.push(HunkLine {
            kind: HunkLineKind::Removed,
            content: content.to_string(),
            old_line: Some(old_index + 1),
            new_line: None,
        });
        self.old_lines += 1;
    }

    /// Number of added and removed lines in this hunk.
    pub fn change_count(&self) -> usize {
        self.lines.iter().filter(|l| l.kind != HunkLineKind::Context).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HunkLineKind {
    Context,
    Added,
    Removed,
}

/// A single line in a hunk.
///
/// Context lines carry both line numbers, added lines only `new_line`,
/// removed lines only `old_line`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HunkLine {
    #[serde(rename = "type")]
    pub kind: HunkLineKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line: Option<usize>,
}

fn content_at<'a>(lines: &[&'a str], index: usize) -> &'a str {
    match lines.get(index) {
        Some(&line) => line.strip_suffix('\n').unwrap_or(line),
        None => "",
    }
}

/// Build context-windowed hunks from the parts.
///
/// Two change regions separated by at most `2 * context_lines` unchanged
/// lines share one hunk. At most [`MAX_HUNKS`] hunks are opened; later
/// change regions are dropped.
pub fn generate_hunks(
    parts: &[DiffPart<'_>],
    original_text1: &str,
    original_text2: &str,
    context_lines: usize,
) -> Vec<Hunk> {
    let old_lines = split_lines(original_text1);
    let new_lines = split_lines(original_text2);

    let mut hunks = Vec::new();
    let mut current: Option<Hunk> = None;
    let mut line1_index = 0;
    let mut line2_index = 0;
    let mut preceding_unchanged = 0;
    let mut capped = false;

    for (i, part) in parts.iter().enumerate() {
        let n = part.len();
        match part {
            DiffPart::Unchanged(_) => {
                if let Some(mut hunk) = current.take() {
                    // Parts alternate, so anything after an unchanged run is a change.
                    let merge = i + 1 < parts.len() && n <= 2 * context_lines;
                    let take = if merge { n } else { n.min(context_lines) };
                    for k in 0..take {
                        hunk.push_context(line1_index + k, line2_index + k, content_at(&old_lines, line1_index + k));
                    }
                    if merge {
                        current = Some(hunk);
                    } else {
                        hunks.push(hunk);
                    }
                }
                line1_index += n;
                line2_index += n;
                preceding_unchanged = n;
            }
            DiffPart::Added(_) | DiffPart::Removed(_) => {
                if current.is_none() && !capped {
                    if hunks.len() >= MAX_HUNKS {
                        warn!(max_hunks = MAX_HUNKS, "hunk limit reached, remaining changes omitted");
                        capped = true;
                    } else {
                        let backfill = preceding_unchanged.min(context_lines);
                        let start1 = line1_index - backfill;
                        let start2 = line2_index - backfill;
                        let mut hunk = Hunk::open(start1 + 1, start2 + 1);
                        for k in 0..backfill {
                            hunk.push_context(start1 + k, start2 + k, content_at(&old_lines, start1 + k));
                        }
                        current = Some(hunk);
                    }
                }

                if let DiffPart::Added(_) = part {
                    if let Some(hunk) = current.as_mut() {
                        for k in 0..n {
                            hunk.push_added(line2_index + k, content_at(&new_lines, line2_index + k));
                        }
                    }
                    line2_index += n;
                } else {
                    if let Some(hunk) = current.as_mut() {
                        for k in 0..n {
                            hunk.push_removed(line1_index + k, content_at(&old_lines, line1_index + k));
                        }
                    }
                    line1_index += n;
                }
                preceding_unchanged = 0;
            }
        }
    }

    if let Some(hunk) = current {
        hunks.push(hunk);
    }
    hunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DiffOptions;
    use crate::part::compute_parts;

    fn numbered(n: usize) -> String {
        (1..=n).map(|i| format!("line{i}\n")).collect()
    }

    fn hunks_for(old: &str, new: &str, context: usize) -> Vec<Hunk> {
        let old_lines = split_lines(old);
        let new_lines = split_lines(new);
        let parts = compute_parts(&old_lines, &new_lines, &DiffOptions::default());
        generate_hunks(&parts, old, new, context)
    }

    #[test]
    fn isolated_insertion_has_three_lines_of_context() {
        let old = numbered(20);
        let new = old.replace("line10\n", "line10\ninserted\n");

        let hunks = hunks_for(&old, &new, 3);
        assert_eq!(hunks.len(), 1);
        let hunk = &hunks[0];
        assert_eq!(hunk.old_start, 8);
        assert_eq!(hunk.new_start, 8);
        assert_eq!(hunk.lines.len(), 7);
        assert_eq!(hunk.change_count(), 1);
        assert_eq!(hunk.old_lines, 6);
        assert_eq!(hunk.new_lines, 7);

        let added = &hunk.lines[3];
        assert_eq!(added.kind, HunkLineKind::Added);
        assert_eq!(added.content, "inserted");
        assert_eq!(added.new_line, Some(11));
        assert_eq!(added.old_line, None);

        let first = &hunk.lines[0];
        assert_eq!(first.content, "line8");
        assert_eq!((first.old_line, first.new_line), (Some(8), Some(8)));
        let last = &hunk.lines[6];
        assert_eq!(last.content, "line13");
        assert_eq!((last.old_line, last.new_line), (Some(13), Some(14)));
    }

    #[test]
    fn context_is_clipped_at_file_start() {
        let old = numbered(10);
        let new = old.replacen("line1\n", "first\n", 1);

        let hunks = hunks_for(&old, &new, 3);
        assert_eq!(hunks.len(), 1);
        let hunk = &hunks[0];
        assert_eq!(hunk.old_start, 1);
        assert_eq!(hunk.lines[0].kind, HunkLineKind::Removed);
        assert_eq!(hunk.lines[0].old_line, Some(1));
        assert_eq!(hunk.lines[1].kind, HunkLineKind::Added);
        assert_eq!(hunk.lines.len(), 5);
    }

    #[test]
    fn context_is_clipped_at_file_end() {
        let old = numbered(10);
        let new = old.replace("line10\n", "");

        let hunks = hunks_for(&old, &new, 3);
        assert_eq!(hunks.len(), 1);
        let hunk = &hunks[0];
        assert_eq!(hunk.old_start, 7);
        assert_eq!(hunk.lines.len(), 4);
        assert_eq!(hunk.lines[3].kind, HunkLineKind::Removed);
        assert_eq!(hunk.lines[3].old_line, Some(10));
    }

    #[test]
    fn nearby_changes_share_a_hunk() {
        let old = numbered(30);
        // Changes on lines 10 and 15: four unchanged lines between them.
        let new = old.replace("line10\n", "ten\n").replace("line15\n", "fifteen\n");

        let hunks = hunks_for(&old, &new, 3);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].change_count(), 4);
        assert_eq!(hunks[0].old_start, 7);
        assert_eq!(hunks[0].old_lines, 3 + 1 + 4 + 1 + 3);
    }

    #[test]
    fn distant_changes_get_separate_hunks() {
        let old = numbered(40);
        let new = old.replace("line5\n", "five\n").replace("line30\n", "thirty\n");

        let hunks = hunks_for(&old, &new, 3);
        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0].old_start, 2);
        assert_eq!(hunks[1].old_start, 27);
        assert_eq!(hunks[1].lines[0].content, "line27");
    }

    #[test]
    fn zero_context_hunks_contain_only_changes() {
        let old = numbered(10);
        let new = old.replace("line3\n", "three\n").replace("line4\n", "four\n");

        let hunks = hunks_for(&old, &new, 0);
        assert_eq!(hunks.len(), 1);
        assert!(hunks[0].lines.iter().all(|l| l.kind != HunkLineKind::Context));
        assert_eq!(hunks[0].old_start, 3);
    }

    #[test]
    fn identical_texts_have_no_hunks() {
        let text = numbered(5);
        assert!(hunks_for(&text, &text, 3).is_empty());
    }

    #[test]
    fn hunk_count_is_capped() {
        let unchanged = ["u\n"];
        let removed = ["r\n"];
        let mut parts = Vec::new();
        for _ in 0..(MAX_HUNKS + 100) {
            parts.push(DiffPart::Unchanged(&unchanged[..]));
            parts.push(DiffPart::Removed(&removed[..]));
        }
        let old = "u\nr\n".repeat(MAX_HUNKS + 100);
        let new = "u\n".repeat(MAX_HUNKS + 100);

        let hunks = generate_hunks(&parts, &old, &new, 0);
        assert_eq!(hunks.len(), MAX_HUNKS);
        assert_eq!(hunks[MAX_HUNKS - 1].lines[0].old_line, Some(2 * MAX_HUNKS));
    }

    #[test]
    fn hunk_line_json_omits_missing_numbers() {
        let line = HunkLine {
            kind: HunkLineKind::Added,
            content: "x".into(),
            old_line: None,
            new_line: Some(3),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"type":"added","content":"x","newLine":3}"#);
    }
}
