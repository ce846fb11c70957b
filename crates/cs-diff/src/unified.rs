//! Unified diff rendering.

use std::fmt::Write;

use crate::checker::CompareResult;
use crate::hunk::HunkLineKind;

/// Render a comparison as a unified diff patch.
///
/// Identical inputs render to an empty string.
pub fn generate_unified_diff(result: &CompareResult, old_name: &str, new_name: &str) -> String {
    if result.hunks.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "--- {old_name}");
    let _ = writeln!(out, "+++ {new_name}");
    for hunk in &result.hunks {
        let _ = writeln!(
            out,
            "@@ -{},{} +{},{} @@",
            hunk.old_start, hunk.old_lines, hunk.new_start, hunk.new_lines
        );
        for line in &hunk.lines {
            let prefix = match line.kind {
                HunkLineKind::Context => ' ',
                HunkLineKind::Added => '+',
                HunkLineKind::Removed => '-',
            };
            let _ = writeln!(out, "{prefix}{}", line.content);
        }
    }
    out
}
