//! Line tokenization, preprocessing and raw alignment.
//!
//! Both alignment strategies run over the same pre-split line slices and
//! are normalized into a sequence of [`DiffPart`]s, so statistics and hunk
//! generation never care which strategy produced them.

use std::borrow::Cow;
use std::ops::Range;
use std::time::Instant;

use similar::{capture_diff_slices_deadline, Algorithm, DiffTag};
use tracing::debug;

use crate::options::DiffOptions;

/// One run of the raw alignment: consecutive lines sharing a tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffPart<'a> {
    /// Lines present in both inputs (taken from the old side).
    Unchanged(&'a [&'a str]),
    /// Lines only present in the new input.
    Added(&'a [&'a str]),
    /// Lines only present in the old input.
    Removed(&'a [&'a str]),
}

impl<'a> DiffPart<'a> {
    /// The lines covered by this part.
    pub fn lines(&self) -> &'a [&'a str] {
        match *self {
            Self::Unchanged(lines) | Self::Added(lines) | Self::Removed(lines) => lines,
        }
    }

    /// Number of lines covered by this part.
    pub fn len(&self) -> usize {
        self.lines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    /// Returns `true` for added and removed parts.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

/// Split text into newline-terminated lines.
///
/// Each line keeps its trailing `\n`; a final line without one is still a
/// line. The empty string has no lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Split text into lines and normalize each one for alignment.
///
/// Returns exactly one token per line of `text`: a line that folds to
/// nothing stays as an empty token, so indices into the result are valid
/// for the original lines.
pub fn preprocess_text<'a>(text: &'a str, options: &DiffOptions) -> Vec<Cow<'a, str>> {
    split_lines(text)
        .into_iter()
        .map(|line| preprocess_line(line, options))
        .collect()
}

fn preprocess_line<'a>(line: &'a str, options: &DiffOptions) -> Cow<'a, str> {
    let mut line = Cow::Borrowed(line);
    if options.ignore_case {
        line = Cow::Owned(line.to_lowercase());
    }
    if options.ignore_whitespace {
        let terminated = line.ends_with('\n');
        let trimmed = line.trim();
        if trimmed.len() + usize::from(terminated) != line.len() {
            let mut folded = trimmed.to_string();
            if terminated {
                folded.push('\n');
            }
            line = Cow::Owned(folded);
        }
    }
    line
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tag {
    Unchanged,
    Added,
    Removed,
}

/// Align two line slices and return the normalized part sequence.
///
/// Inputs longer than [`DiffOptions::large_input_threshold`] lines use the
/// patience strategy, which anchors on unique lines and stays close to
/// linear on large files; everything else uses Myers.
pub fn compute_parts<'a>(
    old: &'a [&'a str],
    new: &'a [&'a str],
    options: &DiffOptions,
) -> Vec<DiffPart<'a>> {
    let total_lines = old.len().max(new.len());
    let algorithm = if total_lines > options.large_input_threshold {
        Algorithm::Patience
    } else {
        Algorithm::Myers
    };
    debug!(?algorithm, total_lines, "aligning lines");

    let deadline = options.timeout.map(|t| Instant::now() + t);
    let ops = capture_diff_slices_deadline(algorithm, old, new, deadline);

    // Adjacent ops with the same tag are contiguous on their side; merge
    // them so each run is reported once.
    let mut runs: Vec<(Tag, Range<usize>)> = Vec::with_capacity(ops.len());
    for op in &ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => push_run(&mut runs, Tag::Unchanged, old_range),
            DiffTag::Delete => push_run(&mut runs, Tag::Removed, old_range),
            DiffTag::Insert => push_run(&mut runs, Tag::Added, new_range),
            DiffTag::Replace => {
                push_run(&mut runs, Tag::Removed, old_range);
                push_run(&mut runs, Tag::Added, new_range);
            }
        }
    }

    runs.into_iter()
        .map(|(tag, range)| match tag {
            Tag::Unchanged => DiffPart::Unchanged(&old[range]),
            Tag::Removed => DiffPart::Removed(&old[range]),
            Tag::Added => DiffPart::Added(&new[range]),
        })
        .collect()
}

fn push_run(runs: &mut Vec<(Tag, Range<usize>)>, tag: Tag, range: Range<usize>) {
    if range.is_empty() {
        return;
    }
    if let Some((last_tag, last_range)) = runs.last_mut() {
        if *last_tag == tag && last_range.end == range.start {
            last_range.end = range.end;
            return;
        }
    }
    runs.push((tag, range));
}
