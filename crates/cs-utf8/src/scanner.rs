//! Lazy issue scanning with position tracking.

use serde::Serialize;

use crate::sequence::validate_utf8_sequence;

/// Bytes inspected on each side of an invalid byte for its context.
const CONTEXT_RADIUS: usize = 20;
/// Visible characters kept on each side after cleaning.
const CONTEXT_CHARS: usize = 15;
/// Bytes of the surrounding line kept on each side for the preview.
const PREVIEW_RADIUS: usize = 40;

/// Text around an invalid byte, with control characters shown as `.`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueContext {
    pub before: String,
    pub after: String,
    pub line_preview: String,
}

/// One invalid byte.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// 1-based line number.
    pub row: usize,
    /// 1-based character column, reset after each line feed.
    pub col: usize,
    pub byte_offset: usize,
    pub invalid_byte: u8,
    /// Uppercase, e.g. `0xFF`.
    pub invalid_byte_hex: String,
    pub description: &'static str,
    pub context: IssueContext,
}

/// How far a scan has progressed through its buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScanProgress {
    pub processed: usize,
    pub total: usize,
}

/// Iterator over the invalid bytes of a buffer.
///
/// Bytes are classified only as the iterator is advanced, so a caller can
/// stop at any point (dropping the scanner cancels the scan) and poll
/// [`progress`](Self::progress) between items.
#[derive(Clone, Debug)]
pub struct IssueScanner<'a> {
    buffer: &'a [u8],
    offset: usize,
    row: usize,
    col: usize,
    valid_bytes: usize,
    invalid_bytes: usize,
}

impl<'a> IssueScanner<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            row: 1,
            col: 1,
            valid_bytes: 0,
            invalid_bytes: 0,
        }
    }

    pub fn progress(&self) -> ScanProgress {
        ScanProgress {
            processed: self.offset,
            total: self.buffer.len(),
        }
    }

    /// Current line number; 1 plus the line feeds seen so far.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn valid_bytes(&self) -> usize {
        self.valid_bytes
    }

    pub fn invalid_bytes(&self) -> usize {
        self.invalid_bytes
    }

    pub fn is_finished(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}

impl Iterator for IssueScanner<'_> {
    type Item = Issue;

    fn next(&mut self) -> Option<Issue> {
        while self.offset < self.buffer.len() {
            let offset = self.offset;
            let seq = validate_utf8_sequence(self.buffer, offset);

            if seq.valid {
                if self.buffer[offset] == b'\n' {
                    self.row += 1;
                    self.col = 1;
                } else {
                    self.col += 1;
                }
                self.valid_bytes += seq.length;
                self.offset += seq.length;
                continue;
            }

            let byte = self.buffer[offset];
            let issue = Issue {
                row: self.row,
                col: self.col,
                byte_offset: offset,
                invalid_byte: byte,
                invalid_byte_hex: format!("0x{}", hex::encode_upper([byte])),
                description: seq.description.unwrap_or(crate::sequence::UNKNOWN),
                context: context_for(self.buffer, offset),
            };
            self.col += 1;
            self.invalid_bytes += 1;
            self.offset += 1;
            return Some(issue);
        }
        None
    }
}

fn clean(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .map(|c| if c.is_control() { '.' } else { c })
        .collect()
}

fn last_chars(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}

fn context_for(buffer: &[u8], offset: usize) -> IssueContext {
    let start = offset.saturating_sub(CONTEXT_RADIUS);
    let end = (offset + 1 + CONTEXT_RADIUS).min(buffer.len());
    let before = last_chars(&clean(&buffer[start..offset]), CONTEXT_CHARS);
    let after: String = clean(&buffer[offset + 1..end]).chars().take(CONTEXT_CHARS).collect();

    let window_start = offset.saturating_sub(PREVIEW_RADIUS);
    let window_end = (offset + 1 + PREVIEW_RADIUS).min(buffer.len());
    let line_start = buffer[window_start..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(window_start, |p| window_start + p + 1);
    let line_end = buffer[offset..window_end]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(window_end, |p| offset + p);

    IssueContext {
        before,
        after,
        line_preview: clean(&buffer[line_start..line_end]),
    }
}
