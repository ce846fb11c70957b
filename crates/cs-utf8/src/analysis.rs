//! Heuristic guesses about what a non-UTF-8 buffer was encoded with.
//!
//! Independent of the byte-exact validator; nothing here affects
//! [`Utf8Checker::validate`](crate::Utf8Checker::validate).

use serde::Serialize;

use crate::bom::{detect_bom, EncodingKind};

/// Only this many leading bytes are sampled.
const SAMPLE_SIZE: usize = 8192;
/// More null bytes than this in the sample marks the buffer as binary.
const BINARY_NULL_THRESHOLD: usize = 10;
/// More Windows-1252 specific bytes than this suggests Windows-1252.
const CP1252_THRESHOLD: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingIssueKind {
    Binary,
    #[serde(rename = "windows-1252")]
    Windows1252,
    /// A byte order mark for something other than UTF-8.
    ForeignBom,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EncodingIssue {
    #[serde(rename = "type")]
    pub kind: EncodingIssueKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingAnalysis {
    pub possible_encodings: Vec<String>,
    pub common_issues: Vec<EncodingIssue>,
    pub recommendations: Vec<String>,
}

/// Printable characters Windows-1252 places in 0x80..0x9F, where
/// ISO-8859-1 only has control codes.
fn is_cp1252_specific(byte: u8) -> bool {
    matches!(byte, 0x80 | 0x82..=0x86 | 0x91..=0x97)
}

/// Inspect the first 8 KiB of `buffer` for signs of another encoding.
pub fn analyze_encoding_issues(buffer: &[u8]) -> EncodingAnalysis {
    let sample = &buffer[..buffer.len().min(SAMPLE_SIZE)];
    let mut analysis = EncodingAnalysis::default();

    let null_count = sample.iter().filter(|&&b| b == 0).count();
    if null_count > BINARY_NULL_THRESHOLD {
        analysis.common_issues.push(EncodingIssue {
            kind: EncodingIssueKind::Binary,
            message: "File appears to contain binary data".to_string(),
        });
    }

    let high_byte_count = sample.iter().filter(|&&b| b >= 0x80).count();
    let cp1252_count = sample.iter().filter(|&&b| is_cp1252_specific(b)).count();
    if cp1252_count > CP1252_THRESHOLD {
        analysis.possible_encodings.push("Windows-1252".to_string());
        analysis.common_issues.push(EncodingIssue {
            kind: EncodingIssueKind::Windows1252,
            message: format!("Found {cp1252_count} Windows-1252 specific characters"),
        });
        analysis
            .recommendations
            .push("Re-save the file as UTF-8; it appears to be Windows-1252 encoded".to_string());
    } else if high_byte_count > 0 {
        analysis.possible_encodings.push("ISO-8859-1 (Latin-1)".to_string());
    }

    let bom = detect_bom(buffer);
    if bom.has_bom && bom.kind != EncodingKind::Utf8 {
        analysis.common_issues.push(EncodingIssue {
            kind: EncodingIssueKind::ForeignBom,
            message: format!("File has a {} byte order mark", bom.kind),
        });
        analysis
            .recommendations
            .push(format!("Convert the file from {} to UTF-8", bom.kind));
    }

    analysis
}
