//! Byte order mark detection.

use std::fmt;

use serde::Serialize;

/// Encoding suggested by a buffer's leading bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EncodingKind {
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "UTF-16 BE")]
    Utf16Be,
    #[serde(rename = "UTF-16 LE")]
    Utf16Le,
    #[serde(rename = "UTF-32 BE")]
    Utf32Be,
    #[serde(rename = "UTF-32 LE")]
    Utf32Le,
    /// No BOM present.
    #[serde(rename = "UTF-8 (assumed)")]
    Utf8Assumed,
}

impl EncodingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Be => "UTF-16 BE",
            Self::Utf16Le => "UTF-16 LE",
            Self::Utf32Be => "UTF-32 BE",
            Self::Utf32Le => "UTF-32 LE",
            Self::Utf8Assumed => "UTF-8 (assumed)",
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EncodingInfo {
    #[serde(rename = "type")]
    pub kind: EncodingKind,
    #[serde(rename = "hasBOM")]
    pub has_bom: bool,
    #[serde(rename = "bomBytes")]
    pub bom_bytes: usize,
}

impl EncodingInfo {
    fn bom(kind: EncodingKind, bom_bytes: usize) -> Self {
        Self {
            kind,
            has_bom: true,
            bom_bytes,
        }
    }
}

/// Detect a byte order mark at the start of `buffer`.
///
/// `FF FE 00 00` is checked before `FF FE` since the UTF-16 LE mark is a
/// prefix of the UTF-32 LE one.
pub fn detect_bom(buffer: &[u8]) -> EncodingInfo {
    match buffer {
        [0xEF, 0xBB, 0xBF, ..] => EncodingInfo::bom(EncodingKind::Utf8, 3),
        [0xFE, 0xFF, ..] => EncodingInfo::bom(EncodingKind::Utf16Be, 2),
        [0xFF, 0xFE, 0x00, 0x00, ..] => EncodingInfo::bom(EncodingKind::Utf32Le, 4),
        [0xFF, 0xFE, ..] => EncodingInfo::bom(EncodingKind::Utf16Le, 2),
        [0x00, 0x00, 0xFE, 0xFF, ..] => EncodingInfo::bom(EncodingKind::Utf32Be, 4),
        _ => EncodingInfo {
            kind: EncodingKind::Utf8Assumed,
            has_bom: false,
            bom_bytes: 0,
        },
    }
}
