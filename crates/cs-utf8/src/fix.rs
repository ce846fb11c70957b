//! Repair strategies for invalid bytes.

use serde::{Deserialize, Serialize};

use crate::sequence::validate_utf8_sequence;

/// What to do with each invalid byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixMode {
    /// Write the configured replacement character.
    #[default]
    Replace,
    /// Drop the byte.
    Remove,
    /// Write the byte as the ASCII text `\xhh`.
    Escape,
}

impl FixMode {
    /// Parse a mode name. Unknown names fall back to [`FixMode::Replace`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "remove" => Self::Remove,
            "escape" => Self::Escape,
            _ => Self::Replace,
        }
    }
}

/// The repaired buffer and the number of bytes that were fixed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixResult {
    pub buffer: Vec<u8>,
    pub fixed_count: usize,
}

/// Rewrite `buffer`, copying valid sequences through and repairing every
/// invalid byte according to `mode`.
pub fn fix_buffer(buffer: &[u8], mode: FixMode, replacement: char) -> FixResult {
    let mut encoded = [0u8; 4];
    let replacement = replacement.encode_utf8(&mut encoded).as_bytes();

    let mut out = Vec::with_capacity(buffer.len());
    let mut fixed_count = 0;
    let mut i = 0;
    while i < buffer.len() {
        let seq = validate_utf8_sequence(buffer, i);
        if seq.valid {
            out.extend_from_slice(&buffer[i..i + seq.length]);
            i += seq.length;
            continue;
        }

        match mode {
            FixMode::Remove => {}
            FixMode::Escape => {
                out.extend_from_slice(b"\\x");
                out.extend_from_slice(hex::encode([buffer[i]]).as_bytes());
            }
            FixMode::Replace => out.extend_from_slice(replacement),
        }
        fixed_count += 1;
        i += 1;
    }

    FixResult {
        buffer: out,
        fixed_count,
    }
}
