//! Byte-level UTF-8 grammar.
//!
//! [`validate_utf8_sequence`] is the only classifier in the crate: the
//! validator and the fixer both call it, so they always agree on which
//! bytes are invalid.

pub const UNEXPECTED_CONTINUATION: &str = "Unexpected continuation byte";
pub const INVALID_START_BYTE: &str = "Invalid UTF-8 start byte (>= 0xF8)";
pub const OVERLONG_2: &str = "Overlong encoding (2-byte)";
pub const OVERLONG_3: &str = "Overlong encoding (3-byte)";
pub const OVERLONG_4: &str = "Overlong encoding (4-byte)";
pub const SURROGATE: &str = "UTF-16 surrogate pair in UTF-8";
pub const OUT_OF_RANGE: &str = "Code point exceeds U+10FFFF";
pub const INVALID_CONTINUATION: &str = "Invalid continuation byte";
pub const UNKNOWN: &str = "Unknown invalid byte";

/// Classification of the sequence starting at one byte position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceResult {
    pub valid: bool,
    /// Bytes consumed, at least 1. Invalid sequences always consume 1 so the
    /// scan resynchronizes at the next byte.
    pub length: usize,
    /// Why the sequence is invalid; `None` when valid.
    pub description: Option<&'static str>,
}

impl SequenceResult {
    fn valid(length: usize) -> Self {
        Self {
            valid: true,
            length,
            description: None,
        }
    }

    fn invalid(description: &'static str) -> Self {
        Self {
            valid: false,
            length: 1,
            description: Some(description),
        }
    }
}

fn truncated(width: usize) -> &'static str {
    match width {
        2 => "Incomplete 2-byte sequence",
        3 => "Incomplete 3-byte sequence",
        _ => "Incomplete 4-byte sequence",
    }
}

/// Checks that `width - 1` continuation bytes follow the lead at `i`.
fn check_continuations(buffer: &[u8], i: usize, width: usize) -> Result<(), &'static str> {
    if buffer.len() < i + width {
        return Err(truncated(width));
    }
    if buffer[i + 1..i + width].iter().all(|&b| b & 0xC0 == 0x80) {
        Ok(())
    } else {
        Err(INVALID_CONTINUATION)
    }
}

/// Classify the byte at offset `i` together with the continuation bytes it
/// requires.
///
/// An offset past the end of the buffer is reported as invalid.
pub fn validate_utf8_sequence(buffer: &[u8], i: usize) -> SequenceResult {
    let Some(&lead) = buffer.get(i) else {
        return SequenceResult::invalid(UNKNOWN);
    };

    match lead {
        0x00..=0x7F => SequenceResult::valid(1),
        0x80..=0xBF => SequenceResult::invalid(UNEXPECTED_CONTINUATION),
        0xF8..=0xFF => SequenceResult::invalid(INVALID_START_BYTE),
        0xC0..=0xDF => {
            // C0 and C1 can only encode code points below U+0080.
            if lead <= 0xC1 {
                return SequenceResult::invalid(OVERLONG_2);
            }
            match check_continuations(buffer, i, 2) {
                Ok(()) => SequenceResult::valid(2),
                Err(description) => SequenceResult::invalid(description),
            }
        }
        0xE0..=0xEF => {
            if let Err(description) = check_continuations(buffer, i, 3) {
                return SequenceResult::invalid(description);
            }
            let second = buffer[i + 1];
            if lead == 0xE0 && second < 0xA0 {
                SequenceResult::invalid(OVERLONG_3)
            } else if lead == 0xED && second >= 0xA0 {
                SequenceResult::invalid(SURROGATE)
            } else {
                SequenceResult::valid(3)
            }
        }
        0xF0..=0xF7 => {
            if let Err(description) = check_continuations(buffer, i, 4) {
                return SequenceResult::invalid(description);
            }
            let second = buffer[i + 1];
            if lead == 0xF0 && second < 0x90 {
                SequenceResult::invalid(OVERLONG_4)
            } else if (lead == 0xF4 && second > 0x8F) || lead > 0xF4 {
                SequenceResult::invalid(OUT_OF_RANGE)
            } else {
                SequenceResult::valid(4)
            }
        }
    }
}
