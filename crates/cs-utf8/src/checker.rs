//! The validation entry point.

use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::analysis::{analyze_encoding_issues, EncodingAnalysis};
use crate::bom::{detect_bom, EncodingInfo};
use crate::error::{Result, Utf8CheckError};
use crate::fix::{fix_buffer, FixMode, FixResult};
use crate::options::ValidationOptions;
use crate::scanner::{Issue, IssueScanner};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub rows: usize,
    /// Full buffer length divided by `rows`, rounded. When the scan was
    /// truncated, `rows` only covers the scanned prefix.
    pub average_bytes_per_row: usize,
}

/// The outcome of validating one buffer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` iff the scan found no issue at all.
    pub valid: bool,
    pub encoding: EncodingInfo,
    pub total_bytes: usize,
    pub valid_bytes: usize,
    /// Bytes covered by the recorded issues.
    pub invalid_bytes: usize,
    pub issue_count: usize,
    /// Set when an issue beyond `max_issues` was found. The scan stops
    /// there and later bytes are not read.
    pub truncated: bool,
    pub issues: Vec<Issue>,
    /// Milliseconds.
    pub processing_time: u64,
    pub stats: ValidationStats,
}

/// Validates and repairs UTF-8 byte buffers.
#[derive(Clone, Debug, Default)]
pub struct Utf8Checker {
    options: ValidationOptions,
}

impl Utf8Checker {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Start a lazy scan over `buffer`. See [`IssueScanner`].
    pub fn scan<'a>(&self, buffer: &'a [u8]) -> IssueScanner<'a> {
        IssueScanner::new(buffer)
    }

    /// Validate `buffer`, recording at most `max_issues` issues.
    pub fn validate(&self, buffer: &[u8]) -> ValidationResult {
        let started = Instant::now();
        let encoding = detect_bom(buffer);

        let mut scanner = self.scan(buffer);
        let mut issues = Vec::new();
        let mut truncated = false;
        for issue in scanner.by_ref() {
            if issues.len() >= self.options.max_issues {
                truncated = true;
                break;
            }
            issues.push(issue);
        }
        if truncated {
            warn!(
                max_issues = self.options.max_issues,
                scanned = scanner.progress().processed,
                total = buffer.len(),
                "issue limit exceeded, validation stopped early"
            );
        }

        let rows = scanner.row();
        let average_bytes_per_row = if rows > 0 {
            (buffer.len() as f64 / rows as f64).round() as usize
        } else {
            0
        };
        let processing_time = started.elapsed().as_millis() as u64;

        debug!(
            total_bytes = buffer.len(),
            issues = issues.len(),
            truncated,
            processing_time,
            "validation complete"
        );

        ValidationResult {
            valid: issues.is_empty() && !truncated,
            encoding,
            total_bytes: buffer.len(),
            valid_bytes: scanner.valid_bytes(),
            invalid_bytes: issues.len(),
            issue_count: issues.len(),
            truncated,
            issues,
            processing_time,
            stats: ValidationStats {
                rows,
                average_bytes_per_row,
            },
        }
    }

    /// Rewrite `buffer` with every invalid byte repaired per `mode`.
    pub fn fix(&self, buffer: &[u8], mode: FixMode) -> FixResult {
        let result = fix_buffer(buffer, mode, self.options.replacement_char);
        debug!(?mode, fixed = result.fixed_count, "fix complete");
        result
    }

    /// Heuristic encoding diagnosis. See [`analyze_encoding_issues`].
    pub fn analyze_encoding_issues(&self, buffer: &[u8]) -> EncodingAnalysis {
        analyze_encoding_issues(buffer)
    }

    /// Read and validate a file.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<ValidationResult> {
        let path = path.as_ref();
        let buffer = fs::read(path).map_err(|e| Utf8CheckError::io(path, e))?;
        debug!(?path, bytes = buffer.len(), "validating file");
        Ok(self.validate(&buffer))
    }

    /// Read `input`, fix it and write the result to `output`.
    ///
    /// `output` may equal `input` to repair in place.
    pub fn fix_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        mode: FixMode,
    ) -> Result<FixResult> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let buffer = fs::read(input).map_err(|e| Utf8CheckError::io(input, e))?;
        let result = self.fix(&buffer, mode);
        fs::write(output, &result.buffer).map_err(|e| Utf8CheckError::io(output, e))?;
        debug!(?input, ?output, fixed = result.fixed_count, "wrote fixed file");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use proptest::prelude::*;

    use super::*;
    use crate::bom::EncodingKind;

    #[test]
    fn single_invalid_byte() {
        let r = Utf8Checker::default().validate(&[0x41, 0xFF, 0x42]);
        assert!(!r.valid);
        assert_eq!(r.issue_count, 1);
        assert_eq!(r.issues[0].byte_offset, 1);
        assert_eq!(r.issues[0].invalid_byte_hex, "0xFF");
        assert_eq!(r.issues[0].description, "Invalid UTF-8 start byte (>= 0xF8)");
        assert_eq!(r.valid_bytes, 2);
        assert_eq!(r.invalid_bytes, 1);
        assert_eq!(r.total_bytes, 3);
        assert!(!r.truncated);
    }

    #[test]
    fn valid_text_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("line one\nligne deux é\n".as_bytes());
        let r = Utf8Checker::default().validate(&bytes);
        assert!(r.valid);
        assert_eq!(r.encoding.kind, EncodingKind::Utf8);
        assert_eq!(r.valid_bytes, bytes.len());
        assert_eq!(r.stats.rows, 3);
        assert_eq!(r.stats.average_bytes_per_row, (bytes.len() as f64 / 3.0).round() as usize);
    }

    #[test]
    fn empty_buffer() {
        let r = Utf8Checker::default().validate(&[]);
        assert!(r.valid);
        assert_eq!(r.stats.rows, 1);
        assert_eq!(r.stats.average_bytes_per_row, 0);
        assert_eq!(r.encoding.kind, EncodingKind::Utf8Assumed);
    }

    #[test]
    fn truncation_stops_the_scan() {
        let checker = Utf8Checker::new(ValidationOptions {
            max_issues: 2,
            ..Default::default()
        });
        let bytes = [0xFF, 0x41, 0xFF, 0x41, 0xFF, 0x41];
        let r = checker.validate(&bytes);
        assert!(r.truncated);
        assert_eq!(r.issue_count, 2);
        assert_eq!(r.invalid_bytes, 2);
        // Scanning stopped at the third bad byte.
        assert_eq!(r.valid_bytes, 2);
        assert!(!r.valid);
    }

    #[test]
    fn issue_count_matching_the_cap_is_not_truncated() {
        let checker = Utf8Checker::new(ValidationOptions {
            max_issues: 2,
            ..Default::default()
        });
        let r = checker.validate(&[0xFF, 0x41, 0xFF, 0x41]);
        assert!(!r.truncated);
        assert_eq!(r.issue_count, 2);
        assert_eq!(r.valid_bytes + r.invalid_bytes, 4);
    }

    #[test]
    fn zero_cap_records_nothing() {
        let checker = Utf8Checker::new(ValidationOptions {
            max_issues: 0,
            ..Default::default()
        });
        let r = checker.validate(b"ok\xFFok");
        assert!(r.issues.is_empty());
        assert_eq!(r.issue_count, 0);
        assert_eq!(r.invalid_bytes, 0);
        assert!(r.truncated);
        assert!(!r.valid);

        let r = checker.validate("all good".as_bytes());
        assert!(!r.truncated);
        assert!(r.valid);
    }

    #[test]
    fn average_uses_full_length_when_truncated() {
        let checker = Utf8Checker::new(ValidationOptions {
            max_issues: 1,
            ..Default::default()
        });
        let bytes = b"a\nb\n\xFF\xFF\xFF\nc";
        let r = checker.validate(bytes);
        assert!(r.truncated);
        // Rows seen before stopping: 3. Bytes: 9.
        assert_eq!(r.stats.rows, 3);
        assert_eq!(r.stats.average_bytes_per_row, 3);

        let r = Utf8Checker::default().validate(bytes);
        assert!(!r.truncated);
        assert_eq!(r.stats.rows, 4);
        assert_eq!(r.stats.average_bytes_per_row, 2);
    }

    #[test]
    fn fix_uses_configured_replacement() {
        let checker = Utf8Checker::new(ValidationOptions {
            replacement_char: '?',
            ..Default::default()
        });
        let r = checker.fix(&[0x61, 0xC0, 0x62], FixMode::Replace);
        assert_eq!(r.buffer, b"a?b");
        assert_eq!(r.fixed_count, 1);
    }

    #[test]
    fn fix_and_validate_agree() {
        let bytes = b"ok \xE0\x80\x80 \xED\xA0\x80 \xF4\x90\x80\x80 \xC3 done";
        let checker = Utf8Checker::default();
        let report = checker.validate(bytes);
        let fixed = checker.fix(bytes, FixMode::Remove);
        assert_eq!(report.invalid_bytes, fixed.fixed_count);
        assert!(checker.validate(&fixed.buffer).valid);
    }

    #[test]
    fn validate_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, b"abc\xFF").unwrap();

        let r = Utf8Checker::default().validate_file(&path).unwrap();
        assert_eq!(r.issue_count, 1);
        assert_eq!(r.issues[0].byte_offset, 3);
    }

    #[test]
    fn validate_file_propagates_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Utf8Checker::default()
            .validate_file(dir.path().join("missing.txt"))
            .unwrap_err();
        assert_eq!(err.io_kind(), ErrorKind::NotFound);
    }

    #[test]
    fn fix_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, b"x\xFFy\xFEz").unwrap();

        let r = Utf8Checker::default()
            .fix_file(&input, &output, FixMode::Escape)
            .unwrap();
        assert_eq!(r.fixed_count, 2);
        assert_eq!(fs::read(&output).unwrap(), b"x\\xffy\\xfez");
        // Input untouched.
        assert_eq!(fs::read(&input).unwrap(), b"x\xFFy\xFEz");
    }

    #[test]
    fn result_serializes_with_report_field_names() {
        let r = Utf8Checker::default().validate(&[0x41, 0xFF]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["issueCount"], 1);
        assert_eq!(json["issues"][0]["invalidByteHex"], "0xFF");
        assert_eq!(json["issues"][0]["byteOffset"], 1);
        assert!(json["issues"][0]["context"]["linePreview"].is_string());
        assert_eq!(json["encoding"]["hasBOM"], false);
        assert_eq!(json["stats"]["averageBytesPerRow"], 2);
    }

    proptest! {
        #[test]
        fn valid_strings_validate(text in "\\PC{0,64}") {
            let r = Utf8Checker::default().validate(text.as_bytes());
            prop_assert!(r.valid);
            prop_assert_eq!(r.invalid_bytes, 0);
            prop_assert_eq!(r.valid_bytes, text.len());
        }

        #[test]
        fn every_byte_is_accounted_for(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let r = Utf8Checker::default().validate(&bytes);
            prop_assert_eq!(r.valid_bytes + r.invalid_bytes, bytes.len());
            prop_assert_eq!(r.valid, std::str::from_utf8(&bytes).is_ok());
        }
    }
}
