//! UTF-8 validation and repair for cscheck.
//!
//! Classifies every byte of a buffer against the UTF-8 grammar (RFC 3629,
//! rejecting overlong forms, surrogates and code points past U+10FFFF),
//! reports each invalid byte with its position and surrounding text, and
//! rewrites buffers with one of three repair strategies.
//!
//! # Key Types
//!
//! - [`Utf8Checker`] / [`ValidationOptions`] -- Entry point and configuration
//! - [`ValidationResult`] / [`Issue`] -- Outcome of a validation pass
//! - [`IssueScanner`] -- Lazy, interruptible scan yielding issues one by one
//! - [`FixMode`] / [`FixResult`] -- Repair strategies and their output
//! - [`EncodingInfo`] / [`EncodingAnalysis`] -- BOM detection and heuristics

pub mod analysis;
pub mod bom;
pub mod checker;
pub mod error;
pub mod fix;
pub mod options;
pub mod scanner;
pub mod sequence;

pub use analysis::{analyze_encoding_issues, EncodingAnalysis, EncodingIssue, EncodingIssueKind};
pub use bom::{detect_bom, EncodingInfo, EncodingKind};
pub use checker::{Utf8Checker, ValidationResult, ValidationStats};
pub use error::{Result, Utf8CheckError};
pub use fix::{fix_buffer, FixMode, FixResult};
pub use options::ValidationOptions;
pub use scanner::{Issue, IssueContext, IssueScanner, ScanProgress};
pub use sequence::{validate_utf8_sequence, SequenceResult};
