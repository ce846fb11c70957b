//! Line diff engine for cscheck.
//!
//! Compares two texts line by line, picking a cheaper alignment strategy for
//! very large inputs, and produces aggregate statistics together with
//! context-windowed hunks suitable for display or unified-diff export.
//!
//! # Key Types
//!
//! - [`DiffChecker`] / [`DiffOptions`] -- Entry point and its configuration
//! - [`CompareResult`] / [`Stats`] -- Outcome of a comparison
//! - [`Hunk`] / [`HunkLine`] -- Change regions with surrounding context
//! - [`DiffPart`] -- Raw alignment output consumed by stats and hunks

pub mod checker;
pub mod error;
pub mod hunk;
pub mod options;
pub mod part;
pub mod stats;
pub mod unified;

pub use checker::{CompareResult, DiffChecker, FileCompareResult, FileInfo, TotalLines};
pub use error::{DiffError, DiffResult};
pub use hunk::{generate_hunks, Hunk, HunkLine, HunkLineKind, MAX_HUNKS};
pub use options::DiffOptions;
pub use part::{compute_parts, preprocess_text, split_lines, DiffPart};
pub use stats::{calculate_stats, generate_summary, ChangeKind, ChangedLine, Stats};
pub use unified::generate_unified_diff;
