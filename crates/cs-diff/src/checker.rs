//! The comparison entry point.

use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::error::{DiffError, DiffResult};
use crate::hunk::{generate_hunks, Hunk};
use crate::options::DiffOptions;
use crate::part::{compute_parts, preprocess_text};
use crate::stats::{calculate_stats, generate_summary, Stats};

/// Line counts of the two inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TotalLines {
    pub file1: usize,
    pub file2: usize,
}

/// The outcome of comparing two texts.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResult {
    /// Always `true`; kept so serialized results have a stable shape.
    pub success: bool,
    pub stats: Stats,
    pub summary: String,
    pub hunks: Vec<Hunk>,
    /// Milliseconds spent aligning lines. Excludes stats and hunk building.
    pub processing_time: u64,
    pub total_lines: TotalLines,
    /// `true` if nothing was added or removed after preprocessing.
    pub identical: bool,
}

/// Name and size of a compared file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
}

/// A [`CompareResult`] with metadata of the files it came from.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCompareResult {
    pub file1: FileInfo,
    pub file2: FileInfo,
    #[serde(flatten)]
    pub result: CompareResult,
}

/// Compares texts line by line with a fixed set of options.
#[derive(Clone, Debug, Default)]
pub struct DiffChecker {
    options: DiffOptions,
}

impl DiffChecker {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compare two texts.
    ///
    /// Case and whitespace folding only affect alignment; hunk content is
    /// taken from the original texts.
    pub fn compare(&self, text1: &str, text2: &str) -> CompareResult {
        let processed1 = preprocess_text(text1, &self.options);
        let processed2 = preprocess_text(text2, &self.options);
        let lines1: Vec<&str> = processed1.iter().map(|l| &**l).collect();
        let lines2: Vec<&str> = processed2.iter().map(|l| &**l).collect();

        let started = Instant::now();
        let parts = compute_parts(&lines1, &lines2, &self.options);
        let processing_time = started.elapsed().as_millis() as u64;

        let total_lines = TotalLines {
            file1: lines1.len(),
            file2: lines2.len(),
        };
        let stats = calculate_stats(
            &parts,
            total_lines.file1,
            total_lines.file2,
            self.options.max_display_changes,
        );
        let hunks = generate_hunks(&parts, text1, text2, self.options.context_lines);
        let summary = generate_summary(&stats);
        let identical = stats.is_identical();

        debug!(
            added = stats.added,
            removed = stats.removed,
            hunks = hunks.len(),
            processing_time,
            "comparison complete"
        );

        CompareResult {
            success: true,
            stats,
            summary,
            hunks,
            processing_time,
            total_lines,
            identical,
        }
    }

    /// Compare two byte buffers holding UTF-8 text.
    pub fn compare_bytes(&self, bytes1: &[u8], bytes2: &[u8]) -> DiffResult<CompareResult> {
        let text1 = as_text(bytes1, "first input")?;
        let text2 = as_text(bytes2, "second input")?;
        Ok(self.compare(text1, text2))
    }

    /// One-shot comparison with the given options.
    pub fn compare_text(text1: &str, text2: &str, options: DiffOptions) -> CompareResult {
        Self::new(options).compare(text1, text2)
    }

    /// Read two files and compare their contents.
    ///
    /// Filesystem errors are returned unchanged inside [`DiffError::Io`].
    pub fn compare_files(
        path1: impl AsRef<Path>,
        path2: impl AsRef<Path>,
        options: DiffOptions,
    ) -> DiffResult<FileCompareResult> {
        let (path1, path2) = (path1.as_ref(), path2.as_ref());
        let bytes1 = read_file(path1)?;
        let bytes2 = read_file(path2)?;

        let text1 = as_text(&bytes1, &path1.display().to_string())?;
        let text2 = as_text(&bytes2, &path2.display().to_string())?;
        let result = Self::new(options).compare(text1, text2);

        Ok(FileCompareResult {
            file1: file_info(path1, &bytes1),
            file2: file_info(path2, &bytes2),
            result,
        })
    }
}

fn read_file(path: &Path) -> DiffResult<Vec<u8>> {
    debug!(?path, "reading input");
    fs::read(path).map_err(|source| DiffError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn as_text<'a>(bytes: &'a [u8], label: &str) -> DiffResult<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| DiffError::InvalidInput {
        label: label.to_string(),
        reason: e.to_string(),
    })
}

fn file_info(path: &Path, bytes: &[u8]) -> FileInfo {
    FileInfo {
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        size: bytes.len() as u64,
    }
}
