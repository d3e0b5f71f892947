// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Scanflow PDF splitter.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a split job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-supplied page range, 1-based and inclusive on both ends.
///
/// Construction does not validate against a document; see
/// [`crate::partition::custom_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A range covering one page.
    pub fn single(page: u32) -> Self {
        Self::new(page, page)
    }

    /// Whether `1 <= start <= end <= page_count`.
    pub fn fits(&self, page_count: u32) -> bool {
        self.start >= 1 && self.start <= self.end && self.end <= page_count
    }
}

impl From<(u32, u32)> for PageRange {
    fn from((start, end): (u32, u32)) -> Self {
        Self::new(start, end)
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// How a document should be divided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitMode {
    /// Consecutive chunks of a constant page count.
    Fixed { pages_per_file: u32 },
    /// User-chosen intervals, possibly overlapping or non-contiguous.
    Custom { ranges: Vec<PageRange> },
}

/// Everything needed to run one split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRequest {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub mode: SplitMode,
    /// Overrides the source file stem in output names.
    pub base_filename: Option<String>,
}

/// One output file of a split, as zero-based inclusive page indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPart {
    /// Position of this part in the split (0-based).
    pub index: usize,
    pub start_idx: u32,
    pub end_idx: u32,
}

impl SplitPart {
    /// First page as shown to the user (1-based).
    pub fn first_page(&self) -> u32 {
        self.start_idx + 1
    }

    /// Last page as shown to the user (1-based).
    pub fn last_page(&self) -> u32 {
        self.end_idx + 1
    }

    pub fn page_count(&self) -> u32 {
        self.end_idx - self.start_idx + 1
    }
}

/// Summary of a loaded source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfDocumentInfo {
    pub file_path: PathBuf,
    pub file_name: String,
    pub page_count: u32,
    /// Size on disk in bytes.
    pub file_size: u64,
}

/// Entries of the PDF `/Info` dictionary. All optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfMetadata {
    pub version: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
}

/// Result of a completed split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitReport {
    pub job_id: JobId,
    pub source: PathBuf,
    /// Written files in request order.
    pub files: Vec<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SplitReport {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
