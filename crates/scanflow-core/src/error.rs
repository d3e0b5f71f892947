// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scanflow.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Scanflow operations.
#[derive(Debug, Error)]
pub enum ScanflowError {
    // -- Source document --
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("not a valid PDF ({}): {reason}", path.display())]
    InvalidPdf { path: PathBuf, reason: String },

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("cannot split an empty document by ranges")]
    EmptyDocument,

    // -- Split settings --
    #[error("invalid or out-of-bounds range {start}-{end} (document has pages 1-{page_count})")]
    InvalidRange {
        start: u32,
        end: u32,
        page_count: u32,
    },

    #[error("cannot parse page range `{0}`")]
    RangeSyntax(String),

    #[error("at least one page range must be given")]
    NoRanges,

    #[error("pages per file must be at least 1, got {0}")]
    InvalidPagesPerFile(u32),

    // -- Output --
    #[error("output directory missing or not a directory: {}", .0.display())]
    OutputDirectory(PathBuf),

    #[error("failed to save {}: {reason}", path.display())]
    Save { path: PathBuf, reason: String },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Job control --
    #[error("split cancelled")]
    Cancelled,
}

impl ScanflowError {
    /// True for errors caused by the request itself rather than the
    /// environment. These are rejected before any file is written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. }
                | Self::RangeSyntax(_)
                | Self::NoRanges
                | Self::InvalidPagesPerFile(_)
                | Self::EmptyDocument
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanflowError>;
