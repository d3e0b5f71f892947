// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing notifications.
//
// Every error is mapped to a plain English message shown in a notification
// banner (or a single terminal line in the CLI). Nothing is retried
// automatically, so there is no retry hint here.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScanflowError;

/// Message shown when something fails that the user cannot fix directly.
pub const GENERIC_FAILURE: &str =
    "Unexpected error while splitting the PDF. See the log file for details.";

/// Notification level. Drives colour/icon in the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A message ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    /// Notification for a finished split.
    ///
    /// An empty result is not an error: a zero-page document splits into
    /// nothing.
    pub fn split_finished(files: &[impl AsRef<Path>]) -> Self {
        match files.first() {
            Some(first) => {
                let dir = first
                    .as_ref()
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                Self::success(format!(
                    "PDF split into {} files. Saved to: {dir}",
                    files.len()
                ))
            }
            None => Self::info("Split finished, no files were created."),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.label(), self.message)
    }
}

/// Convert a `ScanflowError` into a notification the user can act on.
pub fn notify(err: &ScanflowError) -> Notification {
    match err {
        ScanflowError::FileNotFound(_) => Notification::error(
            "File not found. Check that the file is still available.",
        ),

        ScanflowError::InvalidPdf { path, .. } => Notification::error(format!(
            "{} could not be opened as a PDF. The file may be damaged.",
            file_label(path)
        )),

        ScanflowError::Pdf(detail) => Notification::error(format!("Split failed: {detail}")),

        // Request problems: the user can fix the settings and try again.
        ScanflowError::InvalidRange { .. }
        | ScanflowError::RangeSyntax(_)
        | ScanflowError::EmptyDocument => {
            Notification::error(format!("Split failed: {err}"))
        }

        ScanflowError::NoRanges => Notification::error("Define at least one page range."),

        ScanflowError::InvalidPagesPerFile(_) => {
            Notification::error("Invalid settings. Pages per file must be greater than 0.")
        }

        ScanflowError::OutputDirectory(_) => {
            Notification::warning("Choose an existing output folder before splitting.")
        }

        ScanflowError::Save { .. } | ScanflowError::Io(_) => {
            Notification::error(format!("Error while processing the file: {err}"))
        }

        ScanflowError::Serialization(_) => Notification::error(GENERIC_FAILURE),

        ScanflowError::Cancelled => Notification::info("Split cancelled."),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_is_error() {
        let n = notify(&ScanflowError::FileNotFound(PathBuf::from("/nope.pdf")));
        assert_eq!(n.level, NotificationLevel::Error);
        assert!(n.message.contains("not found"));
    }

    #[test]
    fn invalid_range_message_names_bounds() {
        let n = notify(&ScanflowError::InvalidRange {
            start: 4,
            end: 12,
            page_count: 10,
        });
        assert_eq!(n.level, NotificationLevel::Error);
        assert!(n.message.contains("4-12"));
        assert!(n.message.contains("1-10"));
    }

    #[test]
    fn missing_output_dir_is_warning() {
        let n = notify(&ScanflowError::OutputDirectory(PathBuf::from("/x")));
        assert_eq!(n.level, NotificationLevel::Warning);
    }

    #[test]
    fn invalid_pdf_uses_file_name_only() {
        let n = notify(&ScanflowError::InvalidPdf {
            path: PathBuf::from("/some/dir/report.pdf"),
            reason: "bad xref".into(),
        });
        assert!(n.message.starts_with("report.pdf"));
    }

    #[test]
    fn finished_with_files_reports_count_and_dir() {
        let files = vec![
            PathBuf::from("/out/a_sivut_1-2.pdf"),
            PathBuf::from("/out/a_sivut_3-3.pdf"),
        ];
        let n = Notification::split_finished(&files);
        assert_eq!(n.level, NotificationLevel::Success);
        assert!(n.message.contains("2 files"));
        assert!(n.message.contains("/out"));
    }

    #[test]
    fn finished_without_files_is_info() {
        let files: Vec<PathBuf> = Vec::new();
        assert_eq!(
            Notification::split_finished(&files).level,
            NotificationLevel::Info
        );
    }
}
