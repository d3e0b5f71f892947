// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persistent splitter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Pages per file pre-filled for fixed splits.
    pub default_pages_per_file: u32,
    /// Output directory used by the previous split, offered again next time.
    pub last_output_dir: Option<PathBuf>,
    /// Name of the debug log file inside the data directory.
    pub log_file_name: String,
    /// Upper bound for the "pages per file" input.
    pub max_parts_input: u32,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            default_pages_per_file: 1,
            last_output_dir: None,
            log_file_name: "scanflow.log".to_owned(),
            max_parts_input: crate::partition::MAX_PARTS_INPUT,
        }
    }
}
