// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output file naming conventions.

use std::path::Path;

use crate::types::SplitPart;

/// Which convention to name parts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingScheme {
    /// `<base>_sivut_<start>-<end>.pdf`
    Fixed,
    /// `<base>_alue_<n>_sivut_<start>-<end>.pdf`
    Custom,
}

impl NamingScheme {
    pub fn file_name(&self, base: &str, part: &SplitPart) -> String {
        match self {
            Self::Fixed => fixed_file_name(base, part),
            Self::Custom => custom_file_name(base, part),
        }
    }
}

pub fn fixed_file_name(base: &str, part: &SplitPart) -> String {
    format!("{base}_sivut_{}-{}.pdf", part.first_page(), part.last_page())
}

/// `n` is the 1-based position of the range in the request.
pub fn custom_file_name(base: &str, part: &SplitPart) -> String {
    format!(
        "{base}_alue_{}_sivut_{}-{}.pdf",
        part.index + 1,
        part.first_page(),
        part.last_page()
    )
}

/// Source file name without directory and extension.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_owned())
}
