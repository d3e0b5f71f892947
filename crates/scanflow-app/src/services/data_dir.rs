// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::{Path, PathBuf};

/// Return the application data directory under `base`, or under the
/// conventional location when `base` is `None`. Creates it if needed.
pub fn data_dir(base: Option<&Path>) -> std::io::Result<PathBuf> {
    let dir = match base {
        Some(base) => base.to_path_buf(),
        None => dirs_fallback().join("scanflow"),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn dirs_fallback() -> PathBuf {
    // XDG first, then ~/.local/share. Empty values count as unset.
    let non_empty = |key: &str| std::env::var_os(key).filter(|v| !v.is_empty());

    if let Some(xdg) = non_empty("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Some(home) = non_empty("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    std::env::temp_dir()
}
