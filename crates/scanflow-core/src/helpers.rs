// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Small formatting helpers shared by front-ends.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human readable size with two decimals, base 1024 (e.g. `"1.46 KB"`).
pub fn format_file_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.2} {}", UNITS[unit])
}
