// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — loading, page extraction, and saving.

pub mod repository;

pub use repository::{ExtractedPdf, PdfRepository};
