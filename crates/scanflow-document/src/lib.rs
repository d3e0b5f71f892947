// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanflow-document — PDF handling for the Scanflow splitter.
//
// Provides the lopdf-backed repository (load, inspect, extract page ranges,
// save) and the split service that turns a page plan into output files.

pub mod pdf;
pub mod service;

// Re-export the primary structs so callers can use `scanflow_document::PdfRepository` etc.
pub use pdf::repository::{ExtractedPdf, PdfRepository};
pub use service::{SplitOptions, SplitterService};
