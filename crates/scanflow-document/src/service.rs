// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Split service — divides a PDF into several files, either by a fixed page
// count per file or by user-supplied page ranges.
//
// The whole plan is computed and validated before the first file is written.
// Progress is reported after each part and a shared cancellation flag is
// checked before each part.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use scanflow_core::error::{Result, ScanflowError};
use scanflow_core::naming::{self, NamingScheme};
use scanflow_core::partition;
use scanflow_core::types::{
    JobId, PageRange, PdfDocumentInfo, SplitMode, SplitPart, SplitReport, SplitRequest,
};
use tracing::{debug, info, instrument};

use crate::pdf::PdfRepository;

/// Optional knobs for a split call.
#[derive(Default, Clone, Copy)]
pub struct SplitOptions<'a> {
    /// Replaces the source file stem in output names.
    pub base_filename: Option<&'a str>,
    /// Called with a percentage (0–100) after each written part.
    pub progress: Option<&'a (dyn Fn(u8) + Send + Sync)>,
    /// Checked before each part; when raised the split stops with
    /// [`ScanflowError::Cancelled`].
    pub cancel: Option<&'a AtomicBool>,
}

impl<'a> SplitOptions<'a> {
    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn report(&self, done: usize, total: usize) {
        if let Some(progress) = self.progress {
            progress(((done * 100) / total) as u8);
        }
    }
}

/// Stateless PDF split service.
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitterService;

impl SplitterService {
    pub fn new() -> Self {
        Self
    }

    /// Page count, name, and size of a PDF on disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn pdf_info(&self, path: impl AsRef<Path>) -> Result<PdfDocumentInfo> {
        Ok(PdfRepository::load(path)?.info())
    }

    /// Split into files of `pages_per_file` pages each; the last file holds
    /// the remainder.
    #[instrument(skip_all, fields(source = %source.as_ref().display(), pages_per_file = pages_per_file))]
    pub fn split_by_fixed_range(
        &self,
        source: impl AsRef<Path>,
        pages_per_file: u32,
        output_dir: impl AsRef<Path>,
        options: SplitOptions<'_>,
    ) -> Result<Vec<PathBuf>> {
        if pages_per_file < 1 {
            return Err(ScanflowError::InvalidPagesPerFile(pages_per_file));
        }
        let output_dir = ensure_output_dir(output_dir.as_ref())?;

        let repo = PdfRepository::load(source.as_ref())?;
        let parts = partition::fixed_parts(repo.page_count(), pages_per_file)?;

        info!(
            pages = repo.page_count(),
            pages_per_file,
            parts = parts.len(),
            "Fixed split"
        );

        write_parts(&repo, &parts, output_dir, NamingScheme::Fixed, &options)
    }

    /// Split into one file per range. Ranges are 1-based and inclusive; every
    /// range is checked against the document before anything is written.
    #[instrument(skip_all, fields(source = %source.as_ref().display(), ranges = ranges.len()))]
    pub fn split_by_custom_ranges(
        &self,
        source: impl AsRef<Path>,
        ranges: &[PageRange],
        output_dir: impl AsRef<Path>,
        options: SplitOptions<'_>,
    ) -> Result<Vec<PathBuf>> {
        if ranges.is_empty() {
            return Err(ScanflowError::NoRanges);
        }
        let output_dir = ensure_output_dir(output_dir.as_ref())?;

        let repo = PdfRepository::load(source.as_ref())?;
        let parts = partition::custom_parts(repo.page_count(), ranges)?;

        info!(pages = repo.page_count(), parts = parts.len(), "Custom range split");

        write_parts(&repo, &parts, output_dir, NamingScheme::Custom, &options)
    }

    /// Run a [`SplitRequest`] and time it.
    ///
    /// `request.base_filename` takes precedence over `options.base_filename`.
    pub fn run(
        &self,
        job_id: JobId,
        request: &SplitRequest,
        options: SplitOptions<'_>,
    ) -> Result<SplitReport> {
        let started_at = Utc::now();
        let options = SplitOptions {
            base_filename: request.base_filename.as_deref().or(options.base_filename),
            ..options
        };

        info!(%job_id, mode = ?request.mode, "Split job started");

        let files = match &request.mode {
            SplitMode::Fixed { pages_per_file } => self.split_by_fixed_range(
                &request.source,
                *pages_per_file,
                &request.output_dir,
                options,
            )?,
            SplitMode::Custom { ranges } => self.split_by_custom_ranges(
                &request.source,
                ranges,
                &request.output_dir,
                options,
            )?,
        };

        Ok(SplitReport {
            job_id,
            source: request.source.clone(),
            files,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

fn ensure_output_dir(dir: &Path) -> Result<&Path> {
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(ScanflowError::OutputDirectory(dir.to_path_buf()))
    }
}

fn write_parts(
    repo: &PdfRepository,
    parts: &[SplitPart],
    output_dir: &Path,
    scheme: NamingScheme,
    options: &SplitOptions<'_>,
) -> Result<Vec<PathBuf>> {
    // The file stem of the source is used unless the caller overrides it.
    let base = match options.base_filename {
        Some(base) if !base.trim().is_empty() => base.to_owned(),
        _ => repo
            .source_path()
            .map(naming::base_name)
            .unwrap_or_else(|| "document".to_owned()),
    };

    let mut written = Vec::with_capacity(parts.len());
    for part in parts {
        if options.is_cancelled() {
            info!(written = written.len(), total = parts.len(), "Split cancelled");
            return Err(ScanflowError::Cancelled);
        }

        let path = output_dir.join(scheme.file_name(&base, part));
        let extracted = repo.extract_pages(part.start_idx, part.end_idx)?;
        written.push(extracted.save(&path)?);

        debug!(
            part = part.index + 1,
            first = part.first_page(),
            last = part.last_page(),
            "Part written"
        );
        options.report(written.len(), parts.len());
    }

    Ok(written)
}
