// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end split tests against PDFs written to a scratch directory.

mod common;

use scanflow_core::error::ScanflowError;
use scanflow_core::types::PageRange;
use scanflow_document::{SplitOptions, SplitterService};

use common::{entries_in, pages_in, write_pdf};

#[test]
fn pdf_info_reports_pages_and_name() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(dir.path(), "report.pdf", 5);

    let info = SplitterService::new().pdf_info(&source).unwrap();

    assert_eq!(info.page_count, 5);
    assert_eq!(info.file_name, "report.pdf");
    assert_eq!(info.file_path, source);
    assert_eq!(info.file_size, std::fs::metadata(&source).unwrap().len());
}

#[test]
fn fixed_split_five_pages_by_two() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(dir.path(), "report.pdf", 5);
    let out = tempfile::tempdir().unwrap();

    let files = SplitterService::new()
        .split_by_fixed_range(&source, 2, out.path(), SplitOptions::default())
        .unwrap();

    let names: Vec<_> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "report_sivut_1-2.pdf",
            "report_sivut_3-4.pdf",
            "report_sivut_5-5.pdf"
        ]
    );
    let sizes: Vec<_> = files.iter().map(|f| pages_in(f)).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[test]
fn custom_ranges_of_ten_page_document() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(dir.path(), "book.pdf", 10);
    let out = tempfile::tempdir().unwrap();
    let ranges = [PageRange::new(1, 3), PageRange::single(5), PageRange::new(8, 10)];

    let files = SplitterService::new()
        .split_by_custom_ranges(&source, &ranges, out.path(), SplitOptions::default())
        .unwrap();

    assert_eq!(files.len(), 3);
    assert_eq!(
        files[2].file_name().unwrap(),
        "book_alue_3_sivut_8-10.pdf"
    );
    let sizes: Vec<_> = files.iter().map(|f| pages_in(f)).collect();
    assert_eq!(sizes, vec![3, 1, 3]);
}

#[test]
fn each_valid_range_has_end_minus_start_plus_one_pages() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(dir.path(), "doc.pdf", 7);
    let out = tempfile::tempdir().unwrap();
    let ranges: Vec<PageRange> = (1..=7)
        .flat_map(|s| (s..=7).map(move |e| PageRange::new(s, e)))
        .step_by(3)
        .collect();

    let files = SplitterService::new()
        .split_by_custom_ranges(&source, &ranges, out.path(), SplitOptions::default())
        .unwrap();

    for (file, range) in files.iter().zip(&ranges) {
        assert_eq!(pages_in(file) as u32, range.end - range.start + 1);
    }
}

#[test]
fn bad_range_rejected_before_any_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(dir.path(), "doc.pdf", 10);
    let out = tempfile::tempdir().unwrap();
    // The first range is fine; the second runs past the end.
    let ranges = [PageRange::new(1, 2), PageRange::new(9, 11)];

    let err = SplitterService::new()
        .split_by_custom_ranges(&source, &ranges, out.path(), SplitOptions::default())
        .unwrap_err();

    assert!(matches!(err, ScanflowError::InvalidRange { start: 9, end: 11, page_count: 10 }));
    assert_eq!(entries_in(out.path()), 0);
}

#[test]
fn inverted_range_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(dir.path(), "doc.pdf", 10);

    let err = SplitterService::new()
        .split_by_custom_ranges(&source, &[PageRange::new(6, 4)], dir.path(), SplitOptions::default())
        .unwrap_err();

    assert!(err.is_validation());
}

#[test]
fn empty_range_list_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(dir.path(), "doc.pdf", 3);

    let err = SplitterService::new()
        .split_by_custom_ranges(&source, &[], dir.path(), SplitOptions::default())
        .unwrap_err();

    assert!(matches!(err, ScanflowError::NoRanges));
}

#[test]
fn zero_pages_per_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(dir.path(), "doc.pdf", 3);

    let err = SplitterService::new()
        .split_by_fixed_range(&source, 0, dir.path(), SplitOptions::default())
        .unwrap_err();

    assert!(matches!(err, ScanflowError::InvalidPagesPerFile(0)));
}

#[test]
fn missing_source_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();

    let err = SplitterService::new()
        .split_by_fixed_range(dir.path().join("gone.pdf"), 2, dir.path(), SplitOptions::default())
        .unwrap_err();

    assert!(matches!(err, ScanflowError::FileNotFound(_)));
}

#[test]
fn non_pdf_source_is_invalid_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("notes.pdf");
    std::fs::write(&source, "just some text").unwrap();

    let err = SplitterService::new().pdf_info(&source).unwrap_err();

    assert!(matches!(err, ScanflowError::InvalidPdf { .. }));
}

#[test]
fn output_dir_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(dir.path(), "doc.pdf", 3);

    let err = SplitterService::new()
        .split_by_fixed_range(&source, 1, dir.path().join("missing"), SplitOptions::default())
        .unwrap_err();

    assert!(matches!(err, ScanflowError::OutputDirectory(_)));
}

#[test]
fn output_dir_that_is_a_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_pdf(dir.path(), "doc.pdf", 3);

    let err = SplitterService::new()
        .split_by_fixed_range(&source, 1, &source, SplitOptions::default())
        .unwrap_err();

    assert!(matches!(err, ScanflowError::OutputDirectory(_)));
}
