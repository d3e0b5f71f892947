// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-range partitioning.
//
// Turns a page count plus either a chunk size or a list of user ranges into
// zero-based extraction boundaries. Everything here is validated up front so
// that no output file is written for a request that is going to fail.

use crate::error::{Result, ScanflowError};
use crate::types::{PageRange, SplitMode, SplitPart};

/// Default upper bound for [`validate_parts_count`].
pub const MAX_PARTS_INPUT: u32 = 100;

/// Number of parts a fixed split produces: `ceil(page_count / pages_per_file)`.
pub fn total_parts(page_count: u32, pages_per_file: u32) -> u32 {
    if page_count == 0 || pages_per_file == 0 {
        return 0;
    }
    page_count.div_ceil(pages_per_file)
}

/// Consecutive chunks of `pages_per_file` pages. The last chunk holds the
/// remainder.
pub fn fixed_parts(page_count: u32, pages_per_file: u32) -> Result<Vec<SplitPart>> {
    if pages_per_file == 0 {
        return Err(ScanflowError::InvalidPagesPerFile(pages_per_file));
    }

    let parts = (0..total_parts(page_count, pages_per_file))
        .map(|i| {
            let start_idx = i * pages_per_file;
            // Saturating keeps the last chunk in bounds for page counts near u32::MAX.
            let end_idx = start_idx
                .saturating_add(pages_per_file - 1)
                .min(page_count - 1);
            SplitPart {
                index: i as usize,
                start_idx,
                end_idx,
            }
        })
        .collect();

    Ok(parts)
}

/// One part per user range, in request order.
///
/// Fails on the first range outside `1..=page_count` or with `start > end`,
/// before any part is returned.
pub fn custom_parts(page_count: u32, ranges: &[PageRange]) -> Result<Vec<SplitPart>> {
    if ranges.is_empty() {
        return Err(ScanflowError::NoRanges);
    }
    if page_count == 0 {
        return Err(ScanflowError::EmptyDocument);
    }

    ranges
        .iter()
        .enumerate()
        .map(|(index, range)| {
            if !range.fits(page_count) {
                return Err(ScanflowError::InvalidRange {
                    start: range.start,
                    end: range.end,
                    page_count,
                });
            }
            Ok(SplitPart {
                index,
                start_idx: range.start - 1,
                end_idx: range.end - 1,
            })
        })
        .collect()
}

/// Dispatch on [`SplitMode`].
pub fn plan(page_count: u32, mode: &SplitMode) -> Result<Vec<SplitPart>> {
    match mode {
        SplitMode::Fixed { pages_per_file } => fixed_parts(page_count, *pages_per_file),
        SplitMode::Custom { ranges } => custom_parts(page_count, ranges),
    }
}

/// Parse range text such as `"1-5, 8, 11-13"`.
///
/// Blank items are skipped, so trailing commas are harmless. Every range is
/// checked against `max_pages`.
pub fn parse_page_ranges(text: &str, max_pages: u32) -> Result<Vec<PageRange>> {
    let mut ranges = Vec::new();

    for item in text.split(',').map(str::trim) {
        if item.is_empty() {
            continue;
        }

        let range = match item.split_once('-') {
            Some((start, end)) => PageRange::new(parse_page(start, item)?, parse_page(end, item)?),
            None => PageRange::single(parse_page(item, item)?),
        };

        if !range.fits(max_pages) {
            return Err(ScanflowError::InvalidRange {
                start: range.start,
                end: range.end,
                page_count: max_pages,
            });
        }
        ranges.push(range);
    }

    Ok(ranges)
}

fn parse_page(number: &str, item: &str) -> Result<u32> {
    number
        .trim()
        .parse::<u32>()
        .map_err(|_| ScanflowError::RangeSyntax(item.to_owned()))
}

/// Validate the text of a "parts count" input field.
///
/// An empty field is accepted (the user is still typing); otherwise the
/// value must be an integer in `1..=max`.
pub fn validate_parts_count(value: &str, max: u32) -> bool {
    if value.is_empty() {
        return true;
    }
    value
        .parse::<i64>()
        .map(|n| (1..=i64::from(max)).contains(&n))
        .unwrap_or(false)
}
