// SPDX-License-Identifier: MIT
//
// Page differ — scalar difference between two equally-sized pages.

use pdfcomp_document::Page;

/// Score a page pair under the given fuzz tolerance.
///
/// Sets the first page's fuzz in place (pages are per-comparison and never
/// shared across concurrently active comparisons), then evaluates the
/// absolute-error metric: the number of pixels differing beyond the
/// tolerance.
pub fn score(first: &mut Page, second: &Page, fuzz: f64) -> f64 {
    first.set_fuzz(fuzz);
    first.error_count(second)
}
