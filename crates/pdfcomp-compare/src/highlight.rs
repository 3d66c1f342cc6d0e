// SPDX-License-Identifier: MIT
//
// Highlight strategies — given a page pair, produce the middle and right
// panels of the diff canvas. Each strategy mutates its input pages'
// highlight/lowlight settings as a side effect; pages belong to the current
// comparison and are not reused afterwards.

use image::{Rgba, RgbaImage};

use pdfcomp_core::HighlightMethod;
use pdfcomp_document::Page;

/// Flat highlight applied to the second page by Simple and DoubleCompare.
/// The first page keeps its default red highlight in the middle panel.
const HIGHLIGHT_BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Run the configured strategy on a page pair, returning `(middle, right)`
/// panels for compositing.
pub fn panels(
    method: HighlightMethod,
    first: &mut Page,
    second: &mut Page,
) -> (RgbaImage, RgbaImage) {
    match method {
        HighlightMethod::Simple => simple(first, second),
        HighlightMethod::Difference => difference(first, second),
        HighlightMethod::DoubleCompare => double_compare(first, second),
    }
}

/// Middle: diff visualization of first against second, with the first page's
/// default highlight. Right: the second page as loaded; the recoloring only
/// configures how the second page would highlight, its pixels stay untouched.
fn simple(first: &mut Page, second: &mut Page) -> (RgbaImage, RgbaImage) {
    second.set_lowlight(TRANSPARENT);
    second.set_highlight(HIGHLIGHT_BLUE);

    (first.diff_visual(second), second.as_rgba().clone())
}

/// Middle: change mask of first over second (only changed pixels of the
/// first page survive). Right: highlighted diff of first against second,
/// transparent where the pages agree.
fn difference(first: &mut Page, second: &Page) -> (RgbaImage, RgbaImage) {
    let mask = first.change_mask(second);

    first.set_lowlight(TRANSPARENT);
    let highlighted = first.diff_visual(second);

    (mask, highlighted)
}

/// Diff computed in both directions. The forward panel uses the first page's
/// default highlight; the reverse panel renders in blue on transparent and
/// surfaces directional artifacts (regions present in one page only) that a
/// single-direction comparison hides.
fn double_compare(first: &mut Page, second: &mut Page) -> (RgbaImage, RgbaImage) {
    second.set_lowlight(TRANSPARENT);
    second.set_highlight(HIGHLIGHT_BLUE);

    (first.diff_visual(second), second.diff_visual(first))
}
