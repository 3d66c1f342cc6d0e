// SPDX-License-Identifier: MIT
//
// Comparison orchestrator — page-count gate, per-page scoring, aggregate
// sum, and conditional rendering of 3-panel diff canvases.

use image::{imageops, Rgba, RgbaImage};
use tracing::{debug, info, instrument, warn};

use pdfcomp_core::{CompareError, ComparisonOptions, Result};
use pdfcomp_document::{Document, Page};

use crate::differ;
use crate::highlight;

/// Compare two documents page-by-page.
///
/// Returns the aggregate difference: the sum of per-page absolute-error
/// scores in page order. Tolerance gates rendering only, never the returned
/// aggregate. When an output directory is configured, every page scoring
/// strictly above the tolerance is rendered as a 3-panel canvas
/// (original | middle | right) at `{output}/{prefix}{index}.png`.
#[instrument(skip_all, fields(pages = first.page_count(), method = ?options.method))]
pub fn compare(
    first: &mut Document,
    second: &mut Document,
    options: &ComparisonOptions,
) -> Result<f64> {
    if first.page_count() != second.page_count() {
        return Err(CompareError::MismatchingPages {
            first: first.page_count(),
            second: second.page_count(),
        });
    }

    let mut scores = Vec::with_capacity(first.page_count());
    for (page, reference) in first.pages_mut().iter_mut().zip(second.pages().iter()) {
        scores.push(differ::score(page, reference, options.fuzz));
    }

    let total: f64 = scores.iter().sum();
    debug!(total, "pages scored");

    let Some(output) = options.output.as_deref() else {
        return Ok(total);
    };

    // Directory validity is checked unconditionally once output is
    // requested, even if every page turns out to be within tolerance.
    // Creation is idempotent; the is_dir check catches collisions with
    // non-directory files.
    let _ = std::fs::create_dir_all(output);
    if !output.is_dir() {
        return Err(CompareError::BadDirectory(output.to_path_buf()));
    }

    for (index, &score) in scores.iter().enumerate() {
        // Strictly greater-than: a page scoring exactly the tolerance is not
        // rendered.
        if score <= options.tolerance {
            continue;
        }

        let page = &mut first.pages_mut()[index];
        let reference = &mut second.pages_mut()[index];
        let (middle, right) = highlight::panels(options.method, page, reference);

        let canvas = compose_canvas(page, &middle, &right);
        let path = output.join(format!("{}{}.png", options.prefix, index));
        canvas.save(&path).map_err(|err| {
            warn!(%err, path = %path.display(), "cannot write diff image");
            CompareError::BadDirectory(output.to_path_buf())
        })?;
        info!(index, score, path = %path.display(), "diff image written");
    }

    Ok(total)
}

/// Composite the 3-panel canvas: the unmodified original page on the left,
/// the strategy panels in the center and right thirds. Panels are drawn with
/// an alpha-aware overlay, so the white canvas background shows through
/// where a panel is transparent.
fn compose_canvas(page: &Page, middle: &RgbaImage, right: &RgbaImage) -> RgbaImage {
    let width = page.width();
    let height = page.height();

    let mut canvas = RgbaImage::from_pixel(width * 3, height, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, page.as_rgba(), 0, 0);
    imageops::overlay(&mut canvas, middle, i64::from(width), 0);
    imageops::overlay(&mut canvas, right, i64::from(width) * 2, 0);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfcomp_core::HighlightMethod;

    fn solid_doc(colors: &[[u8; 4]], width: u32, height: u32) -> Document {
        Document::from_pages(
            colors
                .iter()
                .map(|&color| Page::new(RgbaImage::from_pixel(width, height, Rgba(color))))
                .collect(),
        )
    }

    #[test]
    fn identical_documents_score_zero() {
        let mut first = solid_doc(&[[10, 20, 30, 255], [40, 50, 60, 255]], 6, 6);
        let mut second = first.clone();

        let total = compare(&mut first, &mut second, &ComparisonOptions::default()).unwrap();
        assert_eq!(total, 0.0);
    }

    #[test]
    fn mismatching_page_counts_always_fail() {
        let mut first = solid_doc(&[[0, 0, 0, 255]], 4, 4);
        let mut second = solid_doc(&[[0, 0, 0, 255], [0, 0, 0, 255]], 4, 4);

        let options = ComparisonOptions {
            tolerance: 1e9,
            fuzz: 255.0,
            ..Default::default()
        };
        let err = compare(&mut first, &mut second, &options).unwrap_err();
        assert!(matches!(
            err,
            CompareError::MismatchingPages {
                first: 1,
                second: 2
            }
        ));
    }

    #[test]
    fn aggregate_is_the_sum_of_per_page_scores() {
        // Page 0: all 16 pixels differ. Page 1: identical.
        let mut first = solid_doc(&[[0, 0, 0, 255], [5, 5, 5, 255]], 4, 4);
        let mut second = solid_doc(&[[255, 255, 255, 255], [5, 5, 5, 255]], 4, 4);

        let total = compare(&mut first, &mut second, &ComparisonOptions::default()).unwrap();
        assert_eq!(total, 16.0);

        // Prefix/tolerance/output permutations do not change the aggregate.
        let dir = tempfile::tempdir().unwrap();
        let options = ComparisonOptions {
            tolerance: 1000.0,
            prefix: "diff-".into(),
            output: Some(dir.path().join("out")),
            ..Default::default()
        };
        let total = compare(&mut first, &mut second, &options).unwrap();
        assert_eq!(total, 16.0);
    }

    #[test]
    fn within_tolerance_creates_directory_but_no_files() {
        let mut first = solid_doc(&[[1, 2, 3, 255]], 4, 4);
        let mut second = first.clone();

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("diffs");
        let options = ComparisonOptions {
            output: Some(output.clone()),
            ..Default::default()
        };

        compare(&mut first, &mut second, &options).unwrap();
        assert!(output.is_dir());
        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 0);
    }

    #[test]
    fn output_colliding_with_a_file_fails_even_within_tolerance() {
        let mut first = solid_doc(&[[1, 2, 3, 255]], 4, 4);
        let mut second = first.clone();

        let dir = tempfile::tempdir().unwrap();
        let collision = dir.path().join("not-a-dir");
        std::fs::write(&collision, b"occupied").unwrap();

        let options = ComparisonOptions {
            output: Some(collision),
            ..Default::default()
        };
        let err = compare(&mut first, &mut second, &options).unwrap_err();
        assert!(matches!(err, CompareError::BadDirectory(_)));
    }

    #[test]
    fn exceeding_page_writes_one_triple_width_canvas() {
        let mut first = solid_doc(&[[0, 0, 0, 255]], 5, 7);
        let mut second = solid_doc(&[[255, 255, 255, 255]], 5, 7);

        let dir = tempfile::tempdir().unwrap();
        let options = ComparisonOptions {
            prefix: "page".into(),
            output: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        compare(&mut first, &mut second, &options).unwrap();

        let written = dir.path().join("page0.png");
        assert!(written.is_file());
        let canvas = image::open(&written).unwrap();
        assert_eq!(canvas.width(), 15);
        assert_eq!(canvas.height(), 7);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn score_equal_to_tolerance_is_not_rendered() {
        let mut first = solid_doc(&[[0, 0, 0, 255]], 4, 4);
        let mut second = solid_doc(&[[255, 255, 255, 255]], 4, 4);

        let dir = tempfile::tempdir().unwrap();
        let options = ComparisonOptions {
            // Every one of the 16 pixels differs, so the score is exactly 16.
            tolerance: 16.0,
            output: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let total = compare(&mut first, &mut second, &options).unwrap();
        assert_eq!(total, 16.0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn every_method_produces_a_structurally_valid_canvas() {
        for method in [
            HighlightMethod::Simple,
            HighlightMethod::Difference,
            HighlightMethod::DoubleCompare,
        ] {
            let mut first = solid_doc(&[[0, 0, 0, 255]], 4, 4);
            let mut second = solid_doc(&[[255, 255, 255, 255]], 4, 4);

            let dir = tempfile::tempdir().unwrap();
            let options = ComparisonOptions {
                method,
                output: Some(dir.path().to_path_buf()),
                ..Default::default()
            };
            compare(&mut first, &mut second, &options).unwrap();

            let canvas = image::open(dir.path().join("0.png")).unwrap();
            assert_eq!((canvas.width(), canvas.height()), (12, 4), "{method:?}");
        }
    }
}
