// SPDX-License-Identifier: MIT
//
// Page — a single raster page plus its per-comparison settings (fuzz
// tolerance, highlight/lowlight colors) and the pixel-level comparison
// primitives built on them.

use image::{DynamicImage, Rgba, RgbaImage};

/// Default highlight color for differing regions (opaque red).
pub const DEFAULT_HIGHLIGHT: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Default lowlight color for matching regions (fully transparent).
pub const DEFAULT_LOWLIGHT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// One raster page of a [`Document`](crate::Document).
///
/// A page is owned by exactly one document slot. The fuzz and color settings
/// are mutated in place during scoring and diff rendering; this is safe
/// because pages are never shared between concurrently active comparisons.
/// Cloning a page deep-copies the pixel buffer.
#[derive(Debug, Clone)]
pub struct Page {
    pixels: RgbaImage,
    fuzz: f64,
    highlight: Rgba<u8>,
    lowlight: Rgba<u8>,
}

impl Page {
    /// Wrap an already-decoded RGBA buffer.
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            fuzz: 0.0,
            highlight: DEFAULT_HIGHLIGHT,
            lowlight: DEFAULT_LOWLIGHT,
        }
    }

    /// Convert any decoded image into a page.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::new(image.to_rgba8())
    }

    /// Page width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Page height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the underlying pixel buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Set the per-channel comparison tolerance (0–255 scale). Values outside
    /// that range are clamped when the metric is evaluated.
    pub fn set_fuzz(&mut self, fuzz: f64) {
        self.fuzz = fuzz;
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }

    /// Color used for differing regions in diff visualizations.
    pub fn set_highlight(&mut self, color: Rgba<u8>) {
        self.highlight = color;
    }

    /// Color used for matching regions in diff visualizations.
    pub fn set_lowlight(&mut self, color: Rgba<u8>) {
        self.lowlight = color;
    }

    /// Absolute-error metric: the number of pixels that differ from `other`
    /// beyond this page's fuzz tolerance.
    ///
    /// The metric is evaluated over the union of both extents; a pixel that
    /// exists in only one of the two pages always counts as different. This
    /// keeps the score deterministic when page counts match but an individual
    /// pair disagrees on dimensions.
    pub fn error_count(&self, other: &Page) -> f64 {
        let fuzz = effective_fuzz(self.fuzz);
        let width = self.width().max(other.width());
        let height = self.height().max(other.height());

        let mut errors = 0u64;
        for y in 0..height {
            for x in 0..width {
                match (checked_pixel(&self.pixels, x, y), checked_pixel(&other.pixels, x, y)) {
                    (Some(a), Some(b)) => {
                        if pixels_differ(a, b, fuzz) {
                            errors += 1;
                        }
                    }
                    _ => errors += 1,
                }
            }
        }
        errors as f64
    }

    /// Difference-visualization image: this page compared against `other`,
    /// with differing pixels painted in this page's highlight color and
    /// matching pixels in its lowlight color.
    ///
    /// The result has this page's dimensions; pixels with no counterpart in
    /// `other` are treated as differing.
    pub fn diff_visual(&self, other: &Page) -> RgbaImage {
        let fuzz = effective_fuzz(self.fuzz);
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let a = self.pixels.get_pixel(x, y);
            match checked_pixel(&other.pixels, x, y) {
                Some(b) if !pixels_differ(a, b, fuzz) => self.lowlight,
                _ => self.highlight,
            }
        })
    }

    /// Change-mask image: this page's own pixels where they differ from
    /// `other`, fully transparent where they match.
    pub fn change_mask(&self, other: &Page) -> RgbaImage {
        let fuzz = effective_fuzz(self.fuzz);
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let a = self.pixels.get_pixel(x, y);
            match checked_pixel(&other.pixels, x, y) {
                Some(b) if !pixels_differ(a, b, fuzz) => Rgba([0, 0, 0, 0]),
                _ => *a,
            }
        })
    }
}

fn effective_fuzz(fuzz: f64) -> f64 {
    fuzz.clamp(0.0, 255.0)
}

fn checked_pixel(image: &RgbaImage, x: u32, y: u32) -> Option<&Rgba<u8>> {
    if x < image.width() && y < image.height() {
        Some(image.get_pixel(x, y))
    } else {
        None
    }
}

/// True when any channel differs by more than `fuzz` quantum levels.
fn pixels_differ(a: &Rgba<u8>, b: &Rgba<u8>, fuzz: f64) -> bool {
    a.0.iter()
        .zip(b.0.iter())
        .any(|(&ca, &cb)| f64::from(ca.abs_diff(cb)) > fuzz)
}
