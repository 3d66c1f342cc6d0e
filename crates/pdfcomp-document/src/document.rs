// SPDX-License-Identifier: MIT
//
// Document — an ordered, fixed-length sequence of rasterized pages loaded
// from a source path at a given density.
//
// PDFs are validated with `lopdf` first (a corrupt file fails before any
// process is spawned), then rasterized page-by-page through the external
// renderer. TIFFs decode frame-by-frame via the `tiff` crate, so a
// multi-page TIFF keeps every page. Other raster formats decode via the
// `image` crate as single-page documents. Every failure on this boundary
// maps to `BadFile`; nothing escapes as a panic.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use pdfcomp_core::{CompareError, Result};

use crate::density::Density;
use crate::page::Page;
use crate::render;

/// A loaded multi-page raster document.
///
/// The page sequence is fixed once constructed: callers can mutate individual
/// pages in place (fuzz/color settings during comparison) but never add or
/// remove pages. Cloning deep-copies every page buffer, so a duplicate never
/// aliases mutable state with the original.
#[derive(Debug, Clone)]
pub struct Document {
    pages: Vec<Page>,
    source: PathBuf,
    density: String,
}

impl Document {
    /// Load a document from the filesystem at the given density.
    ///
    /// The path is canonicalized first; a nonexistent or unreadable path
    /// fails with `BadFile` before any decode attempt.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), density))]
    pub fn load(path: impl AsRef<Path>, density: &str) -> Result<Self> {
        let requested = path.as_ref();
        let canonical = requested
            .canonicalize()
            .map_err(|_| CompareError::BadFile(requested.to_path_buf()))?;

        let resolution = Density::parse(density);
        let pages = if is_pdf(&canonical) {
            load_pdf_pages(&canonical, resolution)?
        } else if is_tiff(&canonical) {
            load_tiff_pages(&canonical)?
        } else {
            load_raster_page(&canonical)?
        };

        info!(pages = pages.len(), "document loaded");
        Ok(Self {
            pages,
            source: canonical,
            density: density.to_owned(),
        })
    }

    /// Build a document from already-rasterized pages, for embedders that
    /// hold page content in memory.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            pages,
            source: PathBuf::new(),
            density: String::new(),
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Read-only access to a single page.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// All pages in page order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Mutable access to the pages for in-place fuzz/color configuration.
    /// The slice borrow keeps the sequence length fixed.
    pub fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    /// Source path the document was loaded from, empty for in-memory
    /// documents.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Density string used at load time.
    pub fn density(&self) -> &str {
        &self.density
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn is_tiff(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff"))
}

fn load_pdf_pages(path: &Path, density: Density) -> Result<Vec<Page>> {
    let bad_file = || CompareError::BadFile(path.to_path_buf());

    // Validate the PDF and learn its page count before spawning anything.
    let parsed = lopdf::Document::load(path).map_err(|err| {
        warn!(%err, "PDF validation failed");
        bad_file()
    })?;
    let expected = parsed.get_pages().len();
    debug!(pages = expected, "PDF validated");

    if expected == 0 {
        return Ok(Vec::new());
    }

    let renderer = render::renderer().ok_or_else(|| {
        warn!("no pdftoppm renderer available (set PDFCOMP_PDFTOPPM or install poppler)");
        bad_file()
    })?;

    let scratch = tempfile::tempdir().map_err(|err| {
        warn!(%err, "cannot create scratch directory");
        bad_file()
    })?;

    let rendered = render::rasterize(renderer, path, density, scratch.path()).map_err(|err| {
        warn!(%err, "rasterization failed");
        bad_file()
    })?;

    if rendered.len() != expected {
        warn!(
            rendered = rendered.len(),
            expected, "renderer produced an unexpected page count"
        );
        return Err(bad_file());
    }

    let mut pages = Vec::with_capacity(rendered.len());
    for page_path in rendered {
        let decoded = image::open(&page_path).map_err(|err| {
            warn!(%err, page = %page_path.display(), "cannot decode rendered page");
            bad_file()
        })?;
        pages.push(Page::from_dynamic(decoded));
    }
    Ok(pages)
}

fn load_tiff_pages(path: &Path) -> Result<Vec<Page>> {
    use tiff::decoder::{Decoder, DecodingResult};
    use tiff::ColorType;

    let bad_file = || CompareError::BadFile(path.to_path_buf());

    let file = std::fs::File::open(path).map_err(|err| {
        warn!(%err, "cannot open TIFF");
        bad_file()
    })?;
    let mut decoder = Decoder::new(std::io::BufReader::new(file)).map_err(|err| {
        warn!(%err, "TIFF decode failed");
        bad_file()
    })?;

    // Each image file directory is one page; iterate until the chain ends.
    let mut pages = Vec::new();
    loop {
        let (width, height) = decoder.dimensions().map_err(|err| {
            warn!(%err, "cannot read TIFF dimensions");
            bad_file()
        })?;
        let color = decoder.colortype().map_err(|err| {
            warn!(%err, "cannot read TIFF color type");
            bad_file()
        })?;
        let frame = decoder.read_image().map_err(|err| {
            warn!(%err, "cannot decode TIFF frame");
            bad_file()
        })?;

        let decoded = match (frame, color) {
            (DecodingResult::U8(data), ColorType::Gray(8)) => {
                image::GrayImage::from_raw(width, height, data)
                    .map(image::DynamicImage::ImageLuma8)
            }
            (DecodingResult::U8(data), ColorType::RGB(8)) => {
                image::RgbImage::from_raw(width, height, data).map(image::DynamicImage::ImageRgb8)
            }
            (DecodingResult::U8(data), ColorType::RGBA(8)) => {
                image::RgbaImage::from_raw(width, height, data).map(image::DynamicImage::ImageRgba8)
            }
            (DecodingResult::U16(data), ColorType::Gray(16)) => {
                image::ImageBuffer::from_raw(width, height, data)
                    .map(image::DynamicImage::ImageLuma16)
            }
            (DecodingResult::U16(data), ColorType::RGB(16)) => {
                image::ImageBuffer::from_raw(width, height, data)
                    .map(image::DynamicImage::ImageRgb16)
            }
            (DecodingResult::U16(data), ColorType::RGBA(16)) => {
                image::ImageBuffer::from_raw(width, height, data)
                    .map(image::DynamicImage::ImageRgba16)
            }
            (_, color) => {
                warn!(?color, "unsupported TIFF color type");
                return Err(bad_file());
            }
        }
        .ok_or_else(|| {
            warn!(width, height, "TIFF frame data does not match its dimensions");
            bad_file()
        })?;
        pages.push(Page::from_dynamic(decoded));

        if decoder.next_image().is_err() {
            break;
        }
    }

    debug!(pages = pages.len(), "TIFF decoded");
    Ok(pages)
}

fn load_raster_page(path: &Path) -> Result<Vec<Page>> {
    let decoded = image::open(path).map_err(|err| {
        warn!(%err, "image decode failed");
        CompareError::BadFile(path.to_path_buf())
    })?;
    Ok(vec![Page::from_dynamic(decoded)])
}
