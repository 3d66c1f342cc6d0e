// SPDX-License-Identifier: MIT
//
// External PDF rasterizer plumbing. Pages are rendered to PNG by `pdftoppm`
// (poppler); the binary is resolved exactly once per process.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::density::Density;

/// Environment variable overriding the renderer location.
const RENDERER_ENV: &str = "PDFCOMP_PDFTOPPM";

static RENDERER: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Resolve the external renderer binary.
///
/// The lookup runs exactly once per process; concurrent first callers block on
/// the `OnceLock` until the winning initialization completes. Order:
/// `PDFCOMP_PDFTOPPM`, then a `PATH` search for `pdftoppm`.
pub(crate) fn renderer() -> Option<&'static Path> {
    RENDERER.get_or_init(locate_renderer).as_deref()
}

fn locate_renderer() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(RENDERER_ENV) {
        let candidate = PathBuf::from(explicit);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "renderer from environment");
            return Some(candidate);
        }
        warn!(
            path = %candidate.display(),
            "{RENDERER_ENV} does not point at a file, falling back to PATH"
        );
    }

    let search_path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&search_path) {
        for name in ["pdftoppm", "pdftoppm.exe"] {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "renderer found on PATH");
                return Some(candidate);
            }
        }
    }
    None
}

/// Render every page of `pdf` into `scratch` as PNG at the given density,
/// returning the page files in page order.
pub(crate) fn rasterize(
    renderer: &Path,
    pdf: &Path,
    density: Density,
    scratch: &Path,
) -> std::io::Result<Vec<PathBuf>> {
    let rx = density.horizontal_dpi.round().max(1.0) as u32;
    let ry = density.vertical_dpi.round().max(1.0) as u32;
    let prefix = scratch.join("page");

    let status = Command::new(renderer)
        .arg("-png")
        .arg("-rx")
        .arg(rx.to_string())
        .arg("-ry")
        .arg(ry.to_string())
        .arg(pdf)
        .arg(&prefix)
        .status()?;

    if !status.success() {
        return Err(std::io::Error::other(format!(
            "renderer exited with {status}"
        )));
    }

    let mut pages: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(scratch)? {
        let path = entry?.path();
        let is_page = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("page-") && name.ends_with(".png"));
        if is_page {
            pages.push(path);
        }
    }
    // pdftoppm zero-pads page numbers, so lexicographic order is page order.
    pages.sort();
    debug!(count = pages.len(), "pages rasterized");
    Ok(pages)
}
