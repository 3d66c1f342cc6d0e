// SPDX-License-Identifier: MIT
//
// pdfcomp-document — Document loading for pdfcomp.
//
// Provides the multi-page `Document` type (PDF rasterization via an external
// renderer, single-page decoding of plain raster formats via the `image`
// crate), the `Page` raster primitive with its pixel-comparison operations,
// and ImageMagick-style density-string parsing.

pub mod density;
pub mod document;
pub mod page;

mod render;

pub use density::Density;
pub use document::Document;
pub use page::Page;
