// SPDX-License-Identifier: MIT
//
// Comparison options and the highlight-method selector.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Highlighting algorithm used when rendering per-page diff images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightMethod {
    /// Middle panel is the highlighted diff of the first page against the
    /// second, right panel the second page as loaded.
    #[default]
    Simple,
    /// Middle panel is a change mask (changed pixels of the first page,
    /// unchanged pixels dropped), right panel a highlighted diff.
    Difference,
    /// Diff computed in both directions, surfacing directional artifacts a
    /// single-direction comparison would hide.
    DoubleCompare,
}

impl HighlightMethod {
    /// Map the CLI selector (0/1/2) to a method. Values outside the range are
    /// a usage error and yield `None`.
    pub fn from_selector(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Simple),
            1 => Some(Self::Difference),
            2 => Some(Self::DoubleCompare),
            _ => None,
        }
    }
}

/// Options controlling a single comparison invocation.
///
/// `fuzz` and `tolerance` are deliberately not range-validated here; that is
/// the caller's responsibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonOptions {
    /// Per-pixel-channel tolerance (0–255 scale) applied before the
    /// absolute-error metric is computed.
    pub fuzz: f64,
    /// Per-page score threshold above which a diff image is rendered when an
    /// output directory is configured. Strictly greater-than: a page scoring
    /// exactly the tolerance produces no file.
    pub tolerance: f64,
    /// Highlighting algorithm for rendered diffs.
    pub method: HighlightMethod,
    /// Prefix prepended to output filenames.
    pub prefix: String,
    /// Directory to write diff images into. When absent, no files are
    /// written and only the aggregate score is computed.
    pub output: Option<PathBuf>,
}
