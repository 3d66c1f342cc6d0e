// SPDX-License-Identifier: MIT
//
// pdfcomp — Core types shared across all crates: the error taxonomy and the
// comparison option set.

pub mod error;
pub mod options;

pub use error::{CompareError, Result};
pub use options::{ComparisonOptions, HighlightMethod};
