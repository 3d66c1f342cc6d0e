// SPDX-License-Identifier: MIT
//
// Unified error types for pdfcomp.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all pdfcomp operations.
///
/// Every variant is terminal for the current comparison: nothing is retried
/// internally and no partial aggregate is ever produced.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The document path is unreadable, or the file could not be decoded.
    /// Decode-time failures inside the imaging backend are caught at the
    /// loader boundary and mapped here.
    #[error("failed to parse file: '{}'", .0.display())]
    BadFile(PathBuf),

    /// The requested output path exists but is not a usable directory, or it
    /// could not be created.
    #[error("given output directory ('{}') is not valid", .0.display())]
    BadDirectory(PathBuf),

    /// The two documents have different page counts. Comparison of
    /// unequal-length documents is refused outright, there is no best-effort
    /// partial scoring.
    #[error("given documents have differing page count ({first}/{second})")]
    MismatchingPages { first: usize, second: usize },
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CompareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_file_names_the_path() {
        let err = CompareError::BadFile(PathBuf::from("missing.pdf"));
        assert_eq!(err.to_string(), "failed to parse file: 'missing.pdf'");
    }

    #[test]
    fn mismatching_pages_reports_both_counts() {
        let err = CompareError::MismatchingPages {
            first: 3,
            second: 5,
        };
        assert!(err.to_string().contains("(3/5)"));
    }
}
