// SPDX-License-Identifier: MIT
//
// pdfcomp-compare — The comparison core: per-page scoring, the three
// highlight strategies, and the orchestrator that aggregates scores and
// renders 3-panel diff canvases.

pub mod compare;
pub mod differ;
pub mod highlight;

pub use compare::compare;
pub use differ::score;
pub use highlight::panels;
