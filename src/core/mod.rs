//! Core data types for coverage annotation.
//!
//! - [`Interval`]: a half-open `[start, end)` region on a named contig
//! - [`AnnotationResult`]: coverage and completeness for one interval
//! - [`AnnotationSummary`]: totals over an annotation run
//!
//! ## Coordinates
//!
//! | Where | Convention | `chr1` first five bases |
//! |-------|------------|-------------------------|
//! | BED input, [`Interval`] fields | 0-based, half-open | `0 5` |
//! | `Display`, text output | 1-based, closed | `chr1:1-5` |
//!
//! [`Interval`]: interval::Interval
//! [`AnnotationResult`]: types::AnnotationResult
//! [`AnnotationSummary`]: types::AnnotationSummary

pub mod interval;
pub mod types;
