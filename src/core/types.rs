use serde::{Deserialize, Serialize};

use crate::core::interval::Interval;

/// Coverage statistics for a single interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationResult {
    pub interval: Interval,

    /// Mean depth over the interval
    pub coverage: f64,

    /// Fraction of bases with depth at or above the cutoff
    pub completeness: f64,
}

impl AnnotationResult {
    #[must_use]
    pub fn new(interval: Interval, coverage: f64, completeness: f64) -> Self {
        Self {
            interval,
            coverage,
            completeness,
        }
    }

    /// Destructure into the `(interval, coverage, completeness)` triple
    #[must_use]
    pub fn into_parts(self) -> (Interval, f64, f64) {
        (self.interval, self.coverage, self.completeness)
    }
}

/// Running totals collected while annotating an interval stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSummary {
    /// Intervals annotated
    pub intervals: u64,

    /// Bases across all annotated intervals
    pub bases: u64,

    /// Groups queried, one store read each
    pub groups: u64,

    /// Sum of per-base depth over all annotated bases
    pub depth_sum: u64,

    /// Bases at or above the cutoff
    pub bases_at_cutoff: u64,
}

impl AnnotationSummary {
    /// Add one annotated interval's depths
    pub fn record_interval(&mut self, depths: &[u32], cutoff: u32) {
        self.intervals += 1;
        self.bases += depths.len() as u64;
        self.depth_sum += depths.iter().map(|&d| u64::from(d)).sum::<u64>();
        self.bases_at_cutoff += depths.iter().filter(|&&d| d >= cutoff).count() as u64;
    }

    /// Mean depth across every annotated base, 0 when nothing was annotated
    #[must_use]
    pub fn mean_coverage(&self) -> f64 {
        ratio(self.depth_sum, self.bases)
    }

    /// Fraction of all annotated bases at or above the cutoff
    #[must_use]
    pub fn completeness(&self) -> f64 {
        ratio(self.bases_at_cutoff, self.bases)
    }
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
