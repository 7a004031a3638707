use serde::Serialize;

/// Coverage and completeness of one depth slice
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub coverage: f64,
    pub completeness: f64,
}

/// Compute mean depth and the fraction of bases at or above `cutoff`.
///
/// An empty slice (zero-length interval) yields zero for both values.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn calculate_metrics(depths: &[u32], cutoff: u32) -> Metrics {
    if depths.is_empty() {
        return Metrics {
            coverage: 0.0,
            completeness: 0.0,
        };
    }

    let total: u64 = depths.iter().map(|&d| u64::from(d)).sum();
    let passing = depths.iter().filter(|&&d| d >= cutoff).count();
    let len = depths.len() as f64;

    Metrics {
        coverage: total as f64 / len,
        completeness: passing as f64 / len,
    }
}
