//! Symmetric interval padding.

use crate::annotator::config::ConfigError;
use crate::core::interval::Interval;

/// Pad an interval by `extension` bases on both sides.
///
/// The start is clamped at zero. Each interval is padded on its own, so two
/// disjoint neighbours may overlap afterwards; nothing here merges them.
///
/// # Errors
///
/// Returns `ConfigError::NegativeExtension` if `extension < 0`.
pub fn extend_interval(interval: &Interval, extension: i64) -> Result<Interval, ConfigError> {
    let bases = u64::try_from(extension).map_err(|_| ConfigError::NegativeExtension(extension))?;
    Ok(interval.extended(bases))
}
