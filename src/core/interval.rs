use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Interval has an empty contig name")]
    EmptyContig,

    #[error("Interval {contig}:{start}-{end} has start greater than end")]
    StartAfterEnd { contig: String, start: u64, end: u64 },
}

/// A half-open genomic region `[start, end)` on a named contig.
///
/// Coordinates are 0-based, the same convention as BED. The `Display`
/// implementation renders the samtools-style 1-based closed region, so
/// `Interval::new("chr1", 0, 5)` prints as `chr1:1-5`. A zero-length interval
/// has no closed form and prints as the gap between two 1-based bases:
/// `Interval::new("chr1", 4, 4)` prints as `chr1:4^5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub contig: String,
    pub start: u64,
    pub end: u64,
}

impl Interval {
    /// Create a validated interval.
    ///
    /// # Errors
    ///
    /// Returns `IntervalError::EmptyContig` if the contig name is empty or
    /// `IntervalError::StartAfterEnd` if `start > end`.
    pub fn new(contig: impl Into<String>, start: u64, end: u64) -> Result<Self, IntervalError> {
        let interval = Self {
            contig: contig.into(),
            start,
            end,
        };
        interval.validate()?;
        Ok(interval)
    }

    /// Check the interval invariants: non-empty contig and `start <= end`.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), IntervalError> {
        if self.contig.is_empty() {
            return Err(IntervalError::EmptyContig);
        }
        if self.start > self.end {
            return Err(IntervalError::StartAfterEnd {
                contig: self.contig.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Number of bases covered by the interval
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pad both ends by `extension` bases, clamping the start at zero.
    #[must_use]
    pub fn extended(&self, extension: u64) -> Self {
        Self {
            contig: self.contig.clone(),
            start: self.start.saturating_sub(extension),
            end: self.end.saturating_add(extension),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}:{}^{}", self.contig, self.start, self.start.saturating_add(1))
        } else {
            write!(f, "{}:{}-{}", self.contig, self.start + 1, self.end)
        }
    }
}
