//! Mapping a group's depth array back onto its member intervals.

use crate::annotator::error::AnnotateError;
use crate::annotator::grouper::IntervalGroup;
use crate::core::interval::Interval;

/// The slice of `depths` (indexed from `span_start`) covering `interval`.
///
/// # Errors
///
/// Returns `AnnotateError::DataConsistency` if the interval starts before the
/// span or the array is too short to cover it. Nothing is truncated or padded.
pub fn member_slice<'d>(
    interval: &Interval,
    span_start: u64,
    depths: &'d [u32],
) -> Result<&'d [u32], AnnotateError> {
    let inconsistent = || AnnotateError::DataConsistency {
        interval: interval.to_string(),
        span_start,
        depth_len: depths.len(),
    };

    let offset = interval.start.checked_sub(span_start).ok_or_else(inconsistent)?;
    let from = usize::try_from(offset).map_err(|_| inconsistent())?;
    let len = usize::try_from(interval.len()).map_err(|_| inconsistent())?;
    let to = from.checked_add(len).ok_or_else(inconsistent)?;

    depths.get(from..to).ok_or_else(inconsistent)
}

/// A group whose depth array has been read, handing out member slices in
/// order.
#[derive(Debug)]
pub struct ProcessedGroup {
    span_start: u64,
    depths: Vec<u32>,
    members: std::vec::IntoIter<Interval>,
}

impl ProcessedGroup {
    #[must_use]
    pub fn new(group: IntervalGroup, depths: Vec<u32>) -> Self {
        Self {
            span_start: group.span_start,
            depths,
            members: group.members.into_iter(),
        }
    }

    /// Next member interval together with its depth slice.
    pub fn next_member(&mut self) -> Option<Result<(Interval, &[u32]), AnnotateError>> {
        let interval = self.members.next()?;
        Some(member_slice(&interval, self.span_start, &self.depths).map(|slice| (interval, slice)))
    }
}
