//! Batching of sorted intervals into span-bounded groups.
//!
//! Intervals must arrive sorted by `(contig, start)`. A group collects
//! consecutive same-contig intervals for as long as the span from the group's
//! first start to the incoming interval's end stays within `bp_threshold`.
//! An interval wider than the threshold on its own becomes a singleton group
//! that exceeds it; nothing is ever split or dropped.

use std::convert::Infallible;

use tracing::debug;

use crate::core::interval::Interval;

/// A batch of same-contig intervals fetched from the depth store in one read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalGroup {
    pub contig: String,
    pub members: Vec<Interval>,
    pub span_start: u64,
    pub span_end: u64,
}

impl IntervalGroup {
    fn start_with(interval: Interval) -> Self {
        Self {
            contig: interval.contig.clone(),
            span_start: interval.start,
            span_end: interval.end,
            members: vec![interval],
        }
    }

    fn push(&mut self, interval: Interval) {
        self.span_end = self.span_end.max(interval.end);
        self.members.push(interval);
    }

    /// Width of the store query covering every member
    #[must_use]
    pub fn span_len(&self) -> u64 {
        self.span_end - self.span_start
    }

    /// Whether `interval` can join this group without the span growing past
    /// `bp_threshold`. The comparison is inclusive: a span of exactly
    /// `bp_threshold` bases still fits.
    #[must_use]
    pub fn accepts(&self, interval: &Interval, bp_threshold: u64) -> bool {
        interval.contig == self.contig
            && interval.end.saturating_sub(self.span_start) <= bp_threshold
    }
}

/// Lazy iterator turning a stream of intervals into [`IntervalGroup`]s.
///
/// Errors from the input stream are passed through in order: any group
/// accumulated before the failing item is emitted first, then the error.
pub struct IntervalGrouper<I, E> {
    intervals: I,
    bp_threshold: u64,
    current: Option<IntervalGroup>,
    pending_error: Option<E>,
}

impl<I, E> IntervalGrouper<I, E>
where
    I: Iterator<Item = Result<Interval, E>>,
{
    pub fn new(intervals: I, bp_threshold: u64) -> Self {
        Self {
            intervals,
            bp_threshold,
            current: None,
            pending_error: None,
        }
    }

    fn flush(&mut self) -> Option<IntervalGroup> {
        let group = self.current.take()?;
        if group.members.len() == 1 && group.span_len() > self.bp_threshold {
            debug!(
                contig = %group.contig,
                span = group.span_len(),
                threshold = self.bp_threshold,
                "Interval wider than threshold forms its own group"
            );
        }
        Some(group)
    }
}

impl<I, E> Iterator for IntervalGrouper<I, E>
where
    I: Iterator<Item = Result<Interval, E>>,
{
    type Item = Result<IntervalGroup, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(error) = self.pending_error.take() {
            return Some(Err(error));
        }

        loop {
            let interval = match self.intervals.next() {
                Some(Ok(interval)) => interval,
                Some(Err(error)) => {
                    return match self.flush() {
                        Some(group) => {
                            self.pending_error = Some(error);
                            Some(Ok(group))
                        }
                        None => Some(Err(error)),
                    };
                }
                None => return self.flush().map(Ok),
            };

            let bp_threshold = self.bp_threshold;
            match self.current {
                Some(ref mut group) if group.accepts(&interval, bp_threshold) => {
                    group.push(interval);
                }
                Some(_) => {
                    let finished = self.flush();
                    self.current = Some(IntervalGroup::start_with(interval));
                    return finished.map(Ok);
                }
                None => self.current = Some(IntervalGroup::start_with(interval)),
            }
        }
    }
}

/// Group an infallible interval stream.
pub fn group_intervals<I>(intervals: I, bp_threshold: u64) -> impl Iterator<Item = IntervalGroup>
where
    I: IntoIterator<Item = Interval>,
{
    IntervalGrouper::new(
        intervals.into_iter().map(Ok::<_, Infallible>),
        bp_threshold,
    )
    .map(|result| match result {
        Ok(group) => group,
        Err(never) => match never {},
    })
}
