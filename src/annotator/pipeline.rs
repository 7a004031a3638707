//! The annotation pipeline.
//!
//! ```text
//! intervals ─▶ validate ─▶ extend ─▶ group ─▶ read depth ─▶ slice ─▶ metrics
//! ```
//!
//! Every stage is lazy. Pulling a result may cross a group boundary, which
//! triggers exactly one depth-store read for the next group. Only the current
//! group's depth array is held in memory.

use std::convert::Infallible;

use tracing::debug;

use crate::annotator::config::{AnnotatorConfig, ConfigError};
use crate::annotator::error::AnnotateError;
use crate::annotator::extend::extend_interval;
use crate::annotator::grouper::IntervalGrouper;
use crate::annotator::metrics::calculate_metrics;
use crate::annotator::processor::ProcessedGroup;
use crate::core::interval::Interval;
use crate::core::types::{AnnotationResult, AnnotationSummary};
use crate::store::DepthStore;

/// Validates each incoming interval, then pads it by the configured extension.
pub struct PreparedIntervals<I> {
    intervals: I,
    extension: i64,
}

impl<I, E> Iterator for PreparedIntervals<I>
where
    I: Iterator<Item = Result<Interval, E>>,
    AnnotateError: From<E>,
{
    type Item = Result<Interval, AnnotateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let interval = match self.intervals.next()? {
            Ok(interval) => interval,
            Err(error) => return Some(Err(error.into())),
        };
        let prepared = interval
            .validate()
            .map_err(AnnotateError::Interval)
            .and_then(|()| {
                extend_interval(&interval, self.extension).map_err(AnnotateError::Config)
            });
        Some(prepared)
    }
}

/// Lazy iterator of [`AnnotationResult`]s, one per input interval, in input
/// order.
///
/// The first error ends the stream: it is yielded once and every later call
/// to `next` returns `None`.
pub struct Annotator<'s, S: ?Sized, I> {
    store: &'s mut S,
    groups: IntervalGrouper<PreparedIntervals<I>, AnnotateError>,
    cutoff: u32,
    current: Option<ProcessedGroup>,
    summary: AnnotationSummary,
    finished: bool,
}

impl<'s, S, I, E> Annotator<'s, S, I>
where
    S: DepthStore + ?Sized,
    I: Iterator<Item = Result<Interval, E>>,
    AnnotateError: From<E>,
{
    /// Build an annotator over `intervals`, reading depth from `store`.
    ///
    /// The configuration is validated here, before any interval is pulled.
    /// `intervals` must be sorted by `(contig, start)`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for a negative extension or a zero threshold.
    pub fn new(store: &'s mut S, intervals: I, config: &AnnotatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let prepared = PreparedIntervals {
            intervals,
            extension: config.extension,
        };

        Ok(Self {
            store,
            groups: IntervalGrouper::new(prepared, config.bp_threshold),
            cutoff: config.cutoff,
            current: None,
            summary: AnnotationSummary::default(),
            finished: false,
        })
    }

    /// Totals for everything annotated so far
    pub fn summary(&self) -> &AnnotationSummary {
        &self.summary
    }

    fn load_next_group(&mut self) -> Option<Result<(), AnnotateError>> {
        let group = match self.groups.next()? {
            Ok(group) => group,
            Err(error) => return Some(Err(error)),
        };

        debug!(
            contig = %group.contig,
            start = group.span_start,
            end = group.span_end,
            members = group.members.len(),
            "Reading depth for interval group"
        );

        match self
            .store
            .read_depth(&group.contig, group.span_start, group.span_end)
        {
            Ok(depths) => {
                self.summary.groups += 1;
                self.current = Some(ProcessedGroup::new(group, depths));
                Some(Ok(()))
            }
            Err(source) => Some(Err(AnnotateError::Store {
                contig: group.contig,
                start: group.span_start,
                end: group.span_end,
                source,
            })),
        }
    }
}

impl<S, I, E> Iterator for Annotator<'_, S, I>
where
    S: DepthStore + ?Sized,
    I: Iterator<Item = Result<Interval, E>>,
    AnnotateError: From<E>,
{
    type Item = Result<AnnotationResult, AnnotateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(group) = self.current.as_mut() {
                match group.next_member() {
                    Some(Ok((interval, depths))) => {
                        let metrics = calculate_metrics(depths, self.cutoff);
                        self.summary.record_interval(depths, self.cutoff);
                        return Some(Ok(AnnotationResult::new(
                            interval,
                            metrics.coverage,
                            metrics.completeness,
                        )));
                    }
                    Some(Err(error)) => {
                        self.finished = true;
                        return Some(Err(error));
                    }
                    None => self.current = None,
                }
            }

            match self.load_next_group() {
                Some(Ok(())) => {}
                Some(Err(error)) => {
                    self.finished = true;
                    return Some(Err(error));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

/// Annotator over an in-memory list of already valid intervals
pub type IntervalAnnotator<'s, S, T> =
    Annotator<'s, S, std::iter::Map<T, fn(Interval) -> Result<Interval, Infallible>>>;

/// Annotate plain intervals (no upstream parse errors possible).
///
/// # Errors
///
/// Returns a `ConfigError` if `config` is invalid.
pub fn annotate_intervals<'s, S, T>(
    store: &'s mut S,
    intervals: T,
    config: &AnnotatorConfig,
) -> Result<IntervalAnnotator<'s, S, T::IntoIter>, ConfigError>
where
    S: DepthStore + ?Sized,
    T: IntoIterator<Item = Interval>,
{
    let infallible: fn(Interval) -> Result<Interval, Infallible> = Ok;
    Annotator::new(store, intervals.into_iter().map(infallible), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::bed::BedReader;
    use crate::store::{InMemoryDepthStore, StoreError};

    fn iv(contig: &str, start: u64, end: u64) -> Interval {
        Interval::new(contig, start, end).unwrap()
    }

    /// Store returning fewer bases than asked for
    struct TruncatingStore;

    impl DepthStore for TruncatingStore {
        fn read_depth(&mut self, _: &str, start: u64, end: u64) -> Result<Vec<u32>, StoreError> {
            let len = usize::try_from(end - start).unwrap();
            Ok(vec![1; len.saturating_sub(1)])
        }
    }

    #[test]
    fn test_example_scenario() {
        let mut depths = vec![0u32; 30];
        depths[..5].copy_from_slice(&[2, 4, 5, 5, 5]);
        depths[9..20].fill(7);
        let mut store = InMemoryDepthStore::new().with_contig("chr1", depths);

        let config = AnnotatorConfig::default()
            .with_cutoff(5)
            .with_bp_threshold(100);
        let results: Vec<_> =
            annotate_intervals(&mut store, vec![iv("chr1", 0, 5), iv("chr1", 9, 20)], &config)
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].interval.to_string(), "chr1:1-5");
        assert_eq!(results[0].coverage, 4.2);
        assert_eq!(results[0].completeness, 3.0 / 5.0);
        assert_eq!(results[1].interval.to_string(), "chr1:10-20");
        assert_eq!(results[1].coverage, 7.0);
        assert_eq!(results[1].completeness, 1.0);
    }

    #[test]
    fn test_config_checked_before_intervals() {
        let mut store = InMemoryDepthStore::new();
        let config = AnnotatorConfig::default().with_extension(-5);
        let result = annotate_intervals(&mut store, vec![iv("chr1", 0, 5)], &config);
        assert!(matches!(result, Err(ConfigError::NegativeExtension(-5))));
    }

    #[test]
    fn test_extension_applied() {
        let mut store = InMemoryDepthStore::new().with_contig("1", vec![1; 100]);
        let config = AnnotatorConfig::default().with_extension(3);
        let results: Vec<_> = annotate_intervals(&mut store, vec![iv("1", 1, 10)], &config)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(results[0].interval, iv("1", 0, 13));
    }

    #[test]
    fn test_zero_length_interval() {
        let mut store = InMemoryDepthStore::new().with_contig("1", vec![9; 10]);
        let results: Vec<_> =
            annotate_intervals(&mut store, vec![iv("1", 4, 4)], &AnnotatorConfig::default())
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();
        assert_eq!(results[0].coverage, 0.0);
        assert_eq!(results[0].completeness, 0.0);
    }

    #[test]
    fn test_malformed_interval_rejected() {
        let mut store = InMemoryDepthStore::new().with_contig("1", vec![9; 10]);
        let bad = Interval {
            contig: "1".to_string(),
            start: 8,
            end: 2,
        };
        let mut annotator =
            annotate_intervals(&mut store, vec![bad], &AnnotatorConfig::default()).unwrap();
        assert!(matches!(
            annotator.next(),
            Some(Err(AnnotateError::Interval(_)))
        ));
        assert!(annotator.next().is_none());
    }

    #[test]
    fn test_store_error_is_fatal() {
        let mut store = InMemoryDepthStore::new().with_contig("1", vec![9; 10]);
        let intervals = vec![iv("1", 0, 2), iv("2", 0, 2), iv("1", 5, 6)];
        let mut annotator =
            annotate_intervals(&mut store, intervals, &AnnotatorConfig::default()).unwrap();

        assert!(annotator.next().unwrap().is_ok());
        assert!(matches!(
            annotator.next(),
            Some(Err(AnnotateError::Store { ref contig, .. })) if contig == "2"
        ));
        assert!(annotator.next().is_none());
    }

    #[test]
    fn test_short_depth_array_is_inconsistent() {
        let mut store = TruncatingStore;
        let mut annotator = annotate_intervals(
            &mut store,
            vec![iv("1", 0, 10)],
            &AnnotatorConfig::default(),
        )
        .unwrap();
        assert!(matches!(
            annotator.next(),
            Some(Err(AnnotateError::DataConsistency { depth_len: 9, .. }))
        ));
        assert!(annotator.next().is_none());
    }

    #[test]
    fn test_summary_tracks_groups() {
        let mut store = InMemoryDepthStore::new().with_contig("1", vec![10; 1000]);
        let config = AnnotatorConfig::default().with_bp_threshold(100);
        let intervals = vec![iv("1", 0, 10), iv("1", 20, 30), iv("1", 500, 520)];
        let mut annotator = annotate_intervals(&mut store, intervals, &config).unwrap();
        let count = annotator.by_ref().filter(Result::is_ok).count();

        assert_eq!(count, 3);
        let summary = annotator.summary();
        assert_eq!(summary.intervals, 3);
        assert_eq!(summary.groups, 2);
        assert_eq!(summary.bases, 40);
        assert_eq!(summary.mean_coverage(), 10.0);
        assert_eq!(summary.completeness(), 1.0);
    }

    #[test]
    fn test_annotate_from_bed_reader() {
        let mut store = InMemoryDepthStore::new().with_contig("chr2", vec![3; 50]);
        let config = AnnotatorConfig::default()
            .with_cutoff(3)
            .with_contig_prefix("chr")
            .with_extension(2);
        let bed = "2\t10\t20\n2\tx\t30\n";
        let mut annotator =
            Annotator::new(&mut store, BedReader::new(bed.as_bytes(), "chr"), &config).unwrap();

        let first = annotator.next().unwrap().unwrap();
        assert_eq!(first.interval, iv("chr2", 8, 22));
        assert_eq!(first.coverage, 3.0);
        assert_eq!(first.completeness, 1.0);
        assert!(matches!(annotator.next(), Some(Err(AnnotateError::Parse(_)))));
        assert!(annotator.next().is_none());
    }

    #[test]
    fn test_huge_extension_is_a_store_error() {
        let mut store = InMemoryDepthStore::new().with_contig("1", vec![1; 10]);
        let config = AnnotatorConfig::default().with_extension(i64::MAX);
        let mut annotator = annotate_intervals(&mut store, vec![iv("1", 2, 4)], &config).unwrap();

        assert!(matches!(
            annotator.next(),
            Some(Err(AnnotateError::Store {
                source: StoreError::InvalidRegion { .. },
                ..
            }))
        ));
        assert!(annotator.next().is_none());
    }
}
