//! Per-interval coverage annotation.
//!
//! - [`config`]: run settings and their validation
//! - [`extend`]: symmetric interval padding
//! - [`grouper`]: batching sorted intervals into span-bounded groups
//! - [`processor`]: slicing a group's depth array per member interval
//! - [`metrics`]: coverage and completeness of a depth slice
//! - [`pipeline`]: the lazy [`Annotator`] tying the stages together
//!
//! ## Example
//!
//! ```rust
//! use chanjo::annotator::{annotate_intervals, AnnotatorConfig};
//! use chanjo::store::InMemoryDepthStore;
//! use chanjo::Interval;
//!
//! let mut store = InMemoryDepthStore::new().with_contig("chr1", vec![12; 100]);
//! let intervals = vec![Interval::new("chr1", 10, 20).unwrap()];
//!
//! let config = AnnotatorConfig::default();
//! for result in annotate_intervals(&mut store, intervals, &config).unwrap() {
//!     let result = result.unwrap();
//!     println!("{}\t{:.2}\t{:.2}", result.interval, result.coverage, result.completeness);
//! }
//! ```

pub mod config;
pub mod error;
pub mod extend;
pub mod grouper;
pub mod metrics;
pub mod pipeline;
pub mod processor;

pub use config::{AnnotatorConfig, ConfigError};
pub use error::AnnotateError;
pub use extend::extend_interval;
pub use grouper::{group_intervals, IntervalGroup, IntervalGrouper};
pub use metrics::{calculate_metrics, Metrics};
pub use pipeline::{annotate_intervals, Annotator};
pub use processor::{member_slice, ProcessedGroup};
