//! # chanjo
//!
//! A library for computing per-interval sequencing coverage from indexed BAM files.
//!
//! Coverage QC over gene or exon panels usually needs two numbers per region: the
//! mean depth, and how much of the region reaches a minimum depth. `chanjo`
//! computes both for every interval of a sorted BED file without running a
//! variant caller or writing per-base depth to disk.
//!
//! ## Features
//!
//! - **Coverage**: mean read depth over each interval
//! - **Completeness**: fraction of bases at or above a depth cutoff
//! - **Extension**: symmetric padding of every interval before annotation
//! - **Batched queries**: nearby intervals share one BAM query, bounded by a span threshold
//! - **Streaming**: results are produced lazily, in input order, one group in memory at a time
//!
//! ## Example
//!
//! ```rust,no_run
//! use chanjo::{Annotator, AnnotatorConfig, BamDepthStore};
//! use chanjo::parsing::bed::BedReader;
//! use std::io::BufReader;
//! use std::path::Path;
//!
//! let mut store = BamDepthStore::open(Path::new("sample.bam")).unwrap();
//! let bed = BufReader::new(std::fs::File::open("exons.bed").unwrap());
//!
//! let config = AnnotatorConfig::default().with_cutoff(20);
//! let intervals = BedReader::new(bed, config.contig_prefix.clone());
//!
//! for result in Annotator::new(&mut store, intervals, &config).unwrap() {
//!     let result = result.unwrap();
//!     println!("{}: {:.1}x, {:.1}%", result.interval, result.coverage, result.completeness * 100.0);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`annotator`]: Extension, grouping, depth slicing, metrics and the pipeline
//! - [`core`]: Core data types for intervals and results
//! - [`store`]: Depth sources (indexed BAM, in-memory)
//! - [`parsing`]: BED interval parsing
//! - [`cli`]: Command-line interface implementation

pub mod annotator;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod store;
pub mod utils;

// Re-export commonly used types for convenience
pub use annotator::{AnnotateError, Annotator, AnnotatorConfig, ConfigError};
pub use core::interval::Interval;
pub use core::types::*;
pub use store::{BamDepthStore, DepthStore, InMemoryDepthStore, StoreError};
