use std::convert::Infallible;

use thiserror::Error;

use crate::annotator::config::ConfigError;
use crate::core::interval::IntervalError;
use crate::parsing::bed::ParseError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid interval input: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid interval: {0}")]
    Interval(#[from] IntervalError),

    #[error("Depth store read failed for {contig}:{start}-{end}: {source}")]
    Store {
        contig: String,
        start: u64,
        end: u64,
        #[source]
        source: StoreError,
    },

    #[error(
        "Depth array of {depth_len} bases from {span_start} cannot cover interval {interval}"
    )]
    DataConsistency {
        interval: String,
        span_start: u64,
        depth_len: usize,
    },
}

impl From<Infallible> for AnnotateError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
