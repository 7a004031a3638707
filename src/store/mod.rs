//! Per-base depth sources.
//!
//! The annotator only needs one operation from a store: the depth of every
//! base in a contig span. Two implementations are provided:
//!
//! - [`bam::BamDepthStore`]: pileup depth from an indexed BAM file, read with `noodles`
//! - [`memory::InMemoryDepthStore`]: precomputed per-contig depth tracks
//!
//! Stores are used through `&mut` and are not meant to be shared between
//! concurrently running annotators; open one handle per run.

use thiserror::Error;

pub mod bam;
pub mod memory;

pub use self::bam::{BamDepthStore, ReadFilter};
pub use self::memory::InMemoryDepthStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Contig '{0}' not found in depth store")]
    UnknownContig(String),

    #[error("Invalid region {contig}:{start}-{end}")]
    InvalidRegion { contig: String, start: u64, end: u64 },
}

/// A source of per-base read depth.
pub trait DepthStore {
    /// Depth of every base in the 0-based half-open span `[start, end)`.
    ///
    /// Implementations return exactly `end - start` values on success.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the contig is unknown or the underlying
    /// source cannot be read.
    fn read_depth(&mut self, contig: &str, start: u64, end: u64) -> Result<Vec<u32>, StoreError>;
}

impl<S: DepthStore + ?Sized> DepthStore for Box<S> {
    fn read_depth(&mut self, contig: &str, start: u64, end: u64) -> Result<Vec<u32>, StoreError> {
        (**self).read_depth(contig, start, end)
    }
}

/// Convert a span to `usize` offsets, rejecting `start > end`.
pub(crate) fn span_to_usize(
    contig: &str,
    start: u64,
    end: u64,
) -> Result<(usize, usize), StoreError> {
    let invalid = || StoreError::InvalidRegion {
        contig: contig.to_string(),
        start,
        end,
    };
    if start > end {
        return Err(invalid());
    }
    let start_idx = usize::try_from(start).map_err(|_| invalid())?;
    let end_idx = usize::try_from(end).map_err(|_| invalid())?;
    Ok((start_idx, end_idx))
}

/// Zero-filled depth buffer for `[start, end)`.
///
/// A span too large to allocate is reported as `InvalidRegion`.
pub(crate) fn zeroed_depths(
    contig: &str,
    start: u64,
    end: u64,
) -> Result<(usize, usize, Vec<u32>), StoreError> {
    let (start_idx, end_idx) = span_to_usize(contig, start, end)?;
    let mut depths = Vec::new();
    depths
        .try_reserve_exact(end_idx - start_idx)
        .map_err(|_| StoreError::InvalidRegion {
            contig: contig.to_string(),
            start,
            end,
        })?;
    depths.resize(end_idx - start_idx, 0);
    Ok((start_idx, end_idx, depths))
}
