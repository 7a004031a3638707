use std::collections::HashMap;

use crate::store::{zeroed_depths, DepthStore, StoreError};

/// Depth store backed by per-contig depth vectors.
///
/// Index `i` of a contig's vector is the depth at 0-based position `i`.
/// Positions past the end of a vector read as zero.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDepthStore {
    contigs: HashMap<String, Vec<u32>>,
}

impl InMemoryDepthStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_contig(mut self, contig: impl Into<String>, depths: Vec<u32>) -> Self {
        self.insert(contig, depths);
        self
    }

    pub fn insert(&mut self, contig: impl Into<String>, depths: Vec<u32>) {
        self.contigs.insert(contig.into(), depths);
    }

    /// Set depths starting at 0-based `offset`, growing the track as needed.
    pub fn set_depths(&mut self, contig: &str, offset: usize, depths: &[u32]) {
        let track = self.contigs.entry(contig.to_string()).or_default();
        let end = offset + depths.len();
        if track.len() < end {
            track.resize(end, 0);
        }
        track[offset..end].copy_from_slice(depths);
    }

    #[must_use]
    pub fn contains(&self, contig: &str) -> bool {
        self.contigs.contains_key(contig)
    }
}

impl DepthStore for InMemoryDepthStore {
    fn read_depth(&mut self, contig: &str, start: u64, end: u64) -> Result<Vec<u32>, StoreError> {
        let track = self
            .contigs
            .get(contig)
            .ok_or_else(|| StoreError::UnknownContig(contig.to_string()))?;
        let (start, end, mut depths) = zeroed_depths(contig, start, end)?;

        if start < track.len() {
            let stored = &track[start..end.min(track.len())];
            depths[..stored.len()].copy_from_slice(stored);
        }
        Ok(depths)
    }
}
