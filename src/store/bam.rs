//! Pileup depth from an indexed BAM file using noodles.
//!
//! Each aligned base (`M`, `=`, `X` CIGAR operations) of an accepted record
//! adds one to the depth of the reference position it covers. Deletions and
//! skipped regions advance along the reference without counting.

use std::fs::File;
use std::path::Path;

use noodles::bam;
use noodles::bgzf;
use noodles::core::{Position, Region};
use noodles::sam;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::Flags;
use tracing::debug;

use crate::store::{zeroed_depths, DepthStore, StoreError};

type IndexedReader = bam::io::IndexedReader<bgzf::Reader<File>>;

/// Which records count towards depth.
///
/// Unmapped, secondary and QC-fail records are always skipped, matching the
/// defaults of `samtools depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadFilter {
    /// Minimum mapping quality; 0 accepts records without one
    pub min_mapq: u8,

    /// Count records flagged as PCR/optical duplicates
    pub include_duplicates: bool,
}

impl Default for ReadFilter {
    fn default() -> Self {
        Self {
            min_mapq: 0,
            include_duplicates: false,
        }
    }
}

impl ReadFilter {
    #[must_use]
    pub fn accepts(&self, flags: Flags, mapping_quality: Option<u8>) -> bool {
        if flags.is_unmapped() || flags.is_secondary() || flags.is_qc_fail() {
            return false;
        }
        if flags.is_duplicate() && !self.include_duplicates {
            return false;
        }
        if self.min_mapq == 0 {
            return true;
        }
        mapping_quality.is_some_and(|mapq| mapq >= self.min_mapq)
    }
}

/// An open, indexed BAM file answering depth queries.
///
/// The file handle is released when the store is dropped or [`closed`](Self::close).
pub struct BamDepthStore {
    reader: IndexedReader,
    header: sam::Header,
    filter: ReadFilter,
    source: String,
}

impl BamDepthStore {
    /// Open a BAM file, looking for its index at `<path>.bai`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Open` if the BAM or its index cannot be opened, or
    /// `StoreError::Noodles` if the header cannot be read.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let reader = bam::io::indexed_reader::Builder::default()
            .build_from_path(path)
            .map_err(|e| StoreError::Open {
                path: path.display().to_string(),
                source: e,
            })?;

        Self::from_reader(reader, path)
    }

    /// Open a BAM file with an explicitly specified BAI index.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Open` if either file cannot be read, or
    /// `StoreError::Noodles` if the header cannot be read.
    pub fn open_with_index(path: &Path, index_path: &Path) -> Result<Self, StoreError> {
        let index = bam::bai::read(index_path).map_err(|e| StoreError::Open {
            path: index_path.display().to_string(),
            source: e,
        })?;

        let reader = bam::io::indexed_reader::Builder::default()
            .set_index(index)
            .build_from_path(path)
            .map_err(|e| StoreError::Open {
                path: path.display().to_string(),
                source: e,
            })?;

        Self::from_reader(reader, path)
    }

    fn from_reader(mut reader: IndexedReader, path: &Path) -> Result<Self, StoreError> {
        let header = reader
            .read_header()
            .map_err(|e| StoreError::Noodles(format!("Failed to read BAM header: {e}")))?;

        debug!(
            path = %path.display(),
            contigs = header.reference_sequences().len(),
            "Opened BAM depth store"
        );

        Ok(Self {
            reader,
            header,
            filter: ReadFilter::default(),
            source: path.display().to_string(),
        })
    }

    #[must_use]
    pub fn with_filter(mut self, filter: ReadFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn filter(&self) -> ReadFilter {
        self.filter
    }

    /// Whether the BAM header declares `contig`
    #[must_use]
    pub fn has_contig(&self, contig: &str) -> bool {
        self.header
            .reference_sequences()
            .get_index_of(contig.as_bytes())
            .is_some()
    }

    /// Release the underlying file handle.
    pub fn close(self) {
        debug!(path = %self.source, "Closed BAM depth store");
    }
}

impl DepthStore for BamDepthStore {
    fn read_depth(&mut self, contig: &str, start: u64, end: u64) -> Result<Vec<u32>, StoreError> {
        if !self.has_contig(contig) {
            return Err(StoreError::UnknownContig(contig.to_string()));
        }

        let (span_start, span_end, mut depths) = zeroed_depths(contig, start, end)?;
        if depths.is_empty() {
            return Ok(depths);
        }

        // noodles regions are 1-based and closed
        let invalid = || StoreError::InvalidRegion {
            contig: contig.to_string(),
            start,
            end,
        };
        let region_start = Position::new(span_start + 1).ok_or_else(invalid)?;
        let region_end = Position::new(span_end).ok_or_else(invalid)?;
        let region = Region::new(contig, region_start..=region_end);

        let query = self
            .reader
            .query(&self.header, &region)
            .map_err(|e| StoreError::Noodles(format!("BAM query failed: {e}")))?;

        let mut counted = 0u64;
        for result in query {
            let record = result?;

            let mapping_quality = record.mapping_quality().map(u8::from);
            if !self.filter.accepts(record.flags(), mapping_quality) {
                continue;
            }

            let Some(alignment_start) = record.alignment_start().transpose()? else {
                continue;
            };

            let mut reference_position = usize::from(alignment_start) - 1;
            for op in record.cigar().iter() {
                let op = op?;
                match op.kind() {
                    Kind::Match | Kind::SequenceMatch | Kind::SequenceMismatch => {
                        add_aligned_block(&mut depths, span_start, reference_position, op.len());
                        reference_position += op.len();
                    }
                    Kind::Deletion | Kind::Skip => reference_position += op.len(),
                    Kind::Insertion | Kind::SoftClip | Kind::HardClip | Kind::Pad => {}
                }
            }
            counted += 1;
        }

        debug!(contig, start, end, records = counted, "Computed depth from BAM");

        Ok(depths)
    }
}

/// Add one to every position of `depths` (which starts at `span_start`)
/// covered by the aligned block `[block_start, block_start + block_len)`.
fn add_aligned_block(depths: &mut [u32], span_start: usize, block_start: usize, block_len: usize) {
    let span_end = span_start + depths.len();
    let from = block_start.max(span_start);
    let to = (block_start + block_len).min(span_end);
    if from >= to {
        return;
    }
    for depth in &mut depths[from - span_start..to - span_start] {
        *depth = depth.saturating_add(1);
    }
}
