//! Shared fixtures: small indexed BAM files written with noodles.
#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use noodles::bam;
use noodles::core::Position;
use noodles::csi::binning_index::index::reference_sequence::bin::Chunk;
use noodles::csi::binning_index::index::reference_sequence::index::LinearIndex;
use noodles::csi::binning_index::Indexer;
use noodles::sam;
use noodles::sam::alignment::io::Write as _;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::{Flags, MappingQuality};
use noodles::sam::alignment::record_buf::{Cigar, QualityScores, Sequence};
use noodles::sam::alignment::RecordBuf;
use noodles::sam::header::record::value::map::ReferenceSequence;
use noodles::sam::header::record::value::Map;

pub const CONTIGS: [(&str, usize); 2] = [("chr1", 10_000), ("chr2", 10_000)];

/// A read on `ref_id` starting at 1-based `pos` with the given CIGAR
pub fn read(ref_id: usize, pos: usize, ops: &[(Kind, usize)], flags: Flags) -> RecordBuf {
    let cigar = Cigar::from(
        ops.iter()
            .map(|&(kind, len)| Op::new(kind, len))
            .collect::<Vec<_>>(),
    );
    let read_len: usize = ops
        .iter()
        .filter(|(kind, _)| {
            matches!(
                kind,
                Kind::Match
                    | Kind::Insertion
                    | Kind::SoftClip
                    | Kind::SequenceMatch
                    | Kind::SequenceMismatch
            )
        })
        .map(|&(_, len)| len)
        .sum();

    RecordBuf::builder()
        .set_name(format!("read_{ref_id}_{pos}"))
        .set_flags(flags)
        .set_reference_sequence_id(ref_id)
        .set_alignment_start(Position::try_from(pos).unwrap())
        .set_mapping_quality(MappingQuality::new(60).unwrap())
        .set_cigar(cigar)
        .set_sequence(Sequence::from(vec![b'A'; read_len]))
        .set_quality_scores(QualityScores::from(vec![30u8; read_len]))
        .build()
}

/// A fully aligned read of `len` bases
pub fn simple_read(ref_id: usize, pos: usize, len: usize) -> RecordBuf {
    read(ref_id, pos, &[(Kind::Match, len)], Flags::empty())
}

/// Reads giving depths `[2, 4, 5, 5, 5]` over chr1:1-5 and 7 over chr1:10-20,
/// plus a few chr2 reads exercising flags and deletions.
pub fn scenario_records() -> Vec<RecordBuf> {
    let mut records = Vec::new();

    // chr1:1-5 -> 2, 4, 5, 5, 5
    records.extend((0..2).map(|_| simple_read(0, 1, 5)));
    records.extend((0..2).map(|_| simple_read(0, 2, 4)));
    records.push(simple_read(0, 3, 3));

    // chr1:10-20 -> 7
    records.extend((0..7).map(|_| simple_read(0, 10, 11)));

    // chr2:101-110, one counted read plus a duplicate, a secondary and a QC failure
    records.push(simple_read(1, 101, 10));
    records.push(read(1, 101, &[(Kind::Match, 10)], Flags::DUPLICATE));
    records.push(read(1, 101, &[(Kind::Match, 10)], Flags::SECONDARY));
    records.push(read(1, 101, &[(Kind::Match, 10)], Flags::QC_FAIL));

    // chr2:201-208 with a 2 bp deletion: 3M2D3M
    records.push(read(
        1,
        201,
        &[(Kind::Match, 3), (Kind::Deletion, 2), (Kind::Match, 3)],
        Flags::empty(),
    ));

    // chr2:301-306 with soft clips and an insertion: 2S3M1I2M2S
    records.push(read(
        1,
        301,
        &[
            (Kind::SoftClip, 2),
            (Kind::Match, 3),
            (Kind::Insertion, 1),
            (Kind::Match, 2),
            (Kind::SoftClip, 2),
        ],
        Flags::empty(),
    ));

    records
}

fn header() -> sam::Header {
    let mut builder = sam::Header::builder();
    for (name, len) in CONTIGS {
        let length = NonZeroUsize::try_from(len).unwrap();
        builder = builder.add_reference_sequence(name, Map::<ReferenceSequence>::new(length));
    }
    builder.build()
}

/// Write `records` (coordinate sorted) to `<dir>/sample.bam` with a BAI at
/// `<dir>/sample.bam.bai`. Returns the BAM path.
pub fn write_indexed_bam(dir: &Path, records: &[RecordBuf]) -> PathBuf {
    let header = header();

    let mut bam_buf = Vec::new();
    {
        let mut writer = bam::io::Writer::new(&mut bam_buf);
        writer.write_header(&header).unwrap();
        for record in records {
            writer.write_alignment_record(&header, record).unwrap();
        }
        writer.try_finish().unwrap();
    }

    let bam_path = dir.join("sample.bam");
    std::fs::write(&bam_path, &bam_buf).unwrap();

    let index = {
        use noodles::sam::alignment::Record;

        let mut reader = bam::io::Reader::new(std::io::Cursor::new(&bam_buf));
        reader.read_header().unwrap();

        let mut indexer = Indexer::<LinearIndex>::new(14, 5);
        let mut record = bam::Record::default();

        loop {
            let start_vpos = reader.get_ref().virtual_position();
            match reader.read_record(&mut record) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => panic!("failed to read BAM record: {e}"),
            }
            let end_vpos = reader.get_ref().virtual_position();
            let chunk = Chunk::new(start_vpos, end_vpos);

            let ref_seq_id = record.reference_sequence_id().and_then(|r| r.ok());
            let start = record.alignment_start().and_then(|r| r.ok());
            let end = Record::alignment_end(&record).and_then(|r| r.ok());
            let is_mapped = !record.flags().is_unmapped();

            if let (Some(ref_id), Some(s)) = (ref_seq_id, start) {
                let e = end.unwrap_or(s);
                indexer
                    .add_record(Some((ref_id, s, e, is_mapped)), chunk)
                    .unwrap();
            } else {
                indexer.add_record(None, chunk).unwrap();
            }
        }

        indexer.build(header.reference_sequences().len())
    };

    bam::bai::write(dir.join("sample.bam.bai"), &index).unwrap();

    bam_path
}

/// Write the scenario BAM into `dir`
pub fn scenario_bam(dir: &Path) -> PathBuf {
    write_indexed_bam(dir, &scenario_records())
}
