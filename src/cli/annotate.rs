use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use crate::annotator::config::{DEFAULT_BP_THRESHOLD, DEFAULT_CUTOFF};
use crate::annotator::{AnnotateError, Annotator, AnnotatorConfig};
use crate::cli::OutputFormat;
use crate::core::interval::Interval;
use crate::core::types::{AnnotationResult, AnnotationSummary};
use crate::parsing::bed::BedReader;
use crate::store::{BamDepthStore, DepthStore, ReadFilter};
use crate::utils::input::open_input;

#[derive(Args)]
pub struct AnnotateArgs {
    /// Indexed BAM file to read depth from
    #[arg(required = true)]
    pub bam: PathBuf,

    /// BED file of intervals sorted by contig and start (.gz allowed).
    /// Use '-' for stdin
    #[arg(default_value = "-")]
    pub bed: PathBuf,

    /// BAI index path (defaults to <BAM>.bai)
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Minimum depth for a base to count towards completeness
    #[arg(short, long, default_value_t = DEFAULT_CUTOFF)]
    pub cutoff: u32,

    /// Bases to add to both ends of every interval
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub extension: i64,

    /// Prefix added to every contig name in the BED file (e.g. "chr")
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// Maximum span in bases fetched from the BAM in one query
    #[arg(long, default_value_t = DEFAULT_BP_THRESHOLD)]
    pub bp_threshold: u64,

    /// Minimum mapping quality for a read to count towards depth
    #[arg(long, default_value_t = 0)]
    pub min_mapq: u8,

    /// Count reads flagged as duplicates
    #[arg(long)]
    pub include_duplicates: bool,
}

impl AnnotateArgs {
    fn config(&self) -> AnnotatorConfig {
        AnnotatorConfig::default()
            .with_cutoff(self.cutoff)
            .with_extension(self.extension)
            .with_contig_prefix(self.prefix.clone())
            .with_bp_threshold(self.bp_threshold)
    }

    fn read_filter(&self) -> ReadFilter {
        ReadFilter {
            min_mapq: self.min_mapq,
            include_duplicates: self.include_duplicates,
        }
    }
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input cannot be
/// opened, or annotation fails part way.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config();
    config.validate()?;

    let intervals = BedReader::new(open_input(&args.bed)?, config.contig_prefix.clone());

    let store = match &args.index {
        Some(index) => BamDepthStore::open_with_index(&args.bam, index)?,
        None => BamDepthStore::open(&args.bam)?,
    };
    let mut store = store.with_filter(args.read_filter());

    if verbose {
        eprintln!(
            "Annotating {} against {} (cutoff {}, extension {}, bp threshold {})",
            args.bed.display(),
            args.bam.display(),
            config.cutoff,
            config.extension,
            config.bp_threshold,
        );
    }

    let summary = annotate_to_stdout(&mut store, intervals, &config, format)?;
    store.close();

    if summary.intervals == 0 {
        warn!("No intervals found in {}", args.bed.display());
    }
    info!(
        intervals = summary.intervals,
        bases = summary.bases,
        store_reads = summary.groups,
        mean_coverage = summary.mean_coverage(),
        completeness = summary.completeness(),
        "Annotation finished"
    );

    Ok(())
}

fn annotate_to_stdout<S, I, E>(
    store: &mut S,
    intervals: I,
    config: &AnnotatorConfig,
    format: OutputFormat,
) -> anyhow::Result<AnnotationSummary>
where
    S: DepthStore + ?Sized,
    I: Iterator<Item = Result<Interval, E>>,
    AnnotateError: From<E>,
{
    let mut annotator = Annotator::new(store, intervals, config)?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match format {
        OutputFormat::Text => write_text_results(&mut out, &mut annotator)?,
        OutputFormat::Tsv => write_tsv_results(&mut out, &mut annotator)?,
        OutputFormat::Json => {
            let results = annotator.by_ref().collect::<Result<Vec<_>, _>>()?;
            write_json_results(&mut out, config, annotator.summary(), &results)?;
        }
    }
    out.flush()?;

    Ok(annotator.summary().clone())
}

fn write_text_results<W: Write>(
    out: &mut W,
    results: impl Iterator<Item = Result<AnnotationResult, AnnotateError>>,
) -> anyhow::Result<()> {
    for result in results {
        let result = result?;
        writeln!(
            out,
            "{}\t{:.4}\t{:.4}",
            result.interval, result.coverage, result.completeness
        )?;
    }
    Ok(())
}

fn write_tsv_results<W: Write>(
    out: &mut W,
    results: impl Iterator<Item = Result<AnnotationResult, AnnotateError>>,
) -> anyhow::Result<()> {
    writeln!(out, "#contig\tstart\tend\tcoverage\tcompleteness")?;
    for result in results {
        let result = result?;
        writeln!(
            out,
            "{}\t{}\t{}\t{:.4}\t{:.4}",
            result.interval.contig,
            result.interval.start,
            result.interval.end,
            result.coverage,
            result.completeness,
        )?;
    }
    Ok(())
}

/// Write one JSON document with the config, run summary and every result.
///
/// Unlike the text and tsv writers this is not streamed: the summary is only
/// known once the last interval is annotated, so all results are collected
/// first.
fn write_json_results<W: Write>(
    out: &mut W,
    config: &AnnotatorConfig,
    summary: &AnnotationSummary,
    results: &[AnnotationResult],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "config": config,
        "summary": {
            "intervals": summary.intervals,
            "bases": summary.bases,
            "store_reads": summary.groups,
            "mean_coverage": summary.mean_coverage(),
            "completeness": summary.completeness(),
        },
        "results": results,
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
