//! Command-line interface for chanjo.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **annotate**: Coverage and completeness for every interval of a BED file
//!
//! ## Usage
//!
//! ```text
//! # Annotate exons against an indexed BAM
//! chanjo annotate sample.bam exons.bed
//!
//! # Read the BED from stdin, rename contigs, pad every exon by 10 bp
//! zcat exons.bed.gz | chanjo annotate sample.bam - --prefix chr --extension 10
//!
//! # JSON output for scripting
//! chanjo annotate sample.bam exons.bed --format json
//! ```

use clap::{Parser, Subcommand};

pub mod annotate;

#[derive(Parser)]
#[command(name = "chanjo")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Coverage and completeness for genomic intervals from an indexed BAM")]
#[command(
    long_about = "chanjo reports, for every interval of a BED file, the mean sequencing depth (coverage) and the fraction of bases reaching a depth cutoff (completeness).\n\nNearby intervals are fetched from the BAM in batches bounded by --bp-threshold, so memory use does not grow with the number of intervals."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate BED intervals with coverage and completeness
    Annotate(annotate::AnnotateArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
