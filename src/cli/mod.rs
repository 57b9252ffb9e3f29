//! Command-line interface for barcode-demux.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **demux**: Split paired-end FASTQ reads into per-sample files by barcode
//! - **split**: Split a single FASTA/FASTQ file by longest sample prefix
//! - **info**: Report kind, read counts and checksums for run files
//!
//! ## Usage
//!
//! ```text
//! # Three-file Illumina layout
//! barcode-demux demux \
//!     --forward-reads Undetermined_S0_L001_R1_001.fastq.gz \
//!     --reverse-reads Undetermined_S0_L001_R2_001.fastq.gz \
//!     --index-reads Undetermined_S0_L001_I1_001.fastq.gz \
//!     --barcode-file barcodes.tsv --output-dir demuxed --summary-file summary.json
//!
//! # Prefix split of a single FASTA file
//! barcode-demux split --sequence-file run.fasta --barcode-file prefixes.tsv --output-dir split
//!
//! # Run-file metadata as JSON
//! barcode-demux info run.fasta Undetermined_S0_L001_R1_001.fastq.gz --format json
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

pub mod demux;
pub mod info;
pub mod split;

use crate::output::summary::DemuxStats;

#[derive(Parser)]
#[command(name = "barcode-demux")]
#[command(version)]
#[command(about = "Assign sequencing reads to samples by barcode or prefix")]
#[command(
    long_about = "barcode-demux splits multiplexed sequencing reads into per-sample files.\n\nPaired-end reads are matched against each sample's barcode, tolerating a configurable number of substitutions and optionally the reverse complement. Single-end reads can instead be matched by the longest registered sample prefix."
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
    /// Demultiplex paired-end FASTQ reads by barcode
    Demux(demux::DemuxArgs),

    /// Split a single sequence file by sample prefix
    Split(split::SplitArgs),

    /// Show metadata for sequencing run files
    Info(info::InfoArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Create the output directory, refusing to reuse an existing one
fn create_output_dir(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("Output directory already exists: {}", path.display());
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}

fn print_stats(stats: &DemuxStats, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let width = stats.counts.keys().map(String::len).max().unwrap_or(0).max(10);
            println!("{:<width$}  Reads", "Sample");
            println!("{}", "-".repeat(width + 12));
            for (name, count) in &stats.counts {
                println!("{name:<width$}  {count}");
            }
            println!("{}", "-".repeat(width + 12));
            println!("{:<width$}  {}", "Unassigned", stats.unassigned);
            println!("{:<width$}  {}", "Total", stats.total);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
        OutputFormat::Tsv => {
            println!("sample\treads");
            for (name, count) in &stats.counts {
                println!("{name}\t{count}");
            }
            println!("unassigned\t{}", stats.unassigned);
        }
    }
    Ok(())
}
