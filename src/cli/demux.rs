use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{create_output_dir, print_stats, OutputFormat};
use crate::core::types::{MismatchTolerance, ReadFormat};
use crate::matching::Assigner;
use crate::output::summary::RunSummary;
use crate::output::writer::SampleWriter;
use crate::parsing::fastq::PairedReads;
use crate::parsing::manifest::parse_manifest_file;
use crate::sequence_file::{demultiplex_paired, index_fastq_siblings, DemuxConfig, FileKind};

#[derive(Args)]
pub struct DemuxArgs {
    /// Forward reads file (FASTQ, optionally gzipped)
    #[arg(long, required = true)]
    pub forward_reads: PathBuf,

    /// Reverse reads file. May be omitted when the forward file is
    /// Undetermined_S0_L001_R1_001.fastq.gz and its siblings sit next to it
    #[arg(long)]
    pub reverse_reads: Option<PathBuf>,

    /// Index reads file. Without it the barcode is read from the forward
    /// read header, after the final ':'
    #[arg(long)]
    pub index_reads: Option<PathBuf>,

    /// Tab-delimited barcode file: sample name, barcode
    #[arg(long, required = true)]
    pub barcode_file: PathBuf,

    /// Output directory for per-sample files (must not exist)
    #[arg(long, required = true)]
    pub output_dir: PathBuf,

    /// Where to write the JSON run summary
    #[arg(long, required = true)]
    pub summary_file: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Barcode mismatches tolerated (0-2)
    #[arg(long)]
    pub mismatches: Option<usize>,

    /// Match barcodes as given instead of their reverse complement
    #[arg(long)]
    pub no_revcomp: bool,

    /// Worker threads for barcode lookup
    #[arg(long)]
    pub threads: Option<usize>,

    /// Format of the per-sample files
    #[arg(long, value_enum)]
    pub output_format: Option<ReadFormat>,
}

impl DemuxArgs {
    /// Config file values, overridden by any flags given on the command line
    fn config(&self) -> anyhow::Result<DemuxConfig> {
        let mut config = match &self.config_file {
            Some(path) => DemuxConfig::load(path)
                .with_context(|| format!("Invalid config file {}", path.display()))?,
            None => DemuxConfig::default(),
        };

        if let Some(n) = self.mismatches {
            config.mismatches = MismatchTolerance::new(n)?;
        }
        if self.no_revcomp {
            config.revcomp = false;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(format) = self.output_format {
            config.output_format = format;
        }
        Ok(config)
    }

    fn input_paths(&self) -> anyhow::Result<(PathBuf, Option<PathBuf>)> {
        if let Some(reverse) = &self.reverse_reads {
            return Ok((reverse.clone(), self.index_reads.clone()));
        }

        if FileKind::detect(&self.forward_reads) != FileKind::IndexFastq {
            anyhow::bail!(
                "--reverse-reads is required unless --forward-reads is an Undetermined_S0_L001_R1_001.fastq.gz file"
            );
        }
        let (index, reverse) = index_fastq_siblings(&self.forward_reads);
        let index = self.index_reads.clone().or(index.exists().then_some(index));
        Ok((reverse, index))
    }
}

/// Execute demux subcommand
///
/// # Errors
///
/// Returns an error if the inputs are invalid or demultiplexing fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DemuxArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config()?;
    let (reverse_reads, index_reads) = args.input_paths()?;

    let samples = parse_manifest_file(&args.barcode_file)
        .with_context(|| format!("Failed to load barcode file {}", args.barcode_file.display()))?;
    let mut assigner = Assigner::exact(samples, config.mismatches, config.revcomp)?;

    if verbose {
        eprintln!(
            "Loaded {} samples ({} mismatches, revcomp {})",
            assigner.samples().len(),
            config.mismatches,
            config.revcomp
        );
    }

    let pairs = PairedReads::open(&args.forward_reads, &reverse_reads, index_reads.as_deref())?;

    create_output_dir(&args.output_dir)?;
    let mut writer = SampleWriter::new(&args.output_dir, config.output_format, true);

    info!(output_dir = %args.output_dir.display(), "Demultiplexing read pairs");
    let stats = demultiplex_paired(pairs, &mut assigner, &mut writer, &config)?;
    writer.finish()?;

    RunSummary::new(&config, stats.clone())
        .write(&args.summary_file)
        .with_context(|| format!("Failed to write summary {}", args.summary_file.display()))?;

    print_stats(&stats, format)
}
