//! Split command - assign single-end reads by the longest matching prefix.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{create_output_dir, print_stats, OutputFormat};
use crate::core::types::ReadFormat;
use crate::matching::Assigner;
use crate::output::summary::RunSummary;
use crate::output::writer::SampleWriter;
use crate::parsing::fasta::FastaReads;
use crate::parsing::fastq::FastqReads;
use crate::parsing::manifest::parse_manifest_file;
use crate::sequence_file::{demultiplex_single, DemuxConfig, FileKind};

#[derive(Args)]
pub struct SplitArgs {
    /// Input reads (FASTA or FASTQ, optionally gzipped)
    #[arg(long, required = true)]
    pub sequence_file: PathBuf,

    /// Tab-delimited file: sample name, barcode, comma-separated prefixes
    #[arg(long, required = true)]
    pub barcode_file: PathBuf,

    /// Output directory for per-sample files (must not exist)
    #[arg(long, required = true)]
    pub output_dir: PathBuf,

    /// Where to write the JSON run summary
    #[arg(long)]
    pub summary_file: Option<PathBuf>,

    /// Format of the per-sample files (defaults to the input format)
    #[arg(long, value_enum)]
    pub output_format: Option<ReadFormat>,

    /// Worker threads for prefix lookup
    #[arg(long, default_value = "1")]
    pub threads: usize,
}

/// Execute split subcommand
///
/// # Errors
///
/// Returns an error if the inputs are invalid or splitting fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SplitArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let kind = FileKind::detect(&args.sequence_file);
    let input_format = match kind {
        FileKind::Fasta => ReadFormat::Fasta,
        FileKind::Fastq => ReadFormat::Fastq,
        FileKind::Missing => {
            anyhow::bail!("Sequence file does not exist: {}", args.sequence_file.display())
        }
        other => anyhow::bail!(
            "Cannot split {} ({other}); expected a FASTA or FASTQ file",
            args.sequence_file.display()
        ),
    };

    let config = DemuxConfig {
        output_format: args.output_format.unwrap_or(input_format),
        threads: args.threads,
        ..DemuxConfig::default()
    };

    let samples = parse_manifest_file(&args.barcode_file)
        .with_context(|| format!("Failed to load barcode file {}", args.barcode_file.display()))?;
    let mut assigner = Assigner::prefix(samples)?;

    if verbose {
        eprintln!(
            "Loaded {} samples, splitting {kind} input",
            assigner.samples().len()
        );
    }

    create_output_dir(&args.output_dir)?;
    let mut writer = SampleWriter::new(&args.output_dir, config.output_format, false);

    let stats = match input_format {
        ReadFormat::Fasta => demultiplex_single(
            FastaReads::open(&args.sequence_file)?,
            &mut assigner,
            &mut writer,
            &config,
        )?,
        ReadFormat::Fastq => demultiplex_single(
            FastqReads::open(&args.sequence_file)?,
            &mut assigner,
            &mut writer,
            &config,
        )?,
    };
    writer.finish()?;

    if let Some(path) = &args.summary_file {
        RunSummary::new(&config, stats.clone()).write(path)?;
    }

    print_stats(&stats, format)
}
