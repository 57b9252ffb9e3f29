//! Read-to-sample pipelines.
//!
//! Reads are pulled from their source in batches. Each batch is assigned in
//! parallel on a dedicated rayon pool, then written sequentially in input
//! order so output files keep the read order of the input.

use std::path::Path;

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::read::SequenceRead;
use crate::core::types::{MismatchTolerance, ReadFormat};
use crate::matching::Assigner;
use crate::output::summary::DemuxStats;
use crate::output::writer::{SampleWriter, WriteError};
use crate::parsing::fastq::ReadPair;
use crate::parsing::manifest::ParseError;

#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DemuxError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("Failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Run settings, loadable from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemuxConfig {
    pub output_format: ReadFormat,
    pub mismatches: MismatchTolerance,
    /// Match the reverse complement of each barcode
    pub revcomp: bool,
    pub threads: usize,
    /// Reads assigned per parallel batch
    pub batch_size: usize,
}

impl Default for DemuxConfig {
    fn default() -> Self {
        Self {
            output_format: ReadFormat::Fastq,
            mismatches: MismatchTolerance::default(),
            revcomp: true,
            threads: 1,
            batch_size: 10_000,
        }
    }
}

impl DemuxConfig {
    /// Load settings from a JSON file; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigFileError` if the file cannot be read or is not valid
    /// config JSON (including an out-of-range `mismatches`).
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn thread_pool(&self) -> Result<ThreadPool, DemuxError> {
        Ok(ThreadPoolBuilder::new()
            .num_threads(self.threads.max(1))
            .build()?)
    }

    fn batch_len(&self) -> usize {
        self.batch_size.max(1)
    }
}

/// Assign read pairs by barcode and write each assigned pair to its sample.
///
/// The barcode is the index read when present, otherwise the text after the
/// final `:` of the forward read description. It is uppercased before lookup.
///
/// # Errors
///
/// Returns `DemuxError` if reading, pairing or writing fails.
pub fn demultiplex_paired<I>(
    pairs: I,
    assigner: &mut Assigner,
    writer: &mut SampleWriter,
    config: &DemuxConfig,
) -> Result<DemuxStats, DemuxError>
where
    I: IntoIterator<Item = Result<ReadPair, ParseError>>,
{
    let pool = config.thread_pool()?;
    let mut pairs = pairs.into_iter();
    let mut unassigned = 0u64;
    let mut total = 0u64;

    loop {
        let batch = pairs
            .by_ref()
            .take(config.batch_len())
            .collect::<Result<Vec<_>, _>>()?;
        if batch.is_empty() {
            break;
        }

        let barcodes: Vec<String> = batch
            .iter()
            .map(|pair| pair.barcode().to_ascii_uppercase())
            .collect();
        let hits = pool.install(|| assigner.assign_batch(&barcodes[..]));

        for (pair, hit) in batch.iter().zip(hits) {
            match hit {
                Some(i) => writer.write_pair(&assigner.samples()[i], &pair.forward, &pair.reverse)?,
                None => unassigned += 1,
            }
        }
        total += batch.len() as u64;
        debug!(total, unassigned, "Processed batch");
    }

    Ok(finish_stats(assigner, unassigned, total))
}

/// Assign single-end reads by their own sequence and write them out.
///
/// # Errors
///
/// Returns `DemuxError` if reading or writing fails.
pub fn demultiplex_single<I>(
    reads: I,
    assigner: &mut Assigner,
    writer: &mut SampleWriter,
    config: &DemuxConfig,
) -> Result<DemuxStats, DemuxError>
where
    I: IntoIterator<Item = Result<SequenceRead, ParseError>>,
{
    let pool = config.thread_pool()?;
    let mut reads = reads.into_iter();
    let mut unassigned = 0u64;
    let mut total = 0u64;

    loop {
        let batch = reads
            .by_ref()
            .take(config.batch_len())
            .collect::<Result<Vec<_>, _>>()?;
        if batch.is_empty() {
            break;
        }

        let sequences: Vec<String> = batch
            .iter()
            .map(|read| read.sequence.to_ascii_uppercase())
            .collect();
        let hits = pool.install(|| assigner.assign_batch(&sequences[..]));

        for (read, hit) in batch.iter().zip(hits) {
            match hit {
                Some(i) => writer.write_single(&assigner.samples()[i], read)?,
                None => unassigned += 1,
            }
        }
        total += batch.len() as u64;
        debug!(total, unassigned, "Processed batch");
    }

    Ok(finish_stats(assigner, unassigned, total))
}

fn finish_stats(assigner: &Assigner, unassigned: u64, total: u64) -> DemuxStats {
    let stats = DemuxStats {
        counts: assigner.counts(),
        unassigned,
        total,
    };

    info!(
        total = stats.total,
        assigned = stats.assigned(),
        unassigned = stats.unassigned,
        "Demultiplexing complete"
    );
    for name in stats.empty_samples() {
        warn!(sample = %name, "No reads assigned to sample");
    }

    stats
}
