use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;
use tracing::debug;

use crate::core::read::SequenceRead;
use crate::core::sample::Sample;
use crate::core::types::ReadFormat;
use crate::utils::validation::{validate_sample_filename, ValidationError};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot name output files after sample {name}: {source}")]
    InvalidSampleName {
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error("Read {0} has no quality scores and cannot be written as FASTQ")]
    MissingQuality(String),
}

/// One open output file
enum Sink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Sink {
    fn create(path: &Path, format: ReadFormat) -> std::io::Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        Ok(match format {
            ReadFormat::Fastq => Self::Gzip(GzEncoder::new(file, Compression::default())),
            ReadFormat::Fasta => Self::Plain(file),
        })
    }

    fn finish(self) -> std::io::Result<()> {
        match self {
            Self::Plain(mut w) => w.flush(),
            Self::Gzip(enc) => enc.finish()?.flush(),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
        }
    }
}

/// Writes assigned reads into per-sample files under one directory.
///
/// Files are created on the first read for a sample, so samples without
/// reads leave no empty files behind. Paired output gets `_R1`/`_R2` files.
pub struct SampleWriter {
    output_dir: PathBuf,
    format: ReadFormat,
    paired: bool,
    sinks: HashMap<String, Vec<Sink>>,
}

impl SampleWriter {
    pub fn new(output_dir: impl Into<PathBuf>, format: ReadFormat, paired: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            paired,
            sinks: HashMap::new(),
        }
    }

    /// Paths the writer uses for a sample's reads
    ///
    /// # Errors
    ///
    /// Returns `WriteError::InvalidSampleName` if the name cannot be used as a
    /// file name.
    pub fn output_paths(&self, sample: &Sample) -> Result<Vec<PathBuf>, WriteError> {
        sample_paths(&self.output_dir, self.format, self.paired, sample)
    }

    fn sinks_for(&mut self, sample: &Sample) -> Result<&mut Vec<Sink>, WriteError> {
        let Self {
            output_dir,
            format,
            paired,
            sinks,
        } = self;

        match sinks.entry(sample.name.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let mut opened = Vec::with_capacity(2);
                for path in sample_paths(output_dir, *format, *paired, sample)? {
                    debug!(sample = %sample.name, path = %path.display(), "Opening output file");
                    opened.push(Sink::create(&path, *format)?);
                }
                Ok(entry.insert(opened))
            }
        }
    }

    /// Write a single-end read for `sample`
    ///
    /// # Errors
    ///
    /// Returns a `WriteError` if the file cannot be opened or written.
    pub fn write_single(&mut self, sample: &Sample, read: &SequenceRead) -> Result<(), WriteError> {
        let format = self.format;
        let sinks = self.sinks_for(sample)?;
        write_record(&mut sinks[0], read, format)
    }

    /// Write a read pair for `sample` to its R1 and R2 files
    ///
    /// # Errors
    ///
    /// Returns a `WriteError` if the files cannot be opened or written.
    pub fn write_pair(
        &mut self,
        sample: &Sample,
        forward: &SequenceRead,
        reverse: &SequenceRead,
    ) -> Result<(), WriteError> {
        let format = self.format;
        let sinks = self.sinks_for(sample)?;
        write_record(&mut sinks[0], forward, format)?;
        match sinks.get_mut(1) {
            Some(sink) => write_record(sink, reverse, format),
            None => write_record(&mut sinks[0], reverse, format),
        }
    }

    /// Flush and close every open file
    ///
    /// # Errors
    ///
    /// Returns `WriteError::Io` if any file fails to flush.
    pub fn finish(self) -> Result<(), WriteError> {
        for (_, sinks) in self.sinks {
            for sink in sinks {
                sink.finish()?;
            }
        }
        Ok(())
    }
}

fn sample_paths(
    output_dir: &Path,
    format: ReadFormat,
    paired: bool,
    sample: &Sample,
) -> Result<Vec<PathBuf>, WriteError> {
    let stem = validate_sample_filename(&sample.name).map_err(|source| {
        WriteError::InvalidSampleName {
            name: sample.name.clone(),
            source,
        }
    })?;
    let ext = format.extension();

    Ok(if paired {
        vec![
            output_dir.join(format!("{stem}_R1.{ext}")),
            output_dir.join(format!("{stem}_R2.{ext}")),
        ]
    } else {
        vec![output_dir.join(format!("{stem}.{ext}"))]
    })
}

fn write_record(w: &mut impl Write, read: &SequenceRead, format: ReadFormat) -> Result<(), WriteError> {
    match format {
        ReadFormat::Fasta => {
            writeln!(w, ">{}", read.header())?;
            writeln!(w, "{}", read.sequence)?;
        }
        ReadFormat::Fastq => {
            let quality = read
                .quality
                .as_deref()
                .ok_or_else(|| WriteError::MissingQuality(read.name.clone()))?;
            writeln!(w, "@{}", read.header())?;
            writeln!(w, "{}", read.sequence)?;
            writeln!(w, "+")?;
            writeln!(w, "{quality}")?;
        }
    }
    Ok(())
}
