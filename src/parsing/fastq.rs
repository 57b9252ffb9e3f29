//! Lazy FASTQ read sources using noodles.
//!
//! Supports uncompressed and gzip/bgzip compressed files (`.gz`, `.bgz`).
//! Paired-end data comes as two or three parallel files: forward, reverse
//! and optionally an index read file carrying the barcodes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fastq;

use crate::core::read::{barcode_from_description, SequenceRead};
use crate::parsing::manifest::ParseError;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a file for buffered reading, decompressing gzip by extension
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_buffered(path: &Path) -> Result<Box<dyn BufRead + Send>, ParseError> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Iterator over the records of one FASTQ file
pub struct FastqReads {
    reader: fastq::io::Reader<Box<dyn BufRead + Send>>,
}

impl FastqReads {
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        Ok(Self::from_reader(open_buffered(path)?))
    }

    pub fn from_reader(inner: Box<dyn BufRead + Send>) -> Self {
        Self {
            reader: fastq::io::Reader::new(inner),
        }
    }
}

impl Iterator for FastqReads {
    type Item = Result<SequenceRead, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = fastq::Record::default();
        match self.reader.read_record(&mut record) {
            Ok(0) => None,
            Ok(_) => Some(Ok(to_read(&record))),
            Err(e) => Some(Err(ParseError::Noodles(format!(
                "Failed to parse FASTQ record: {e}"
            )))),
        }
    }
}

fn to_read(record: &fastq::Record) -> SequenceRead {
    SequenceRead::new(
        String::from_utf8_lossy(record.name()),
        String::from_utf8_lossy(record.sequence()),
    )
    .with_description(String::from_utf8_lossy(record.description()))
    .with_quality(String::from_utf8_lossy(record.quality_scores()))
}

/// One read pair, plus its index read in the three-file layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPair {
    pub forward: SequenceRead,
    pub reverse: SequenceRead,
    pub index: Option<SequenceRead>,
}

impl ReadPair {
    /// The barcode sequence for this pair, as observed.
    ///
    /// This is the index read when present, otherwise the barcode that
    /// bcl2fastq appends to the forward read description.
    pub fn barcode(&self) -> &str {
        match &self.index {
            Some(index) => &index.sequence,
            None => barcode_from_description(&self.forward.description),
        }
    }
}

/// Zips forward, reverse and optional index FASTQ files record by record
pub struct PairedReads {
    forward: FastqReads,
    reverse: FastqReads,
    index: Option<FastqReads>,
    done: bool,
}

impl PairedReads {
    pub fn new(forward: FastqReads, reverse: FastqReads, index: Option<FastqReads>) -> Self {
        Self {
            forward,
            reverse,
            index,
            done: false,
        }
    }

    /// # Errors
    ///
    /// Returns `ParseError::Io` if any of the files cannot be opened.
    pub fn open(forward: &Path, reverse: &Path, index: Option<&Path>) -> Result<Self, ParseError> {
        Ok(Self::new(
            FastqReads::open(forward)?,
            FastqReads::open(reverse)?,
            index.map(FastqReads::open).transpose()?,
        ))
    }

    fn next_pair(&mut self) -> Result<Option<ReadPair>, ParseError> {
        let forward = self.forward.next().transpose()?;
        let reverse = self.reverse.next().transpose()?;
        let index = match &mut self.index {
            Some(reads) => Some(reads.next().transpose()?),
            None => None,
        };

        match (forward, reverse, index) {
            (None, None, None | Some(None)) => Ok(None),
            (Some(forward), Some(reverse), None) => Ok(Some(ReadPair {
                forward,
                reverse,
                index: None,
            })),
            (Some(forward), Some(reverse), Some(Some(index))) => Ok(Some(ReadPair {
                forward,
                reverse,
                index: Some(index),
            })),
            _ => Err(ParseError::UnpairedReads(
                "one input ended before the others".to_string(),
            )),
        }
    }
}

impl Iterator for PairedReads {
    type Item = Result<ReadPair, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_pair() {
            Ok(Some(pair)) => Some(Ok(pair)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
