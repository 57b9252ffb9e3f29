//! Lazy FASTA read source using noodles.
//!
//! Files ending in `.gz` are decompressed on the fly.

use std::io::BufRead;
use std::path::Path;

use noodles::fasta;

use crate::core::read::SequenceRead;
use crate::parsing::fastq::open_buffered;
use crate::parsing::manifest::ParseError;

/// Iterator over the records of one FASTA file
pub struct FastaReads {
    reader: fasta::io::Reader<Box<dyn BufRead + Send>>,
}

impl FastaReads {
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        Ok(Self::from_reader(open_buffered(path)?))
    }

    pub fn from_reader(inner: Box<dyn BufRead + Send>) -> Self {
        Self {
            reader: fasta::io::Reader::new(inner),
        }
    }

    fn read_next(&mut self) -> Result<Option<SequenceRead>, ParseError> {
        let mut definition = String::new();
        if self.reader.read_definition(&mut definition)? == 0 {
            return Ok(None);
        }

        let header = definition.trim_end().strip_prefix('>').ok_or_else(|| {
            ParseError::Noodles(format!("Invalid FASTA definition line: {definition}"))
        })?;
        let (name, description) = header
            .split_once(char::is_whitespace)
            .map_or((header, ""), |(n, d)| (n, d.trim_start()));

        let mut sequence = Vec::new();
        self.reader.read_sequence(&mut sequence)?;

        Ok(Some(
            SequenceRead::new(name, String::from_utf8_lossy(&sequence)).with_description(description),
        ))
    }
}

impl Iterator for FastaReads {
    type Item = Result<SequenceRead, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}
