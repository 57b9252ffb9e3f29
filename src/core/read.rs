/// A single sequencing read.
///
/// Only `sequence` is interpreted by the assignment engine; the other fields
/// are carried through to the writers untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRead {
    /// Read name (text before the first whitespace of the header)
    pub name: String,

    /// Header text after the name, empty if absent
    pub description: String,

    pub sequence: String,

    /// Phred+33 quality string; `None` for FASTA reads
    pub quality: Option<String>,
}

impl SequenceRead {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sequence: sequence.into(),
            quality: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// Full header line without the leading `>` or `@`
    pub fn header(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.description)
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Extract the barcode from an Illumina read description.
///
/// bcl2fastq writes headers as
/// `<instrument>:<run>:<flowcell>:<lane>:<tile>:<x>:<y> <read>:<filtered>:<control>:<barcode>`,
/// so the barcode is everything after the final colon.
#[must_use]
pub fn barcode_from_description(description: &str) -> &str {
    match description.rfind(':') {
        Some(i) => &description[i + 1..],
        None => description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let read = SequenceRead::new("r1", "ACGT");
        assert_eq!(read.header(), "r1");

        let read = read.with_description("1:N:0:ACGTAC");
        assert_eq!(read.header(), "r1 1:N:0:ACGTAC");
    }

    #[test]
    fn test_barcode_from_description() {
        assert_eq!(barcode_from_description("1:N:0:GTCAGGT"), "GTCAGGT");
        assert_eq!(barcode_from_description("GTCAGGT"), "GTCAGGT");
        assert_eq!(barcode_from_description("1:N:0:"), "");
    }
}
