use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::parsing::fasta::FastaReads;
use crate::parsing::fastq::FastqReads;
use crate::parsing::manifest::ParseError;
use crate::sequence_file::{index_fastq_siblings, FileKind};

const CHECKSUM_CHUNK: usize = 1 << 20;

/// Metadata reported for one registered run file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunFileInfo {
    pub path: PathBuf,
    pub kind: FileKind,
    pub size: Option<u64>,
    /// Reads, or read pairs for the three-file layout
    pub reads: Option<u64>,
    pub bases: Option<u64>,
    pub checksum: Option<String>,
    pub comment: Option<String>,
}

impl RunFileInfo {
    /// Inspect `path` and gather whatever metadata its kind supports.
    ///
    /// Never fails: read errors are recorded in `comment`.
    pub fn collect(path: &Path) -> Self {
        let kind = FileKind::detect(path);
        let mut info = Self {
            path: path.to_path_buf(),
            kind,
            size: None,
            reads: None,
            bases: None,
            checksum: None,
            comment: None,
        };

        match kind {
            FileKind::Missing => {
                info.comment = Some(format!("Data resource {} does not exist", path.display()));
            }
            FileKind::Unsupported => {
                info.comment = Some(format!(
                    "Invalid/unsupported data resource {}",
                    path.display()
                ));
            }
            FileKind::PreSplitFastq => {
                info.size = std::fs::metadata(path).ok().map(|m| m.len());
            }
            FileKind::Fasta | FileKind::Fastq | FileKind::IndexFastq => {
                if let Err(e) = info.fill(path) {
                    info.comment = Some(e.to_string());
                }
            }
        }

        info
    }

    fn fill(&mut self, path: &Path) -> Result<(), ParseError> {
        self.size = Some(std::fs::metadata(path)?.len());

        debug!(path = %path.display(), "Counting reads");
        let (reads, bases) = match self.kind {
            FileKind::Fasta => tally(FastaReads::open(path)?)?,
            FileKind::IndexFastq => {
                let (_, reverse) = index_fastq_siblings(path);
                let (pairs, forward_bases) = tally(FastqReads::open(path)?)?;
                let (_, reverse_bases) = tally(FastqReads::open(&reverse)?)?;
                (pairs, forward_bases + reverse_bases)
            }
            _ => tally(FastqReads::open(path)?)?,
        };
        self.reads = Some(reads);
        self.bases = Some(bases);

        debug!(path = %path.display(), "Computing checksum");
        self.checksum = Some(md5_hex(path)?);
        Ok(())
    }
}

fn tally<I>(reads: I) -> Result<(u64, u64), ParseError>
where
    I: Iterator<Item = Result<crate::core::read::SequenceRead, ParseError>>,
{
    reads.fold(Ok((0, 0)), |acc, read| {
        let (n, bases) = acc?;
        Ok((n + 1, bases + read?.len() as u64))
    })
}

/// MD5 of the raw file bytes, as lowercase hex
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn md5_hex(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut context = md5::Context::new();
    let mut buf = vec![0u8; CHECKSUM_CHUNK];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        context.consume(&buf[..n]);
    }
    Ok(format!("{:x}", context.compute()))
}
