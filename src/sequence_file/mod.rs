//! Sequencing-run data files: kind detection, metadata and demultiplexing.
//!
//! A run is registered by a single path. Its kind is decided from the path
//! alone:
//!
//! | Path | Kind |
//! |------|------|
//! | does not exist | [`FileKind::Missing`] |
//! | directory | [`FileKind::PreSplitFastq`] |
//! | `Undetermined_S0_L001_R1_001.fastq.gz` | [`FileKind::IndexFastq`] |
//! | `*.fasta`, `*.fna` (optionally `.gz`) | [`FileKind::Fasta`] |
//! | `*.fastq`, `*.fq` (optionally `.gz`) | [`FileKind::Fastq`] |
//! | anything else | [`FileKind::Unsupported`] |

use std::path::{Path, PathBuf};

use serde::Serialize;

pub mod demultiplex;
pub mod metadata;

pub use demultiplex::{
    demultiplex_paired, demultiplex_single, ConfigFileError, DemuxConfig, DemuxError,
};
pub use metadata::RunFileInfo;

/// Forward-read file name written by bcl2fastq for undetermined reads
pub const UNDETERMINED_FORWARD: &str = "Undetermined_S0_L001_R1_001.fastq.gz";
const UNDETERMINED_INDEX: &str = "Undetermined_S0_L001_I1_001.fastq.gz";
const UNDETERMINED_REVERSE: &str = "Undetermined_S0_L001_R2_001.fastq.gz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Missing,
    Unsupported,
    /// Directory of FASTQ files already split by sample
    PreSplitFastq,
    /// Three-file FASTQ layout (forward, reverse, index)
    IndexFastq,
    Fasta,
    Fastq,
}

impl FileKind {
    pub fn detect(path: &Path) -> Self {
        if !path.exists() {
            return Self::Missing;
        }
        if path.is_dir() {
            return Self::PreSplitFastq;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some(UNDETERMINED_FORWARD) {
            return Self::IndexFastq;
        }

        let lower = path.to_string_lossy().to_lowercase();
        let base = lower.strip_suffix(".gz").unwrap_or(&lower);
        if base.ends_with(".fasta") || base.ends_with(".fna") {
            Self::Fasta
        } else if base.ends_with(".fastq") || base.ends_with(".fq") {
            Self::Fastq
        } else {
            Self::Unsupported
        }
    }

    /// Human-readable label used in reports
    pub fn label(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Unsupported => "unsupported",
            Self::PreSplitFastq => "Pre-split FASTQ",
            Self::IndexFastq => "Three-file FASTQ",
            Self::Fasta => "FASTA",
            Self::Fastq => "FASTQ",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Index and reverse files that accompany an undetermined forward-read file
pub fn index_fastq_siblings(forward: &Path) -> (PathBuf, PathBuf) {
    let dir = forward.parent().unwrap_or_else(|| Path::new(""));
    (dir.join(UNDETERMINED_INDEX), dir.join(UNDETERMINED_REVERSE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        let dir = tempfile::tempdir().unwrap();
        let touch = |name: &str| {
            let p = dir.path().join(name);
            std::fs::write(&p, "").unwrap();
            p
        };

        assert_eq!(FileKind::detect(&dir.path().join("nope.fasta")), FileKind::Missing);
        assert_eq!(FileKind::detect(dir.path()), FileKind::PreSplitFastq);
        assert_eq!(FileKind::detect(&touch(UNDETERMINED_FORWARD)), FileKind::IndexFastq);
        assert_eq!(FileKind::detect(&touch("reads.fasta")), FileKind::Fasta);
        assert_eq!(FileKind::detect(&touch("reads.fna.gz")), FileKind::Fasta);
        assert_eq!(FileKind::detect(&touch("reads.fq")), FileKind::Fastq);
        assert_eq!(FileKind::detect(&touch("reads.FASTQ.GZ")), FileKind::Fastq);
        assert_eq!(FileKind::detect(&touch("reads.sff")), FileKind::Unsupported);
    }

    #[test]
    fn test_index_fastq_siblings() {
        let (index, reverse) = index_fastq_siblings(Path::new("/run/Undetermined_S0_L001_R1_001.fastq.gz"));
        assert_eq!(index, Path::new("/run/Undetermined_S0_L001_I1_001.fastq.gz"));
        assert_eq!(reverse, Path::new("/run/Undetermined_S0_L001_R2_001.fastq.gz"));
    }
}
