use serde::{Deserialize, Serialize};

use crate::matching::error::ConfigError;

/// Largest supported mismatch tolerance
pub const MAX_MISMATCHES: usize = 2;

/// Number of substitutions tolerated when matching exact barcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct MismatchTolerance(usize);

impl MismatchTolerance {
    pub const ZERO: Self = Self(0);

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTolerance` if `n` exceeds [`MAX_MISMATCHES`].
    pub fn new(n: usize) -> Result<Self, ConfigError> {
        if n > MAX_MISMATCHES {
            return Err(ConfigError::InvalidTolerance {
                value: n,
                max: MAX_MISMATCHES,
            });
        }
        Ok(Self(n))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for MismatchTolerance {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<usize> for MismatchTolerance {
    type Error = ConfigError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<MismatchTolerance> for usize {
    fn from(m: MismatchTolerance) -> Self {
        m.0
    }
}

impl std::fmt::Display for MismatchTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequence format written for demultiplexed reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReadFormat {
    /// Gzipped FASTQ
    #[default]
    Fastq,
    /// Plain FASTA
    Fasta,
}

impl ReadFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Fastq => "fastq.gz",
            Self::Fasta => "fasta",
        }
    }
}

impl std::fmt::Display for ReadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fastq => write!(f, "fastq"),
            Self::Fasta => write!(f, "fasta"),
        }
    }
}
