use thiserror::Error;

use crate::core::nucleotide::NucleotideError;

/// Construction-time failures of a marker index.
///
/// Every variant names the sample(s) and, where relevant, the marker string
/// involved. No partially built index is ever returned alongside one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Only 0 to {max} mismatches allowed (got {value})")]
    InvalidTolerance { value: usize, max: usize },

    #[error("Mismatch tolerance {mismatches} exceeds length of barcode {barcode} for sample {sample}")]
    ToleranceExceedsMarker {
        sample: String,
        barcode: String,
        mismatches: usize,
    },

    #[error("Sample {sample} has no {kind}")]
    MissingMarker { sample: String, kind: &'static str },

    #[error("Invalid marker for sample {sample}: {source}")]
    InvalidMarker {
        sample: String,
        #[source]
        source: NucleotideError,
    },

    #[error("Barcode {barcode} for sample {sample} duplicates the barcode of sample {existing}")]
    DuplicateMarker {
        barcode: String,
        sample: String,
        existing: String,
    },

    #[error(
        "Barcode {variant} for sample {sample} matches barcode for sample {existing} with {mismatches} mismatches"
    )]
    VariantCollision {
        variant: String,
        sample: String,
        existing: String,
        mismatches: usize,
    },

    #[error("Prefix {prefix} for sample {sample} is already registered to sample {existing}")]
    DuplicatePrefix {
        prefix: String,
        sample: String,
        existing: String,
    },

    #[error("Sample {sample} has an empty prefix")]
    EmptyPrefix { sample: String },

    #[error("Sample name {0} is not unique")]
    DuplicateSampleName(String),

    #[error("Cannot merge counts for different sample sets")]
    CountMismatch,
}
