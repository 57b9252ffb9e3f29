use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::core::nucleotide::{reverse_complement, validate_concrete, NucleotideError};
use crate::core::sample::Sample;
use crate::core::types::MismatchTolerance;
use crate::matching::error::ConfigError;
use crate::matching::expand::{expand, expected_len};
use crate::matching::SampleLookup;

/// Owner of one key in the exact index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Position of the owning sample in [`ExactMarkerIndex::samples`]
    pub sample: usize,
    /// Hamming distance from the owner's barcode key
    pub distance: usize,
}

/// Mismatch-tolerant exact barcode matcher.
///
/// Every barcode (optionally reverse complemented) and its full Hamming
/// shell at the configured tolerance is stored as a key. Lookups are a single
/// hash probe; no distances are computed at assignment time.
#[derive(Debug, Clone)]
pub struct ExactMarkerIndex {
    samples: Vec<Sample>,
    keys: HashMap<String, IndexEntry>,
    mismatches: MismatchTolerance,
    revcomp: bool,
}

impl ExactMarkerIndex {
    /// Build the index, rejecting any key owned by two samples.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a sample has no barcode or an invalid one,
    /// if the tolerance exceeds a barcode's length, if two barcodes are equal,
    /// or if any mismatch variant of one sample collides with another
    /// sample's barcode or variants.
    pub fn new(
        samples: Vec<Sample>,
        mismatches: MismatchTolerance,
        revcomp: bool,
    ) -> Result<Self, ConfigError> {
        super::check_unique_names(&samples)?;

        let k = mismatches.get();
        let mut keys: HashMap<String, IndexEntry> = HashMap::new();

        for (idx, sample) in samples.iter().enumerate() {
            let barcode = sample
                .barcode
                .as_deref()
                .filter(|b| !b.is_empty())
                .ok_or_else(|| ConfigError::MissingMarker {
                    sample: sample.name.clone(),
                    kind: "barcode",
                })?;

            let invalid = |source: NucleotideError| ConfigError::InvalidMarker {
                sample: sample.name.clone(),
                source,
            };
            let barcode = barcode.to_uppercase();
            validate_concrete(&barcode).map_err(invalid)?;

            if k > barcode.len() {
                return Err(ConfigError::ToleranceExceedsMarker {
                    sample: sample.name.clone(),
                    barcode,
                    mismatches: k,
                });
            }

            let key = if revcomp {
                reverse_complement(&barcode).map_err(invalid)?
            } else {
                barcode
            };

            let variants = expand(&key, k).map_err(invalid)?;
            keys.reserve(variants.len() + 1);

            insert_key(&mut keys, &samples, key, idx, 0, k)?;
            for variant in variants {
                insert_key(&mut keys, &samples, variant, idx, k, k)?;
            }
        }

        debug!(
            samples = samples.len(),
            keys = keys.len(),
            mismatches = k,
            revcomp,
            "Built exact barcode index"
        );

        Ok(Self {
            samples,
            keys,
            mismatches,
            revcomp,
        })
    }

    /// Look up a sequence, returning the owning entry and its distance
    pub fn entry(&self, sequence: &str) -> Option<IndexEntry> {
        self.keys.get(sequence).copied()
    }

    pub fn mismatches(&self) -> MismatchTolerance {
        self.mismatches
    }

    pub fn revcomp(&self) -> bool {
        self.revcomp
    }

    /// Number of keys (barcodes plus variants) in the index
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Expected key count for a collision-free registry of equal-length barcodes
    pub fn expected_len(samples: usize, barcode_len: usize, mismatches: MismatchTolerance) -> usize {
        samples * (1 + expected_len(barcode_len, mismatches.get()))
    }
}

fn insert_key(
    keys: &mut HashMap<String, IndexEntry>,
    samples: &[Sample],
    key: String,
    sample: usize,
    distance: usize,
    mismatches: usize,
) -> Result<(), ConfigError> {
    match keys.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(IndexEntry { sample, distance });
            Ok(())
        }
        Entry::Occupied(slot) => {
            let existing = slot.get();
            let key = slot.key().clone();
            if existing.distance == 0 && distance == 0 {
                Err(ConfigError::DuplicateMarker {
                    barcode: key,
                    sample: samples[sample].name.clone(),
                    existing: samples[existing.sample].name.clone(),
                })
            } else {
                Err(ConfigError::VariantCollision {
                    variant: key,
                    sample: samples[sample].name.clone(),
                    existing: samples[existing.sample].name.clone(),
                    mismatches,
                })
            }
        }
    }
}

impl SampleLookup for ExactMarkerIndex {
    fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn lookup(&self, sequence: &str) -> Option<usize> {
        self.keys.get(sequence).map(|e| e.sample)
    }
}
