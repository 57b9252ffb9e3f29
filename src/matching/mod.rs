//! Read assignment engine.
//!
//! This module provides the data structures that map an observed sequence to
//! the sample that owns it:
//!
//! - [`ExactMarkerIndex`]: Barcodes plus every mismatch variant within the
//!   configured tolerance, checked for cross-sample collisions at build time
//! - [`PrefixIndex`]: A trie of per-sample prefixes resolved by longest match
//! - [`AssignmentCounter`]: Per-sample hit counts
//! - [`Assigner`]: Either index plus its counter, behind one `assign` call
//!
//! ## Mismatch tolerance
//!
//! All tolerance is baked into the exact index when it is built. For a
//! barcode of length `L` and tolerance `k`, the `C(L, k) * 3^k` variants at
//! distance exactly `k` are generated by templating each combination of
//! positions with IUPAC "any other base" codes and expanding them. A key that
//! would be owned by two samples aborts construction.
//!
//! ## Example
//!
//! ```rust
//! use barcode_demux::core::sample::Sample;
//! use barcode_demux::core::types::MismatchTolerance;
//! use barcode_demux::matching::Assigner;
//!
//! let samples = vec![Sample::new("Abc").with_barcode("ACCTGAC")];
//! let mut assigner = Assigner::exact(samples, MismatchTolerance::new(1).unwrap(), true).unwrap();
//!
//! assert!(assigner.assign("GTCAAGT").is_some());
//! assert!(assigner.assign("GTCAAAT").is_none());
//! assert_eq!(assigner.counts()["Abc"], 1);
//! ```
//!
//! [`ExactMarkerIndex`]: exact::ExactMarkerIndex
//! [`PrefixIndex`]: prefix::PrefixIndex
//! [`AssignmentCounter`]: counter::AssignmentCounter

use std::collections::HashSet;

use crate::core::sample::Sample;

pub mod assigner;
pub mod counter;
pub mod error;
pub mod exact;
pub mod expand;
pub mod prefix;

pub use assigner::{Assigner, MarkerIndex};
pub use error::ConfigError;

/// Read-only mapping from a sequence to the position of its sample
pub trait SampleLookup: Send + Sync {
    /// Registered samples, in registry order
    fn samples(&self) -> &[Sample];

    /// Position in [`Self::samples`] of the sample owning `sequence`
    fn lookup(&self, sequence: &str) -> Option<usize>;
}

fn check_unique_names(samples: &[Sample]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for sample in samples {
        if !seen.insert(sample.name.as_str()) {
            return Err(ConfigError::DuplicateSampleName(sample.name.clone()));
        }
    }
    Ok(())
}
