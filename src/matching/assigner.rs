use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::core::sample::Sample;
use crate::core::types::MismatchTolerance;
use crate::matching::counter::AssignmentCounter;
use crate::matching::error::ConfigError;
use crate::matching::exact::ExactMarkerIndex;
use crate::matching::prefix::PrefixIndex;
use crate::matching::SampleLookup;

/// The matching strategy, chosen once when the assigner is built
#[derive(Debug, Clone)]
pub enum MarkerIndex {
    /// Exact barcodes with a baked-in Hamming shell
    Exact(ExactMarkerIndex),
    /// Longest registered prefix
    Prefix(PrefixIndex),
}

impl SampleLookup for MarkerIndex {
    fn samples(&self) -> &[Sample] {
        match self {
            Self::Exact(index) => index.samples(),
            Self::Prefix(index) => index.samples(),
        }
    }

    fn lookup(&self, sequence: &str) -> Option<usize> {
        match self {
            Self::Exact(index) => index.lookup(sequence),
            Self::Prefix(index) => index.lookup(sequence),
        }
    }
}

impl From<ExactMarkerIndex> for MarkerIndex {
    fn from(index: ExactMarkerIndex) -> Self {
        Self::Exact(index)
    }
}

impl From<PrefixIndex> for MarkerIndex {
    fn from(index: PrefixIndex) -> Self {
        Self::Prefix(index)
    }
}

/// Assigns sequences to samples and keeps per-sample counts.
///
/// The index is immutable once built; the counter is the only state that
/// changes, and only on a successful assignment.
#[derive(Debug, Clone)]
pub struct Assigner {
    index: MarkerIndex,
    counts: AssignmentCounter,
}

impl Assigner {
    pub fn new(index: impl Into<MarkerIndex>) -> Self {
        let index = index.into();
        let counts = AssignmentCounter::new(index.samples().iter().map(|s| s.name.clone()));
        Self { index, counts }
    }

    /// Build an exact-barcode assigner
    ///
    /// # Errors
    ///
    /// See [`ExactMarkerIndex::new`].
    pub fn exact(
        samples: Vec<Sample>,
        mismatches: MismatchTolerance,
        revcomp: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(ExactMarkerIndex::new(samples, mismatches, revcomp)?))
    }

    /// Build a longest-prefix assigner
    ///
    /// # Errors
    ///
    /// See [`PrefixIndex::new`].
    pub fn prefix(samples: Vec<Sample>) -> Result<Self, ConfigError> {
        Ok(Self::new(PrefixIndex::new(samples)?))
    }

    /// Assign one sequence, counting the hit.
    ///
    /// A miss is a normal outcome and leaves the counts untouched.
    pub fn assign(&mut self, sequence: &str) -> Option<&Sample> {
        let idx = self.index.lookup(sequence)?;
        self.counts.increment_at(idx);
        Some(&self.index.samples()[idx])
    }

    /// Assign a batch of sequences in parallel on the current rayon pool.
    ///
    /// Lookups run against the shared read-only index; each worker counts
    /// into a private counter and the partial counts are summed into this
    /// assigner once the whole batch is done. Results are in input order, as
    /// positions into [`Self::samples`].
    pub fn assign_batch<S>(&mut self, sequences: &[S]) -> Vec<Option<usize>>
    where
        S: AsRef<str> + Sync,
    {
        let index = &self.index;
        let hits: Vec<Option<usize>> = sequences
            .par_iter()
            .map(|s| index.lookup(s.as_ref()))
            .collect();

        let zero = self.counts.zeroed();
        let batch = hits
            .par_iter()
            .fold(
                || zero.clone(),
                |mut counter, hit| {
                    if let Some(idx) = hit {
                        counter.increment_at(*idx);
                    }
                    counter
                },
            )
            .reduce(
                || zero.clone(),
                |mut a, b| {
                    a.absorb(&b);
                    a
                },
            );

        self.counts.absorb(&batch);
        hits
    }

    pub fn samples(&self) -> &[Sample] {
        self.index.samples()
    }

    pub fn index(&self) -> &MarkerIndex {
        &self.index
    }

    pub fn counter(&self) -> &AssignmentCounter {
        &self.counts
    }

    /// Snapshot of the counts keyed by sample name
    pub fn counts(&self) -> BTreeMap<String, u64> {
        self.counts.snapshot()
    }

    pub fn has_reads(&self, sample: &Sample) -> bool {
        self.counts.has_reads(&sample.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_mismatch() -> MismatchTolerance {
        MismatchTolerance::new(1).unwrap()
    }

    #[test]
    fn test_exact_assign_counts() {
        let sample = Sample::new("Abc").with_barcode("ACCTGAC");
        let mut assigner = Assigner::exact(vec![sample.clone()], one_mismatch(), true).unwrap();

        assert_eq!(assigner.assign("GTCAGGT"), Some(&sample));
        assert_eq!(assigner.counts()["Abc"], 1);

        assert_eq!(assigner.assign("GTCAAGT"), Some(&sample));
        assert_eq!(assigner.counts()["Abc"], 2);

        assert_eq!(assigner.assign("GTCAAAT"), None);
        assert_eq!(assigner.counts()["Abc"], 2);
    }

    #[test]
    fn test_prefix_has_reads() {
        let sample = Sample::new("123").with_prefixes(["AGGC"]);
        let mut assigner = Assigner::prefix(vec![sample.clone()]).unwrap();

        assert!(!assigner.has_reads(&sample));
        assert_eq!(assigner.assign("ATTCCTT"), None);
        assert!(!assigner.has_reads(&sample));
        assert_eq!(assigner.assign("AGGCCTT"), Some(&sample));
        assert!(assigner.has_reads(&sample));
    }

    #[test]
    fn test_has_reads_unaffected_by_other_misses() {
        let a = Sample::new("a").with_prefixes(["AA"]);
        let b = Sample::new("b").with_prefixes(["CC"]);
        let mut assigner = Assigner::prefix(vec![a.clone(), b.clone()]).unwrap();

        assigner.assign("AAGT");
        assigner.assign("GGGG");
        assert!(assigner.has_reads(&a));
        assert!(!assigner.has_reads(&b));
    }

    #[test]
    fn test_counts_include_unassigned_samples() {
        let samples = vec![
            Sample::new("s1").with_barcode("AAAAAA"),
            Sample::new("s2").with_barcode("CCCCCC"),
        ];
        let assigner = Assigner::exact(samples, one_mismatch(), false).unwrap();
        let counts = assigner.counts();
        assert_eq!(counts.len(), 2);
        assert!(counts.values().all(|&c| c == 0));
    }

    #[test]
    fn test_assign_batch_matches_sequential() {
        let samples = vec![
            Sample::new("s1").with_barcode("AAAAAA"),
            Sample::new("s2").with_barcode("CCCCCC"),
        ];
        let reads = ["AAAAAA", "AAAAAT", "CCCCCC", "GGGGGG", "CCACCC", "AAAAAA"];

        let mut sequential = Assigner::exact(samples.clone(), one_mismatch(), false).unwrap();
        let expected: Vec<Option<String>> = reads
            .iter()
            .map(|r| sequential.assign(r).map(|s| s.name.clone()))
            .collect();

        let mut parallel = Assigner::exact(samples, one_mismatch(), false).unwrap();
        let hits = parallel.assign_batch(&reads[..]);
        let observed: Vec<Option<String>> = hits
            .iter()
            .map(|h| h.map(|i| parallel.samples()[i].name.clone()))
            .collect();

        assert_eq!(observed, expected);
        assert_eq!(parallel.counts(), sequential.counts());
        assert_eq!(parallel.counts()["s1"], 3);
        assert_eq!(parallel.counts()["s2"], 2);
    }
}
