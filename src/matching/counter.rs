use std::collections::{BTreeMap, HashMap};

use crate::matching::error::ConfigError;

/// Per-sample read counts.
///
/// Every registered sample starts at zero so that samples without reads are
/// still reported. Counters built for the same registry can be merged, which
/// is how per-worker counts are combined after a parallel batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentCounter {
    names: Vec<String>,
    counts: Vec<u64>,
    positions: HashMap<String, usize>,
}

impl AssignmentCounter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let positions = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self {
            counts: vec![0; names.len()],
            names,
            positions,
        }
    }

    /// A counter over the same samples with every count reset to zero
    #[must_use]
    pub fn zeroed(&self) -> Self {
        Self {
            names: self.names.clone(),
            counts: vec![0; self.counts.len()],
            positions: self.positions.clone(),
        }
    }

    /// Add one read to `name`; returns false for an unregistered name
    pub fn increment(&mut self, name: &str) -> bool {
        match self.positions.get(name) {
            Some(&i) => {
                self.counts[i] += 1;
                true
            }
            None => false,
        }
    }

    /// Add one read to the sample at registry position `index`
    pub(crate) fn increment_at(&mut self, index: usize) {
        self.counts[index] += 1;
    }

    pub fn count(&self, name: &str) -> Option<u64> {
        self.positions.get(name).map(|&i| self.counts[i])
    }

    pub fn has_reads(&self, name: &str) -> bool {
        self.count(name).is_some_and(|c| c > 0)
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Names of samples with no reads, in registry order
    pub fn empty_samples(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .zip(&self.counts)
            .filter(|&(_, &c)| c == 0)
            .map(|(n, _)| n.as_str())
    }

    /// Current counts keyed by sample name
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.names
            .iter()
            .cloned()
            .zip(self.counts.iter().copied())
            .collect()
    }

    /// Add `other`'s counts into this counter.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CountMismatch` if the two counters were not built
    /// for the same samples in the same order.
    pub fn merge(&mut self, other: &Self) -> Result<(), ConfigError> {
        if self.names != other.names {
            return Err(ConfigError::CountMismatch);
        }
        self.absorb(other);
        Ok(())
    }

    /// Sum without checking registries; both sides come from [`Self::zeroed`]
    pub(crate) fn absorb(&mut self, other: &Self) {
        for (c, o) in self.counts.iter_mut().zip(&other.counts) {
            *c += o;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let counter = AssignmentCounter::new(["a", "b"]);
        assert_eq!(counter.count("a"), Some(0));
        assert_eq!(counter.count("b"), Some(0));
        assert_eq!(counter.count("c"), None);
        assert_eq!(counter.total(), 0);
        assert_eq!(counter.empty_samples().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_increment_and_has_reads() {
        let mut counter = AssignmentCounter::new(["a", "b"]);
        assert!(!counter.has_reads("a"));
        assert!(counter.increment("a"));
        assert!(counter.has_reads("a"));
        assert!(!counter.has_reads("b"));
        assert!(!counter.increment("missing"));
        assert_eq!(counter.total(), 1);
    }

    #[test]
    fn test_snapshot() {
        let mut counter = AssignmentCounter::new(["b", "a"]);
        counter.increment("b");
        counter.increment("b");
        let snap = counter.snapshot();
        assert_eq!(snap.get("a"), Some(&0));
        assert_eq!(snap.get("b"), Some(&2));
    }

    #[test]
    fn test_merge_is_order_independent() {
        let base = AssignmentCounter::new(["a", "b"]);
        let mut w1 = base.zeroed();
        let mut w2 = base.zeroed();
        w1.increment("a");
        w2.increment("a");
        w2.increment("b");

        let mut left = base.zeroed();
        left.merge(&w1).unwrap();
        left.merge(&w2).unwrap();

        let mut right = base.zeroed();
        right.merge(&w2).unwrap();
        right.merge(&w1).unwrap();

        assert_eq!(left, right);
        assert_eq!(left.count("a"), Some(2));
        assert_eq!(left.count("b"), Some(1));
    }

    #[test]
    fn test_merge_rejects_other_registry() {
        let mut a = AssignmentCounter::new(["a"]);
        let b = AssignmentCounter::new(["b"]);
        assert_eq!(a.merge(&b), Err(ConfigError::CountMismatch));
    }
}
