use std::collections::BTreeMap;

use tracing::debug;

use crate::core::sample::Sample;
use crate::matching::error::ConfigError;
use crate::matching::SampleLookup;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<u8, TrieNode>,
    /// Sample whose prefix ends at this node
    terminal: Option<usize>,
}

/// Longest-prefix matcher over per-sample prefixes.
///
/// Prefixes are matched verbatim against the start of a read, with no
/// mismatch tolerance and no reverse complement. Nested prefixes owned by
/// different samples are allowed; the deepest terminal reached wins.
#[derive(Debug, Clone)]
pub struct PrefixIndex {
    samples: Vec<Sample>,
    root: TrieNode,
    prefix_count: usize,
}

impl PrefixIndex {
    /// # Errors
    ///
    /// Returns a `ConfigError` if a sample has no prefixes, has an empty
    /// prefix, or registers the exact prefix string of another sample.
    pub fn new(samples: Vec<Sample>) -> Result<Self, ConfigError> {
        super::check_unique_names(&samples)?;

        let mut root = TrieNode::default();
        let mut prefix_count = 0;

        for (idx, sample) in samples.iter().enumerate() {
            if sample.prefixes.is_empty() {
                return Err(ConfigError::MissingMarker {
                    sample: sample.name.clone(),
                    kind: "prefix",
                });
            }

            for prefix in &sample.prefixes {
                if prefix.is_empty() {
                    return Err(ConfigError::EmptyPrefix {
                        sample: sample.name.clone(),
                    });
                }

                let node = prefix
                    .bytes()
                    .fold(&mut root, |node, b| node.children.entry(b).or_default());

                match node.terminal {
                    Some(existing) if existing != idx => {
                        return Err(ConfigError::DuplicatePrefix {
                            prefix: prefix.clone(),
                            sample: sample.name.clone(),
                            existing: samples[existing].name.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        node.terminal = Some(idx);
                        prefix_count += 1;
                    }
                }
            }
        }

        debug!(
            samples = samples.len(),
            prefixes = prefix_count,
            "Built prefix trie"
        );

        Ok(Self {
            samples,
            root,
            prefix_count,
        })
    }

    /// Number of distinct prefixes registered
    pub fn len(&self) -> usize {
        self.prefix_count
    }

    pub fn is_empty(&self) -> bool {
        self.prefix_count == 0
    }

    /// Length of the longest registered prefix matching `sequence`, with its owner
    pub fn longest_match(&self, sequence: &str) -> Option<(usize, usize)> {
        let mut node = &self.root;
        let mut best = None;

        for (depth, b) in sequence.bytes().enumerate() {
            match node.children.get(&b) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(sample) = node.terminal {
                best = Some((sample, depth + 1));
            }
        }

        best
    }
}

impl SampleLookup for PrefixIndex {
    fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn lookup(&self, sequence: &str) -> Option<usize> {
        self.longest_match(sequence).map(|(sample, _)| sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_prefix() {
        let index = PrefixIndex::new(vec![Sample::new("123").with_prefixes(["AGGC"])]).unwrap();
        assert_eq!(index.lookup("ATTCCTT"), None);
        assert_eq!(index.lookup("AGGCCTT"), Some(0));
        assert_eq!(index.lookup("AGG"), None);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let samples = vec![
            Sample::new("A").with_prefixes(["AG"]),
            Sample::new("B").with_prefixes(["AGGC"]),
        ];
        let index = PrefixIndex::new(samples).unwrap();
        assert_eq!(index.lookup("AGGCCTT"), Some(1));
        assert_eq!(index.longest_match("AGGCCTT"), Some((1, 4)));
        assert_eq!(index.lookup("AGTTT"), Some(0));
        // Walk falls off the trie after a shallower terminal
        assert_eq!(index.lookup("AGGA"), Some(0));
    }

    #[test]
    fn test_longest_prefix_independent_of_order() {
        let samples = vec![
            Sample::new("B").with_prefixes(["AGGC"]),
            Sample::new("A").with_prefixes(["AG"]),
        ];
        let index = PrefixIndex::new(samples).unwrap();
        assert_eq!(index.lookup("AGGCCTT"), Some(0));
        assert_eq!(index.lookup("AGTTT"), Some(1));
    }

    #[test]
    fn test_multiple_prefixes_per_sample() {
        let samples = vec![
            Sample::new("s1").with_prefixes(["AC", "GT"]),
            Sample::new("s2").with_prefixes(["TT"]),
        ];
        let index = PrefixIndex::new(samples).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.lookup("ACAAA"), Some(0));
        assert_eq!(index.lookup("GTAAA"), Some(0));
        assert_eq!(index.lookup("TTAAA"), Some(1));
        assert_eq!(index.lookup(""), None);
    }

    #[test]
    fn test_shared_prefix_rejected() {
        let samples = vec![
            Sample::new("s1").with_prefixes(["ACGT"]),
            Sample::new("s2").with_prefixes(["ACGT"]),
        ];
        assert!(matches!(
            PrefixIndex::new(samples),
            Err(ConfigError::DuplicatePrefix { .. })
        ));
    }

    #[test]
    fn test_missing_and_empty_prefix_rejected() {
        assert!(matches!(
            PrefixIndex::new(vec![Sample::new("s1")]),
            Err(ConfigError::MissingMarker { kind: "prefix", .. })
        ));

        let mut sample = Sample::new("s1");
        sample.prefixes.push(String::new());
        assert!(matches!(
            PrefixIndex::new(vec![sample]),
            Err(ConfigError::EmptyPrefix { .. })
        ));
    }
}
