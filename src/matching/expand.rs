//! Hamming-ball expansion of a marker.
//!
//! For a marker of length `L` and `k` substitutions there are `C(L, k)` ways
//! to pick the substituted positions and `3^k` alternative bases for each
//! pick, so [`expand`] yields `C(L, k) * 3^k` distinct sequences.

use itertools::Itertools;

use crate::core::nucleotide::{complement_code, deambiguate, NucleotideError};

/// Every sequence at Hamming distance exactly `k` from `marker`.
///
/// The marker itself is never included; `k == 0` yields an empty set. Each
/// combination of positions is templated with the "any other base" IUPAC
/// code at the chosen positions and then deambiguated.
///
/// # Errors
///
/// Returns `NucleotideError::InvalidBase` if `marker` contains anything
/// other than `A`, `C`, `G`, `T`.
pub fn expand(marker: &str, k: usize) -> Result<Vec<String>, NucleotideError> {
    if k == 0 || k > marker.len() {
        return Ok(Vec::new());
    }

    let bytes = marker.as_bytes();
    let mut variants = Vec::with_capacity(expected_len(marker.len(), k));

    for positions in (0..bytes.len()).combinations(k) {
        let mut template = bytes.to_vec();
        for &i in &positions {
            template[i] = complement_code(bytes[i]).ok_or(NucleotideError::InvalidBase {
                base: char::from(bytes[i]),
                position: i,
            })?;
        }
        // Template is ASCII by construction
        let template: String = template.into_iter().map(char::from).collect();
        variants.extend(deambiguate(&template)?);
    }

    Ok(variants)
}

/// `C(len, k) * 3^k`, the size of the exact-`k` Hamming shell
#[must_use]
pub fn expected_len(len: usize, k: usize) -> usize {
    if k > len {
        return 0;
    }
    let mut choose = 1usize;
    for i in 0..k {
        choose = choose * (len - i) / (i + 1);
    }
    (0..k).fold(choose, |acc, _| acc * 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn hamming(a: &str, b: &str) -> usize {
        a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_expand_one_mismatch() {
        let obs: HashSet<String> = expand("AGG", 1).unwrap().into_iter().collect();
        let exp: HashSet<String> = [
            "CGG", "GGG", "TGG", "AAG", "ACG", "ATG", "AGA", "AGC", "AGT",
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(obs, exp);
    }

    #[test]
    fn test_expand_zero_is_empty() {
        assert!(expand("ACGT", 0).unwrap().is_empty());
    }

    #[test]
    fn test_expand_shell_properties() {
        for marker in ["ACCTGAC", "GATTACA", "TT"] {
            for k in 1..=2 {
                let variants = expand(marker, k).unwrap();
                assert_eq!(variants.len(), expected_len(marker.len(), k));

                let unique: HashSet<&String> = variants.iter().collect();
                assert_eq!(unique.len(), variants.len(), "{marker} k={k}");

                for v in &variants {
                    assert_ne!(v, marker);
                    assert_eq!(v.len(), marker.len());
                    assert_eq!(hamming(v, marker), k);
                }
            }
        }
    }

    #[test]
    fn test_expected_len() {
        assert_eq!(expected_len(3, 1), 9);
        assert_eq!(expected_len(7, 2), 21 * 9);
        assert_eq!(expected_len(2, 3), 0);
    }

    #[test]
    fn test_expand_rejects_ambiguous_marker() {
        assert!(expand("ACNT", 1).is_err());
    }
}
