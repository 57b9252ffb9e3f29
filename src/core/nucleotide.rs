//! Nucleotide tables and sequence transforms.
//!
//! All tables here are fixed process-wide data. Concrete markers are always
//! over `{A,C,G,T}`; IUPAC ambiguity codes only appear as an intermediate
//! representation while expanding mismatch variants.

use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NucleotideError {
    #[error("Invalid base '{base}' at position {position}")]
    InvalidBase { base: char, position: usize },
}

/// The four concrete bases
pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Complement of a concrete base (`A<->T`, `C<->G`)
#[must_use]
pub fn complement(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(b'T'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        b'T' => Some(b'A'),
        _ => None,
    }
}

/// Concrete bases denoted by an IUPAC symbol
#[must_use]
pub fn ambiguity_bases(code: u8) -> Option<&'static [u8]> {
    let bases: &'static [u8] = match code {
        b'A' => b"A",
        b'C' => b"C",
        b'G' => b"G",
        b'T' => b"T",
        b'R' => b"AG",
        b'Y' => b"CT",
        b'M' => b"AC",
        b'K' => b"GT",
        b'S' => b"CG",
        b'W' => b"AT",
        b'H' => b"ACT",
        b'B' => b"CGT",
        b'V' => b"ACG",
        b'D' => b"AGT",
        b'N' => b"ACGT",
        _ => return None,
    };
    Some(bases)
}

/// IUPAC code for "any base other than `base`".
///
/// Only defined for the four concrete bases.
#[must_use]
pub fn complement_code(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(b'B'),
        b'C' => Some(b'D'),
        b'G' => Some(b'H'),
        b'T' => Some(b'V'),
        _ => None,
    }
}

fn invalid_base(base: u8, position: usize) -> NucleotideError {
    NucleotideError::InvalidBase {
        base: char::from(base),
        position,
    }
}

/// Reverse complement a concrete sequence.
///
/// # Errors
///
/// Returns `NucleotideError::InvalidBase` if any character is not one of
/// `A`, `C`, `G`, `T`. Ambiguity codes are not accepted.
pub fn reverse_complement(seq: &str) -> Result<String, NucleotideError> {
    let bytes = seq.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    for (i, &b) in bytes.iter().enumerate().rev() {
        out.push(complement(b).ok_or_else(|| invalid_base(b, i))?);
    }
    // Only ASCII bases are ever pushed
    Ok(out.into_iter().map(char::from).collect())
}

/// Expand every IUPAC symbol in `seq` into the concrete sequences it denotes.
///
/// The result is the Cartesian product of the per-position base sets, so a
/// sequence with no ambiguity codes expands to itself.
///
/// # Errors
///
/// Returns `NucleotideError::InvalidBase` on an unrecognised symbol.
pub fn deambiguate(seq: &str) -> Result<Vec<String>, NucleotideError> {
    let choices = seq
        .bytes()
        .enumerate()
        .map(|(i, b)| ambiguity_bases(b).ok_or_else(|| invalid_base(b, i)))
        .collect::<Result<Vec<_>, _>>()?;

    if choices.is_empty() {
        return Ok(vec![String::new()]);
    }

    Ok(choices
        .into_iter()
        .map(|bases| bases.iter().copied())
        .multi_cartesian_product()
        .map(|bases| bases.into_iter().map(char::from).collect())
        .collect())
}

/// Check that a sequence is over `{A,C,G,T}` only
///
/// # Errors
///
/// Returns `NucleotideError::InvalidBase` for the first offending character.
pub fn validate_concrete(seq: &str) -> Result<(), NucleotideError> {
    match seq.bytes().position(|b| !BASES.contains(&b)) {
        Some(i) => Err(invalid_base(seq.as_bytes()[i], i)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("AGATC").unwrap(), "GATCT");
        assert_eq!(reverse_complement("ACCTGAC").unwrap(), "GTCAGGT");
        assert_eq!(reverse_complement("").unwrap(), "");
    }

    #[test]
    fn test_reverse_complement_rejects_ambiguity() {
        let err = reverse_complement("ANCC").unwrap_err();
        assert_eq!(
            err,
            NucleotideError::InvalidBase {
                base: 'N',
                position: 1
            }
        );
    }

    #[test]
    fn test_reverse_complement_round_trip() {
        for seq in ["A", "ACGT", "GGGCCCAATT", "TTTTGACA"] {
            let rc = reverse_complement(seq).unwrap();
            assert_eq!(reverse_complement(&rc).unwrap(), seq);
        }
    }

    #[test]
    fn test_deambiguate() {
        let obs: HashSet<String> = deambiguate("AYGR").unwrap().into_iter().collect();
        let exp: HashSet<String> = ["ACGA", "ACGG", "ATGA", "ATGG"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(obs, exp);

        let obs: HashSet<String> = deambiguate("AGN").unwrap().into_iter().collect();
        let exp: HashSet<String> = ["AGA", "AGC", "AGG", "AGT"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(obs, exp);
    }

    #[test]
    fn test_deambiguate_concrete_is_identity() {
        assert_eq!(deambiguate("ACGT").unwrap(), vec!["ACGT".to_string()]);
    }

    #[test]
    fn test_deambiguate_invalid_symbol() {
        assert!(matches!(
            deambiguate("ACXT"),
            Err(NucleotideError::InvalidBase {
                base: 'X',
                position: 2
            })
        ));
    }

    #[test]
    fn test_complement_code_excludes_base() {
        for base in BASES {
            let code = complement_code(base).unwrap();
            let others = ambiguity_bases(code).unwrap();
            assert_eq!(others.len(), 3);
            assert!(!others.contains(&base));
        }
        assert_eq!(complement_code(b'N'), None);
    }

    #[test]
    fn test_validate_concrete() {
        assert!(validate_concrete("ACGTTGCA").is_ok());
        assert!(validate_concrete("ACGn").is_err());
    }
}
