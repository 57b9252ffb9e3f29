//! Assignment behavior through the public library API.

use std::collections::HashSet;

use barcode_demux::core::nucleotide::reverse_complement;
use barcode_demux::matching::expand::expand;
use barcode_demux::{Assigner, ConfigError, MismatchTolerance, Sample};

fn tolerance(k: usize) -> MismatchTolerance {
    MismatchTolerance::new(k).unwrap()
}

fn hamming(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count()
}

#[test]
fn test_expand_shell_sizes() {
    for marker in ["A", "AGG", "ACCTGAC", "GATTACAGT"] {
        for k in 1..=2.min(marker.len()) {
            let variants = expand(marker, k).unwrap();
            let unique: HashSet<&String> = variants.iter().collect();

            let l = marker.len();
            let choose = if k == 1 { l } else { l * (l - 1) / 2 };
            assert_eq!(variants.len(), choose * 3usize.pow(k as u32), "{marker} k={k}");
            assert_eq!(unique.len(), variants.len());
            assert!(variants.iter().all(|v| hamming(v, marker) == k));
            assert!(!unique.contains(&marker.to_string()));
        }
    }
}

#[test]
fn test_reverse_complement_round_trip() {
    for seq in ["", "A", "ACCTGAC", "GGGGCCCCAATT", "TGCA"] {
        let rc = reverse_complement(seq).unwrap();
        assert_eq!(reverse_complement(&rc).unwrap(), seq);
    }
}

#[test]
fn test_assign_tracks_counts_and_has_reads() {
    let samples = vec![
        Sample::new("Abc").with_barcode("ACCTGAC"),
        Sample::new("Def").with_barcode("TTGACCA"),
    ];
    let mut assigner = Assigner::exact(samples, tolerance(1), true).unwrap();
    let abc = assigner.samples()[0].clone();
    let def = assigner.samples()[1].clone();

    assert!(!assigner.has_reads(&abc));
    assert_eq!(assigner.assign("GTCAGGT").map(|s| s.name.clone()), Some("Abc".into()));
    assert!(assigner.has_reads(&abc));

    assert!(assigner.assign("GTCAAAT").is_none());
    assert!(assigner.has_reads(&abc));
    assert!(!assigner.has_reads(&def));

    let counts = assigner.counts();
    assert_eq!(counts["Abc"], 1);
    assert_eq!(counts["Def"], 0);
}

#[test]
fn test_collisions_rejected_in_either_order() {
    let a = Sample::new("A").with_barcode("ACGTACGT");
    let b = Sample::new("B").with_barcode("ACGTACCA");

    // Two substitutions apart: disjoint at k=0, overlapping at k=1
    assert!(Assigner::exact(vec![a.clone(), b.clone()], tolerance(0), false).is_ok());

    for samples in [vec![a.clone(), b.clone()], vec![b, a]] {
        let err = Assigner::exact(samples, tolerance(1), false).unwrap_err();
        assert!(matches!(err, ConfigError::VariantCollision { mismatches: 1, .. }));
    }
}

#[test]
fn test_zero_tolerance_matches_only_exact() {
    let samples = vec![Sample::new("A").with_barcode("ACGTACGT")];
    let mut assigner = Assigner::exact(samples, MismatchTolerance::ZERO, false).unwrap();

    assert!(assigner.assign("ACGTACGT").is_some());
    assert!(assigner.assign("ACGTACGA").is_none());
    assert!(assigner.assign("acgtacgt").is_none());
}

#[test]
fn test_prefix_longest_match_wins() {
    let samples = vec![
        Sample::new("A").with_prefixes(["AG"]),
        Sample::new("B").with_prefixes(["AGGC", "TT"]),
    ];
    let mut assigner = Assigner::prefix(samples).unwrap();

    let mut name = |seq: &str| assigner.assign(seq).map(|s| s.name.clone());
    assert_eq!(name("AGGCCTT").as_deref(), Some("B"));
    assert_eq!(name("AGTTT").as_deref(), Some("A"));
    assert_eq!(name("TTAG").as_deref(), Some("B"));
    assert_eq!(name("CAGG"), None);

    let counts = assigner.counts();
    assert_eq!(counts["A"], 1);
    assert_eq!(counts["B"], 2);
}

#[test]
fn test_batch_assignment_agrees_with_sequential() {
    let samples = vec![
        Sample::new("S1").with_barcode("ACCTGAC"),
        Sample::new("S2").with_barcode("TTGACCA"),
        Sample::new("S3").with_barcode("GGCATCG"),
    ];
    let reads: Vec<String> = ["GTCAGGT", "TGGTCAA", "CGATGCC", "NNNNNNN", "GTCAAGT", "TGGTCAT"]
        .iter()
        .cycle()
        .take(600)
        .map(ToString::to_string)
        .collect();

    let mut sequential = Assigner::exact(samples.clone(), tolerance(1), true).unwrap();
    let expected: Vec<Option<String>> = reads
        .iter()
        .map(|r| sequential.assign(r).map(|s| s.name.clone()))
        .collect();

    let mut batched = Assigner::exact(samples, tolerance(1), true).unwrap();
    let hits = batched.assign_batch(&reads[..]);
    let actual: Vec<Option<String>> = hits
        .iter()
        .map(|hit| hit.map(|i| batched.samples()[i].name.clone()))
        .collect();

    assert_eq!(actual, expected);
    assert_eq!(batched.counts(), sequential.counts());
}
