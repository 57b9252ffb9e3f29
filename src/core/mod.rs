//! Core data types for read assignment.
//!
//! - [`Sample`]: A registry entry with a name and its barcode and/or prefixes
//! - [`SequenceRead`]: A read as handed over by the FASTQ/FASTA sources
//! - [`MismatchTolerance`], [`ReadFormat`]: Configuration value types
//! - [`nucleotide`]: Reverse complement and IUPAC ambiguity expansion
//!
//! ## Alphabet
//!
//! Markers stored in an index are always concrete, over `{A,C,G,T}`. IUPAC
//! codes appear only while mismatch variants are being generated:
//!
//! | Code | Bases | Code | Bases |
//! |------|-------|------|-------|
//! | R    | AG    | B    | CGT   |
//! | Y    | CT    | D    | AGT   |
//! | M    | AC    | H    | ACT   |
//! | K    | GT    | V    | ACG   |
//! | S    | CG    | N    | ACGT  |
//! | W    | AT    |      |       |
//!
//! [`Sample`]: sample::Sample
//! [`SequenceRead`]: read::SequenceRead
//! [`MismatchTolerance`]: types::MismatchTolerance
//! [`ReadFormat`]: types::ReadFormat

pub mod nucleotide;
pub mod read;
pub mod sample;
pub mod types;
