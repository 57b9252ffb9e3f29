//! # barcode-demux
//!
//! A library for assigning multiplexed sequencing reads to their samples.
//!
//! A sequencing run pools reads from many samples. Each sample is tagged with
//! a short barcode (or identified by a leading sequence prefix), and
//! demultiplexing sorts every read back to the sample that owns it.
//!
//! ## Features
//!
//! - **Mismatch-tolerant barcodes**: Up to two substitutions, precomputed into
//!   a single hash lookup per read
//! - **Reverse-complement matching**: Barcodes read on the opposite strand
//! - **Collision detection**: Registries whose tolerance shells overlap are
//!   rejected before any read is assigned
//! - **Longest-prefix assignment**: Nested prefixes resolved by a trie
//! - **Parallel batches**: Lookups run on a rayon pool, output stays in order
//!
//! ## Example
//!
//! ```rust
//! use barcode_demux::{Assigner, MismatchTolerance, Sample};
//!
//! let samples = vec![
//!     Sample::new("S1").with_barcode("ACCTGAC"),
//!     Sample::new("S2").with_barcode("TTGACCA"),
//! ];
//! let mut assigner = Assigner::exact(samples, MismatchTolerance::default(), false).unwrap();
//!
//! assert_eq!(assigner.assign("ACCTGAA").map(|s| s.name.as_str()), Some("S1"));
//! assert!(assigner.assign("GGGGGGG").is_none());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Nucleotide codes, reads, samples and shared types
//! - [`matching`]: Exact and prefix indexes, counters and the assigner
//! - [`parsing`]: Barcode manifests and FASTQ/FASTA read sources
//! - [`output`]: Per-sample writers and the JSON run summary
//! - [`sequence_file`]: Run-file detection, metadata and pipelines
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod output;
pub mod parsing;
pub mod sequence_file;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::read::SequenceRead;
pub use crate::core::sample::Sample;
pub use crate::core::types::*;
pub use crate::matching::{Assigner, ConfigError};
pub use crate::output::{DemuxStats, SampleWriter};
pub use crate::sequence_file::{DemuxConfig, FileKind, RunFileInfo};
