//! Parsers for the inputs of a demultiplexing run.
//!
//! This module provides:
//!
//! - **Sample manifests**: Tab-delimited sample name, barcode and prefix lists
//! - **FASTQ files**: Single files and zipped forward/reverse/index sets
//! - **FASTA files**: Single-end reads for prefix assignment
//!
//! ## Example
//!
//! ```rust,no_run
//! use barcode_demux::parsing::manifest::parse_manifest_file;
//! use barcode_demux::parsing::fastq::PairedReads;
//! use std::path::Path;
//!
//! let samples = parse_manifest_file(Path::new("barcodes.tsv")).unwrap();
//! let pairs = PairedReads::open(
//!     Path::new("Undetermined_S0_L001_R1_001.fastq.gz"),
//!     Path::new("Undetermined_S0_L001_R2_001.fastq.gz"),
//!     Some(Path::new("Undetermined_S0_L001_I1_001.fastq.gz")),
//! ).unwrap();
//! ```
//!
//! ## Manifest columns
//!
//! | Column | Description | Required |
//! |--------|-------------|----------|
//! | 1      | Sample name, unique | Yes |
//! | 2      | Barcode; empty or `-` for none | Yes |
//! | 3      | Comma-separated prefixes | No |

pub mod fasta;
pub mod fastq;
pub mod manifest;
