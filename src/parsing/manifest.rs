use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::core::sample::Sample;
use crate::utils::validation::check_sample_limit;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Sample name {name} appears more than once (line {line})")]
    DuplicateSample { name: String, line: usize },

    #[error("Barcode {barcode} for sample {sample} is already used by sample {existing}")]
    DuplicateBarcode {
        barcode: String,
        sample: String,
        existing: String,
    },

    #[error("Too many samples: {0} exceeds maximum allowed (100000)")]
    TooManySamples(usize),

    #[error("Read files have different numbers of records: {0}")]
    UnpairedReads(String),
}

/// Parse a tab-delimited sample manifest
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_manifest_file(path: &Path) -> Result<Vec<Sample>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_manifest_text(&content)
}

/// Parse manifest text with columns: name, barcode, [prefixes]
///
/// Lines starting with `#` and blank lines are skipped. The barcode column
/// may be empty or `-` for samples matched by prefix only; the optional third
/// column is a comma-separated prefix list.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 2 fields,
/// `ParseError::DuplicateSample` or `ParseError::DuplicateBarcode` if names or
/// barcodes repeat, or `ParseError::TooManySamples` if the limit is exceeded.
pub fn parse_manifest_text(text: &str) -> Result<Vec<Sample>, ParseError> {
    let mut samples: Vec<Sample> = Vec::new();
    let mut names: HashMap<String, usize> = HashMap::new();
    let mut barcodes: HashMap<String, usize> = HashMap::new();

    for (i, line) in text.lines().enumerate() {
        if line.starts_with('#') {
            continue;
        }
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Not enough fields in barcode file (line {line_num}): {fields:?}"
            )));
        }

        if check_sample_limit(samples.len()).is_some() {
            return Err(ParseError::TooManySamples(samples.len()));
        }

        let name = fields[0].trim();
        if name.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Empty sample name on line {line_num}"
            )));
        }
        if names.insert(name.to_string(), samples.len()).is_some() {
            return Err(ParseError::DuplicateSample {
                name: name.to_string(),
                line: line_num,
            });
        }

        let barcode = match fields[1].trim() {
            "-" => "",
            b => b,
        };
        let mut sample = Sample::new(name).with_barcode(barcode);

        if let Some(prefixes) = fields.get(2) {
            sample = sample.with_prefixes(prefixes.split(',').filter(|p| !p.trim().is_empty()));
        }

        if let Some(bc) = &sample.barcode {
            if let Some(&existing) = barcodes.get(bc) {
                return Err(ParseError::DuplicateBarcode {
                    barcode: bc.clone(),
                    sample: sample.name,
                    existing: samples[existing].name.clone(),
                });
            }
            barcodes.insert(bc.clone(), samples.len());
        }

        samples.push(sample);
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_text() {
        let text = "# sample\tbarcode\nS1\tacctgac\nS2\tGGTTAAC\n\n";
        let samples = parse_manifest_text(text).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].name, "S1");
        assert_eq!(samples[0].barcode.as_deref(), Some("ACCTGAC"));
        assert!(samples[1].prefixes.is_empty());
    }

    #[test]
    fn test_parse_manifest_prefixes() {
        let text = "A\t-\tAG\nB\t\tAGGC,TTA\n";
        let samples = parse_manifest_text(text).unwrap();
        assert!(samples[0].barcode.is_none());
        assert_eq!(samples[0].prefixes, vec!["AG".to_string()]);
        assert!(samples[1].barcode.is_none());
        assert_eq!(
            samples[1].prefixes,
            vec!["AGGC".to_string(), "TTA".to_string()]
        );
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_manifest_text("S1\tACGT\nS2\n").unwrap_err();
        match err {
            ParseError::InvalidFormat(msg) => assert!(msg.contains("line 2")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_name() {
        let err = parse_manifest_text("S1\tACGT\nS1\tTTTT\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateSample { line: 2, .. }));
    }

    #[test]
    fn test_duplicate_barcode_case_insensitive() {
        let err = parse_manifest_text("S1\tACGT\nS2\tacgt\n").unwrap_err();
        match err {
            ParseError::DuplicateBarcode {
                barcode,
                sample,
                existing,
            } => {
                assert_eq!(barcode, "ACGT");
                assert_eq!(sample, "S2");
                assert_eq!(existing, "S1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_barcodes_are_not_duplicates() {
        let samples = parse_manifest_text("S1\t-\tAA\nS2\t-\tCC\n").unwrap();
        assert_eq!(samples.len(), 2);
    }
}
