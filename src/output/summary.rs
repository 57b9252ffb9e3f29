//! JSON run summary.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::output::writer::WriteError;

/// Per-sample read counts from one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemuxStats {
    pub counts: BTreeMap<String, u64>,
    pub unassigned: u64,
    pub total: u64,
}

impl DemuxStats {
    pub fn assigned(&self) -> u64 {
        self.total - self.unassigned
    }

    /// Samples that received no reads, in name order
    pub fn empty_samples(&self) -> impl Iterator<Item = &str> {
        self.counts
            .iter()
            .filter(|&(_, &count)| count == 0)
            .map(|(name, _)| name.as_str())
    }
}

/// Document written to `--summary-file`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary<C> {
    pub program: String,
    pub version: String,
    pub created_at: String,
    pub config: C,
    pub data: DemuxStats,
}

impl<C: Serialize> RunSummary<C> {
    pub fn new(config: C, data: DemuxStats) -> Self {
        Self {
            program: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            config,
            data,
        }
    }

    /// # Errors
    ///
    /// Returns `WriteError::Io` if the file cannot be created or serialized.
    pub fn write(&self, path: &Path) -> Result<(), WriteError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(std::io::Error::from)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> DemuxStats {
        DemuxStats {
            counts: BTreeMap::from([("S1".to_string(), 3), ("S2".to_string(), 0)]),
            unassigned: 2,
            total: 5,
        }
    }

    #[test]
    fn test_assigned_and_empty() {
        let s = stats();
        assert_eq!(s.assigned(), 3);
        assert_eq!(s.empty_samples().collect::<Vec<_>>(), vec!["S2"]);
    }

    #[test]
    fn test_write_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        let summary = RunSummary::new(serde_json::json!({"mismatches": 1}), stats());
        summary.write(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["program"], "barcode-demux");
        assert_eq!(value["config"]["mismatches"], 1);
        assert_eq!(value["data"]["counts"]["S1"], 3);
        assert_eq!(value["data"]["unassigned"], 2);
        assert_eq!(value["data"]["total"], 5);
        assert!(chrono::DateTime::parse_from_rfc3339(value["created_at"].as_str().unwrap()).is_ok());
    }
}
