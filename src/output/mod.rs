//! Per-sample read files and the JSON run summary.

pub mod summary;
pub mod writer;

pub use summary::{DemuxStats, RunSummary};
pub use writer::{SampleWriter, WriteError};
