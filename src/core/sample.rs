use serde::{Deserialize, Serialize};

/// One demultiplexable unit from the sample registry.
///
/// A sample carries an exact barcode, a list of prefixes, or both; which one
/// is required depends on the assignment strategy it is handed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Unique sample name
    pub name: String,

    /// Exact barcode, uppercased
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    /// Registered prefixes in insertion order, uppercased and deduplicated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefixes: Vec<String>,
}

impl Sample {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            barcode: None,
            prefixes: Vec::new(),
        }
    }

    /// Set the exact barcode; an empty string clears it
    #[must_use]
    pub fn with_barcode(mut self, barcode: impl AsRef<str>) -> Self {
        let barcode = barcode.as_ref().trim();
        self.barcode = if barcode.is_empty() {
            None
        } else {
            Some(barcode.to_uppercase())
        };
        self
    }

    #[must_use]
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for prefix in prefixes {
            self.add_prefix(prefix.as_ref());
        }
        self
    }

    /// Add a prefix, keeping the first occurrence of duplicates
    pub fn add_prefix(&mut self, prefix: &str) {
        let prefix = prefix.trim().to_uppercase();
        if !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
    }

    pub fn has_barcode(&self) -> bool {
        self.barcode.as_deref().is_some_and(|b| !b.is_empty())
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
