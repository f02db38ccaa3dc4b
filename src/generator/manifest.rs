use std::collections::BTreeMap;

use tracing::warn;

/// Logical name to extension-less file path, ordered for byte-stable output.
pub type Manifest = BTreeMap<String, String>;

/// Accumulates the manifest across one generation pass.
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    entries: Manifest,
}

impl ManifestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one artifact. A repeated logical name keeps the latest path.
    pub fn record(&mut self, logical_name: &str, path: &str) {
        if let Some(previous) = self.entries.insert(logical_name.to_string(), path.to_string()) {
            warn!(logical_name, previous = %previous, path, "Manifest entry replaced");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Manifest {
        self.entries
    }
}
