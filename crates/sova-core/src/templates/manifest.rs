//! Store manifest types and parsing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File name of the optional manifest at the root of a template store
pub const STORE_MANIFEST: &str = "template.yaml";

/// Metadata about a single template category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Human-readable description shown by `sova list`
    #[serde(default)]
    pub description: Option<String>,
}

/// Root store manifest (templates/template.yaml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreManifest {
    /// Semver version of the template set, compared against the CLI version
    #[serde(default)]
    pub version: Option<String>,

    /// Per-category metadata, keyed by category directory name
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryInfo>,
}

impl StoreManifest {
    /// Description for a category, if the manifest declares one
    pub fn description(&self, category: &str) -> Option<&str> {
        self.categories
            .get(category)
            .and_then(|info| info.description.as_deref())
    }
}
