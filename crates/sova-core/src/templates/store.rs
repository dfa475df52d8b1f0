//! Immutable, load-once template store
//!
//! A store groups template bodies under category keys (`api`, `cli`, `shared`).
//! It is loaded either from the bundled templates or from a directory supplied by
//! the caller, and is never mutated afterwards, so a single instance can be shared
//! (e.g. behind an `Arc`) by any number of concurrent generation runs.

use super::embedded;
use super::manifest::{StoreManifest, STORE_MANIFEST};
use crate::error::{Result, ScaffoldError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Where a store's contents come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    /// Templates compiled into the binary
    Bundled,
    /// A template root directory on disk
    Directory(PathBuf),
    /// Entries supplied programmatically
    InMemory,
}

impl StoreSource {
    /// Pick the directory source when a template dir is configured, else the bundle
    pub fn from_option(template_dir: Option<PathBuf>) -> Self {
        match template_dir {
            Some(path) => Self::Directory(path),
            None => Self::Bundled,
        }
    }

    fn display_path(&self) -> PathBuf {
        match self {
            Self::Bundled => PathBuf::from("<bundled>"),
            Self::Directory(path) => path.clone(),
            Self::InMemory => PathBuf::from("<memory>"),
        }
    }
}

/// Template bodies keyed by category, then by name within the category
#[derive(Debug, Clone)]
pub struct TemplateStore {
    source: StoreSource,
    manifest: StoreManifest,
    categories: BTreeMap<String, BTreeMap<String, String>>,
}

impl TemplateStore {
    /// Load a store from its backing source
    pub fn load(source: StoreSource) -> Result<Self> {
        match &source {
            StoreSource::Bundled => Self::bundled(),
            StoreSource::Directory(path) => Self::from_dir(path),
            StoreSource::InMemory => StoreBuilder::new(source.clone()).finish(),
        }
    }

    /// Load the templates compiled into the binary
    pub fn bundled() -> Result<Self> {
        let mut builder = StoreBuilder::new(StoreSource::Bundled);
        for (path, bytes) in embedded::bundled_files() {
            let body = String::from_utf8(bytes).map_err(|_| ScaffoldError::StoreUnavailable {
                path: PathBuf::from(&path),
                reason: "bundled template is not valid UTF-8".to_string(),
            })?;
            builder.add_file(&path, body)?;
        }
        builder.finish()
    }

    /// Load every category under `root`
    pub fn from_dir(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(ScaffoldError::StoreUnavailable {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let unavailable = |reason: String| ScaffoldError::StoreUnavailable {
            path: root.to_path_buf(),
            reason,
        };

        let mut builder = StoreBuilder::new(StoreSource::Directory(root.to_path_buf()));
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !entry.file_name().to_str().is_some_and(is_hidden));

        for entry in walker {
            let entry = entry.map_err(|e| unavailable(e.to_string()))?;
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| unavailable(e.to_string()))?;
            let key = relative_key(relative);

            if entry.file_type().is_dir() {
                if entry.depth() == 1 {
                    builder.add_category(&key);
                }
                continue;
            }

            let body = std::fs::read_to_string(entry.path())
                .map_err(|e| unavailable(format!("failed to read {}: {}", key, e)))?;
            builder.add_file(&key, body)?;
        }

        builder.finish()
    }

    /// Build a store from `category/name` keyed entries held in memory
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut builder = StoreBuilder::new(StoreSource::InMemory);
        for (key, body) in entries {
            builder.add_file(key.as_ref(), body.into())?;
        }
        builder.finish()
    }

    pub fn source(&self) -> &StoreSource {
        &self.source
    }

    pub fn manifest(&self) -> &StoreManifest {
        &self.manifest
    }

    /// Category names in lexicographic order (the resolver's fallback order)
    pub fn list_categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Template names inside one category, in lexicographic order
    pub fn list_templates(&self, category: &str) -> Result<Vec<&str>> {
        self.categories
            .get(category)
            .map(|templates| templates.keys().map(String::as_str).collect())
            .ok_or_else(|| ScaffoldError::CategoryNotFound(category.to_string()))
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Body of `name` inside `category`
    pub fn get(&self, category: &str, name: &str) -> Option<&str> {
        self.categories
            .get(category)
            .and_then(|templates| templates.get(name))
            .map(String::as_str)
    }

    /// Look up a category-qualified path such as `api/env.tpl`
    pub fn get_path(&self, path: &str) -> Option<(&str, &str, &str)> {
        let (category, name) = path.split_once('/')?;
        let (category_key, templates) = self.categories.get_key_value(category)?;
        let (name_key, body) = templates.get_key_value(name)?;
        Some((category_key.as_str(), name_key.as_str(), body.as_str()))
    }

    /// Description of a category, falling back to a generic label
    pub fn describe(&self, category: &str) -> Result<String> {
        if !self.has_category(category) {
            return Err(ScaffoldError::CategoryNotFound(category.to_string()));
        }
        Ok(self
            .manifest
            .description(category)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Custom template category: {}", category)))
    }

    /// Total number of templates across all categories
    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Accumulates files while a store is being loaded
struct StoreBuilder {
    source: StoreSource,
    manifest: Option<StoreManifest>,
    categories: BTreeMap<String, BTreeMap<String, String>>,
}

impl StoreBuilder {
    fn new(source: StoreSource) -> Self {
        Self {
            source,
            manifest: None,
            categories: BTreeMap::new(),
        }
    }

    fn add_category(&mut self, category: &str) {
        self.categories.entry(category.to_string()).or_default();
    }

    fn add_file(&mut self, key: &str, body: String) -> Result<()> {
        if key.split('/').any(is_hidden) {
            return Ok(());
        }

        match key.split_once('/') {
            Some((category, name)) if !category.is_empty() && !name.is_empty() => {
                self.categories
                    .entry(category.to_string())
                    .or_default()
                    .insert(name.to_string(), body);
            }
            None if key == STORE_MANIFEST => {
                let manifest =
                    serde_yaml::from_str(&body).map_err(|source| ScaffoldError::Yaml {
                        path: self.source.display_path().join(STORE_MANIFEST),
                        source,
                    })?;
                self.manifest = Some(manifest);
            }
            _ => debug!(file = key, "ignoring file outside any template category"),
        }
        Ok(())
    }

    fn finish(self) -> Result<TemplateStore> {
        let store = TemplateStore {
            source: self.source,
            manifest: self.manifest.unwrap_or_default(),
            categories: self.categories,
        };
        debug!(
            source = ?store.source,
            categories = store.categories.len(),
            templates = store.len(),
            "template store loaded"
        );
        Ok(store)
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Join path components with `/` regardless of platform separator
fn relative_key(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_bundled_store_has_expected_categories() {
        let store = TemplateStore::bundled().unwrap();
        assert_eq!(store.list_categories(), vec!["api", "cli", "shared"]);
        assert!(store.get("cli", "root.tpl").is_some());
        assert!(store.get("shared", "gitignore.tpl").is_some());
        assert!(store.manifest().version.is_some());
    }

    #[test]
    fn test_list_templates_unknown_category() {
        let store = TemplateStore::from_entries([("api/env.tpl", "PORT=8080")]).unwrap();
        let err = store.list_templates("web").unwrap_err();
        assert!(matches!(err, ScaffoldError::CategoryNotFound(c) if c == "web"));
    }

    #[test]
    fn test_listing_is_restartable_and_sorted() {
        let store = TemplateStore::from_entries([
            ("cli/main.tpl", "main"),
            ("api/main.tpl", "main"),
            ("api/env.tpl", "env"),
        ])
        .unwrap();

        let first = store.list_categories();
        let second = store.list_categories();
        assert_eq!(first, second);
        assert_eq!(first, vec!["api", "cli"]);
        assert_eq!(
            store.list_templates("api").unwrap(),
            vec!["env.tpl", "main.tpl"]
        );
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_from_dir_loads_categories_and_manifest() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "api/env.tpl", "PORT={{Port}}");
        write(dir.path(), "api/nested/deep.tpl", "deep");
        write(dir.path(), "cli/main.tpl", "package main");
        write(dir.path(), "api/.DS_Store", "junk");
        write(dir.path(), "README.md", "ignored");
        write(
            dir.path(),
            "template.yaml",
            "version: 0.3.0\ncategories:\n  api:\n    description: Web API\n",
        );
        fs::create_dir_all(dir.path().join("empty")).unwrap();

        let store = TemplateStore::from_dir(dir.path()).unwrap();
        assert_eq!(store.list_categories(), vec!["api", "cli", "empty"]);
        assert_eq!(
            store.list_templates("api").unwrap(),
            vec!["env.tpl", "nested/deep.tpl"]
        );
        assert!(store.list_templates("empty").unwrap().is_empty());
        assert_eq!(store.get_path("api/nested/deep.tpl").unwrap().2, "deep");
        assert_eq!(store.describe("api").unwrap(), "Web API");
        assert_eq!(
            store.describe("cli").unwrap(),
            "Custom template category: cli"
        );
        assert_eq!(store.manifest().version.as_deref(), Some("0.3.0"));
    }

    #[test]
    fn test_from_dir_missing_root_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = TemplateStore::load(StoreSource::Directory(missing.clone())).unwrap_err();
        assert!(matches!(err, ScaffoldError::StoreUnavailable { path, .. } if path == missing));
    }

    #[test]
    fn test_invalid_store_manifest_is_reported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "template.yaml", "categories: [not, a, map]");
        let err = TemplateStore::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::Yaml { .. }));
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateStore>();
    }
}
