//! Planned output of a generation run
//!
//! A [`ProjectManifest`] is the set of directories to create plus a mapping from
//! output file path (relative to the project root, `/`-separated) to the template
//! that produces it. Both collections are ordered, so iterating a manifest is
//! deterministic.

use crate::error::{Result, ScaffoldError};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path};

/// How to produce one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    /// Template identifier, bare (`gitignore.tpl`) or qualified (`api/env.tpl`)
    pub template: String,
    /// Fields laid over the run's render context for this file only
    pub vars: BTreeMap<String, Value>,
}

impl FileSpec {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            vars: BTreeMap::new(),
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectManifest {
    directories: BTreeSet<String>,
    files: BTreeMap<String, FileSpec>,
}

impl ProjectManifest {
    pub fn builder() -> ManifestBuilder {
        ManifestBuilder::default()
    }

    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.directories.iter().map(String::as_str)
    }

    /// Output files in path order
    pub fn files(&self) -> impl Iterator<Item = (&str, &FileSpec)> {
        self.files.iter().map(|(path, spec)| (path.as_str(), spec))
    }

    pub fn file(&self, path: &str) -> Option<&FileSpec> {
        self.files.get(path)
    }

    pub fn contains_file(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn contains_dir(&self, path: &str) -> bool {
        self.directories.contains(path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn dir_count(&self) -> usize {
        self.directories.len()
    }
}

/// Collects directory and file entries, rejecting duplicates and unsafe paths
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    manifest: ProjectManifest,
}

impl ManifestBuilder {
    /// Add a directory and all of its ancestors
    pub fn dir(&mut self, path: &str) -> Result<&mut Self> {
        validate_path(path)?;
        self.insert_with_ancestors(path);
        Ok(self)
    }

    /// Add a file; a second entry for the same path is a [`ScaffoldError::ManifestConflict`]
    pub fn file(&mut self, path: &str, spec: FileSpec) -> Result<&mut Self> {
        validate_path(path)?;
        if self.manifest.files.contains_key(path) {
            return Err(ScaffoldError::ManifestConflict {
                path: path.to_string(),
            });
        }
        if let Some((parent, _)) = path.rsplit_once('/') {
            self.insert_with_ancestors(parent);
        }
        self.manifest.files.insert(path.to_string(), spec);
        Ok(self)
    }

    pub fn build(self) -> ProjectManifest {
        self.manifest
    }

    fn insert_with_ancestors(&mut self, path: &str) {
        let mut current = String::new();
        for segment in path.split('/') {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);
            self.manifest.directories.insert(current.clone());
        }
    }
}

/// Manifest paths must be relative, `/`-separated, and stay inside the root
fn validate_path(path: &str) -> Result<()> {
    let invalid = || ScaffoldError::InvalidManifestPath {
        path: path.to_string(),
    };

    if path.is_empty() || path.starts_with('/') || path.ends_with('/') || path.contains('\\') {
        return Err(invalid());
    }
    let all_normal = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    // components() drops an inner `.`, so check the raw segments too
    if !all_normal || path.split('/').any(|segment| segment.is_empty() || segment == ".") {
        return Err(invalid());
    }
    Ok(())
}
