//! User settings loaded from a YAML file
//!
//! Lookup order for the file: an explicit path (which must exist), then
//! `<home>/<config file name>` when present, else built-in defaults. The template
//! directory can additionally be overridden from the environment and by a flag.

use crate::error::{Result, ScaffoldError};
use crate::project::context::{
    ProjectMetadata, DEFAULT_AUTHOR, DEFAULT_GO_VERSION, DEFAULT_LICENSE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub author: String,
    pub license: String,
    pub go_version: String,
    /// Replaces the per-kind README description
    pub description: Option<String>,
    /// Frozen copyright year; the current year is used when absent
    pub year: Option<i32>,
    /// Template root to load instead of the bundled templates
    pub template_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            license: DEFAULT_LICENSE.to_string(),
            go_version: DEFAULT_GO_VERSION.to_string(),
            description: None,
            year: None,
            template_dir: None,
        }
    }
}

impl Settings {
    /// Resolve the settings file and load it
    pub fn load(explicit: Option<&Path>, file_name: &str) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ScaffoldError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        match default_path(file_name) {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!(file_name, "no settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ScaffoldError::io("failed to read config file", path, e))?;
        let settings = Self::from_yaml(&contents).map_err(|source| ScaffoldError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    fn from_yaml(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Let `env_var` override the template directory
    ///
    /// `lookup` is normally `std::env::var(..).ok()`; empty values are ignored.
    pub fn apply_env<F>(&mut self, env_var: &str, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(env_var).filter(|v| !v.trim().is_empty()) {
            debug!(env_var, dir = %dir, "template directory from environment");
            self.template_dir = Some(PathBuf::from(dir));
        }
    }

    /// Flag override, strongest of all sources
    pub fn with_template_dir(mut self, template_dir: Option<PathBuf>) -> Self {
        if template_dir.is_some() {
            self.template_dir = template_dir;
        }
        self
    }

    /// Metadata for a new project, with the year frozen for the whole run
    pub fn metadata(&self, project_name: &str) -> ProjectMetadata {
        let mut metadata = ProjectMetadata::new(project_name);
        metadata.author = self.author.clone();
        metadata.license = self.license.clone();
        metadata.go_version = self.go_version.clone();
        metadata.description = self.description.clone();
        if let Some(year) = self.year {
            metadata = metadata.with_year(year);
        }
        metadata
    }
}

fn default_path(file_name: &str) -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(file_name))
}
