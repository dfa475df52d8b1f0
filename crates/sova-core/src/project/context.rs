//! Project metadata and the render context derived from it

use super::kind::{Feature, FeatureFlags, ProjectKind};
use crate::templates::RenderContext;
use chrono::Datelike;
use serde_json::{json, Value};

pub const DEFAULT_AUTHOR: &str = "Sova";
pub const DEFAULT_LICENSE: &str = "MIT";
pub const DEFAULT_GO_VERSION: &str = "1.21";

/// Descriptive fields that end up in every generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub project_name: String,
    /// Go module path written to `go.mod`
    pub module_name: String,
    /// Overrides the per-kind default description when set
    pub description: Option<String>,
    pub go_version: String,
    pub author: String,
    pub license: String,
    pub year: i32,
}

impl ProjectMetadata {
    /// Metadata with built-in defaults and the current calendar year
    pub fn new(project_name: impl Into<String>) -> Self {
        let project_name = project_name.into();
        Self {
            module_name: project_name.clone(),
            project_name,
            description: None,
            go_version: DEFAULT_GO_VERSION.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            license: DEFAULT_LICENSE.to_string(),
            year: chrono::Local::now().year(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    pub fn description_for(&self, kind: ProjectKind) -> &str {
        self.description
            .as_deref()
            .unwrap_or_else(|| kind.default_description())
    }
}

/// A Go module requirement rendered into `go.mod`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Dependency {
    pub path: &'static str,
    pub version: &'static str,
}

impl Dependency {
    pub const fn new(path: &'static str, version: &'static str) -> Self {
        Self { path, version }
    }

    fn to_value(&self) -> Value {
        json!({ "Path": self.path, "Version": self.version })
    }
}

/// Build the render context for one run
///
/// `flags` must already be masked for `kind`; the context booleans mirror them
/// exactly so conditional template sections agree with the planned file set.
pub fn build_context(
    metadata: &ProjectMetadata,
    kind: ProjectKind,
    flags: FeatureFlags,
    dependencies: &[Dependency],
) -> RenderContext {
    let mut context = RenderContext::new();
    context
        .insert("ProjectName", metadata.project_name.as_str())
        .insert("ProjectDescription", metadata.description_for(kind))
        .insert("ModuleName", metadata.module_name.as_str())
        .insert("GoVersion", metadata.go_version.as_str())
        .insert("Author", metadata.author.as_str())
        .insert("License", metadata.license.as_str())
        .insert("Year", metadata.year)
        .insert("ProjectKind", kind.as_str())
        .insert(
            "Dependencies",
            Value::Array(dependencies.iter().map(Dependency::to_value).collect()),
        );

    for feature in Feature::ALL {
        context.insert(feature.context_key(), flags.is_enabled(feature));
    }
    context
}
