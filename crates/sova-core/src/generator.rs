//! Generation facade
//!
//! A run has two explicit phases:
//!
//! 1. [`Generator::generate`] turns the answers record into a [`ProjectPlan`]
//!    (manifest plus render context). Pure; an invalid name or unknown kind fails
//!    here, before anything touches the filesystem.
//! 2. [`Generator::write_files`] materializes a plan under a project root.
//!
//! In between, [`Generator::prepare_destination`] decides whether the root may be
//! used at all and [`Generator::clear_destination`] removes an existing root the
//! caller agreed to replace. [`Generator::run`] chains every step.

use crate::config::Settings;
use crate::error::{Result, ScaffoldError};
use crate::project::{
    build_context, dependencies, plan, validate_project_name, FeatureFlags, Materializer,
    ProjectAnswers, ProjectKind, ProjectManifest,
};
use crate::templates::{RenderContext, TemplateStore};
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Output of the planning phase
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPlan {
    pub project_name: String,
    pub kind: ProjectKind,
    /// Toggles after masking for `kind`
    pub features: FeatureFlags,
    pub manifest: ProjectManifest,
    pub context: RenderContext,
}

/// State of the project root before writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Fresh,
    /// The root exists and the caller agreed to replace it
    Overwrite,
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub kind: ProjectKind,
    pub features: FeatureFlags,
    pub destination: Destination,
    /// Paths relative to `root`, in write order
    pub files: Vec<String>,
}

pub struct Generator<'s> {
    store: &'s TemplateStore,
    settings: Settings,
}

impl<'s> Generator<'s> {
    pub fn new(store: &'s TemplateStore, settings: Settings) -> Self {
        Self { store, settings }
    }

    /// Plan a project from the answers record
    pub fn generate(&self, answers: &ProjectAnswers) -> Result<ProjectPlan> {
        validate_project_name(&answers.project_name)?;
        let kind = answers.project_kind()?;
        let features = answers.features.masked_for(kind);
        if features != answers.features {
            warn!(
                kind = %kind,
                "ignoring features not supported by this project kind"
            );
        }

        let manifest = plan(kind, features)?;
        let metadata = self.settings.metadata(&answers.project_name);
        let context = build_context(&metadata, kind, features, &dependencies(kind, features));

        info!(
            project = %answers.project_name,
            kind = %kind,
            files = manifest.file_count(),
            "project planned"
        );
        Ok(ProjectPlan {
            project_name: answers.project_name.clone(),
            kind,
            features,
            manifest,
            context,
        })
    }

    /// Refuse an existing root unless `force` is set; never mutates anything
    pub fn prepare_destination(root: &Path, force: bool) -> Result<Destination> {
        if !root.exists() {
            return Ok(Destination::Fresh);
        }
        if !force {
            return Err(ScaffoldError::DestinationConflict(root.to_path_buf()));
        }
        warn!(root = %root.display(), "existing directory will be replaced");
        Ok(Destination::Overwrite)
    }

    /// Remove an existing root before an overwrite; a no-op for a fresh one
    ///
    /// A root that is the working directory or one of its ancestors is refused
    /// with [`ScaffoldError::UnsafeOverwrite`] and left untouched.
    pub fn clear_destination(root: &Path, destination: Destination) -> Result<()> {
        if destination == Destination::Fresh {
            return Ok(());
        }
        ensure_replaceable(root)?;
        fs::remove_dir_all(root)
            .map_err(|e| ScaffoldError::io("failed to remove directory", root, e))?;
        info!(root = %root.display(), "existing directory removed");
        Ok(())
    }

    /// Create the plan's directories and write its files under `root`
    pub fn write_files(&self, plan: &ProjectPlan, root: &Path) -> Result<Vec<String>> {
        self.write_files_with(plan, root, |_| ControlFlow::Continue(()))
    }

    /// [`Generator::write_files`] with a per-file cancellation checkpoint
    pub fn write_files_with<F>(
        &self,
        plan: &ProjectPlan,
        root: &Path,
        checkpoint: F,
    ) -> Result<Vec<String>>
    where
        F: FnMut(&str) -> ControlFlow<()>,
    {
        let materializer = Materializer::new(self.store, plan.context.clone(), root);
        materializer.create_directories(&plan.manifest)?;
        materializer.write_files_with(&plan.manifest, checkpoint)
    }

    /// Plan, check the destination, then write
    pub fn run(
        &self,
        answers: &ProjectAnswers,
        root: &Path,
        force: bool,
    ) -> Result<GenerationReport> {
        let plan = self.generate(answers)?;
        let destination = Self::prepare_destination(root, force)?;
        Self::clear_destination(root, destination)?;
        let files = self.write_files(&plan, root)?;

        info!(root = %root.display(), files = files.len(), "project generated");
        Ok(GenerationReport {
            root: root.to_path_buf(),
            kind: plan.kind,
            features: plan.features,
            destination,
            files,
        })
    }
}

/// Refuse to delete a directory the process is running inside
fn ensure_replaceable(root: &Path) -> Result<()> {
    let target = root
        .canonicalize()
        .map_err(|e| ScaffoldError::io("failed to resolve directory", root, e))?;
    let cwd = std::env::current_dir()
        .map_err(|e| ScaffoldError::io("failed to read current directory", ".", e))?;
    let cwd = cwd.canonicalize().unwrap_or(cwd);

    if target.parent().is_none() || cwd.starts_with(&target) {
        return Err(ScaffoldError::UnsafeOverwrite(root.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Feature;
    use tempfile::TempDir;

    fn settings() -> Settings {
        Settings {
            year: Some(2024),
            ..Settings::default()
        }
    }

    #[test]
    fn test_generate_masks_unsupported_features() {
        let store = TemplateStore::bundled().unwrap();
        let generator = Generator::new(&store, settings());
        let answers = ProjectAnswers::new("tool", "cli", FeatureFlags::all());

        let plan = generator.generate(&answers).unwrap();
        assert_eq!(plan.features, FeatureFlags::none().with(Feature::Logger));
        assert_eq!(
            plan.context.get("UseCache"),
            Some(&serde_json::Value::Bool(false))
        );
        assert_eq!(
            plan.context.get("UseLogger"),
            Some(&serde_json::Value::Bool(true))
        );
    }

    #[test]
    fn test_unknown_kind_fails_before_any_mutation() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("demo");
        let store = TemplateStore::bundled().unwrap();
        let generator = Generator::new(&store, settings());
        let answers = ProjectAnswers::new("demo", "desktop", FeatureFlags::none());

        let err = generator.run(&answers, &root, false).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnknownProjectKind(_)));
        assert!(!root.exists());
    }

    #[test]
    fn test_existing_root_without_force_conflicts() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::bundled().unwrap();
        let generator = Generator::new(&store, settings());
        let answers = ProjectAnswers::new("demo", "api", FeatureFlags::none());

        let err = generator.run(&answers, dir.path(), false).unwrap_err();
        assert!(matches!(err, ScaffoldError::DestinationConflict(p) if p == dir.path()));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_force_replaces_existing_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("demo");
        std::fs::create_dir_all(root.join("old")).unwrap();
        std::fs::write(root.join("old/notes.txt"), "stale").unwrap();
        let store = TemplateStore::bundled().unwrap();
        let generator = Generator::new(&store, settings());
        let answers = ProjectAnswers::new("demo", "cli", FeatureFlags::none());

        let report = generator.run(&answers, &root, true).unwrap();
        assert_eq!(report.destination, Destination::Overwrite);
        assert!(root.join("cmd/root.go").is_file());
        assert!(!root.join("old").exists());
    }

    #[test]
    fn test_invalid_name_fails_before_any_mutation() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::bundled().unwrap();
        let generator = Generator::new(&store, settings());

        for name in ["", "../x"] {
            let answers = ProjectAnswers::new(name, "api", FeatureFlags::none());
            let err = generator.run(&answers, &dir.path().join("out"), true).unwrap_err();
            assert!(
                matches!(err, ScaffoldError::InvalidProjectName { .. }),
                "{name:?}"
            );
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_working_directory_is_never_replaced() {
        let cwd = std::env::current_dir().unwrap();
        let err = ensure_replaceable(&cwd).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnsafeOverwrite(_)));

        if let Some(parent) = cwd.parent() {
            assert!(matches!(
                ensure_replaceable(parent),
                Err(ScaffoldError::UnsafeOverwrite(_))
            ));
        }
        assert!(ensure_replaceable(Path::new(".")).is_err());
    }

    #[test]
    fn test_clear_fresh_destination_is_noop() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("keep.txt"), "keep").unwrap();
        Generator::clear_destination(dir.path(), Destination::Fresh).unwrap();
        assert!(dir.path().join("keep.txt").is_file());
    }

    #[test]
    fn test_prepare_destination_fresh() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("new");
        assert_eq!(
            Generator::prepare_destination(&root, false).unwrap(),
            Destination::Fresh
        );
        assert!(!root.exists());
    }
}
