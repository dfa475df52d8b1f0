//! Turn a planned manifest into files on disk
//!
//! Writes are unconditional: whether the project root may be touched at all is
//! decided by the caller before a materializer is built. Each file is rendered in
//! full before anything is written for it, and the first failure stops the run.
//! Files written before the failure stay on disk.

use super::manifest::{FileSpec, ProjectManifest};
use crate::error::{Result, ScaffoldError};
use crate::templates::{RenderContext, TemplateRenderer, TemplateResolver, TemplateStore};
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct Materializer<'s> {
    resolver: TemplateResolver<'s>,
    renderer: TemplateRenderer,
    context: RenderContext,
    root: PathBuf,
}

impl<'s> Materializer<'s> {
    pub fn new(
        store: &'s TemplateStore,
        context: RenderContext,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resolver: TemplateResolver::new(store),
            renderer: TemplateRenderer::new(),
            context,
            root: root.into(),
        }
    }

    /// Create the root and every manifest directory; existing ones are left alone
    pub fn create_directories(&self, manifest: &ProjectManifest) -> Result<usize> {
        fs::create_dir_all(&self.root)
            .map_err(|e| ScaffoldError::io("failed to create directory", &self.root, e))?;

        let mut created = 0;
        for dir in manifest.directories() {
            let path = self.root.join(dir);
            fs::create_dir_all(&path)
                .map_err(|e| ScaffoldError::io("failed to create directory", &path, e))?;
            debug!(dir, "directory ready");
            created += 1;
        }
        info!(count = created, root = %self.root.display(), "directories created");
        Ok(created)
    }

    /// Render and write every file; returns the written paths in manifest order
    pub fn write_files(&self, manifest: &ProjectManifest) -> Result<Vec<String>> {
        self.write_files_with(manifest, |_| ControlFlow::Continue(()))
    }

    /// Like [`Materializer::write_files`], consulting `checkpoint` before each file
    ///
    /// A `Break` from the checkpoint stops with [`ScaffoldError::Cancelled`].
    pub fn write_files_with<F>(
        &self,
        manifest: &ProjectManifest,
        mut checkpoint: F,
    ) -> Result<Vec<String>>
    where
        F: FnMut(&str) -> ControlFlow<()>,
    {
        let mut written = Vec::with_capacity(manifest.file_count());

        for (path, spec) in manifest.files() {
            if checkpoint(path).is_break() {
                info!(written = written.len(), "generation cancelled");
                return Err(ScaffoldError::Cancelled {
                    written: written.len(),
                });
            }

            let target = self.root.join(path);
            self.write_one(&target, spec).map_err(|source| ScaffoldError::FileGeneration {
                path: target.clone(),
                template: spec.template.clone(),
                source: Box::new(source),
            })?;
            debug!(file = path, template = %spec.template, "file written");
            written.push(path.to_string());
        }

        info!(count = written.len(), root = %self.root.display(), "files written");
        Ok(written)
    }

    /// Both phases in order
    pub fn materialize(&self, manifest: &ProjectManifest) -> Result<Vec<String>> {
        self.create_directories(manifest)?;
        self.write_files(manifest)
    }

    /// Render a single file without touching the filesystem
    pub fn render_file(&self, spec: &FileSpec) -> Result<String> {
        let template = self.resolver.resolve(&spec.template)?;
        let context = self.context.overlay(&spec.vars);
        self.renderer.render(&template, &context)
    }

    fn write_one(&self, target: &Path, spec: &FileSpec) -> Result<()> {
        let content = self.render_file(spec)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ScaffoldError::io("failed to create directory", parent, e))?;
        }
        fs::write(target, content).map_err(|e| ScaffoldError::io("failed to write file", target, e))
    }
}
