//! Error taxonomy for template resolution, rendering, planning and materialization
//!
//! Every failure carries the path and/or template identifier it concerns so the
//! CLI layer can print a precise diagnostic without re-deriving context.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Errors produced by the scaffolding core
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The template store could not be opened or read
    #[error("template store unavailable at {}: {reason}", .path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    #[error("template category not found: {0}")]
    CategoryNotFound(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("syntax error in template {template}{}: {message}", position(.line, .column))]
    TemplateSyntax {
        template: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    /// A placeholder referenced a field missing from the render context
    #[error("undefined reference '{field}' in template {template}")]
    UndefinedReference { field: String, template: String },

    /// Any other rendering failure reported by the template engine
    #[error("failed to render template {template}: {message}")]
    Render { template: String, message: String },

    #[error("unknown project kind '{0}' (expected one of: api, cli)")]
    UnknownProjectKind(String),

    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    #[error("destination already exists: {} (use --force to overwrite)", .0.display())]
    DestinationConflict(PathBuf),

    /// `--force` pointed at the working directory or one of its ancestors
    #[error("refusing to replace {}: it contains the current directory", .0.display())]
    UnsafeOverwrite(PathBuf),

    /// Two manifest contributions claimed the same output path
    #[error("manifest path claimed twice: {path}")]
    ManifestConflict { path: String },

    #[error("manifest path must be relative and stay inside the project: {path}")]
    InvalidManifestPath { path: String },

    /// A single file failed during `write_files`; earlier files remain on disk
    #[error("failed to generate {} from template {template}", .path.display())]
    FileGeneration {
        path: PathBuf,
        template: String,
        #[source]
        source: Box<ScaffoldError>,
    },

    #[error("generation cancelled after {written} file(s)")]
    Cancelled { written: usize },

    #[error("{context} {}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse {}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn io(
        context: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }

    /// The innermost error, looking through `FileGeneration` wrappers
    pub fn root_cause(&self) -> &ScaffoldError {
        match self {
            Self::FileGeneration { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

fn position(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!(" at line {}, column {}", line, column),
        (Some(line), None) => format!(" at line {}", line),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_file_generation() {
        let missing = ScaffoldError::TemplateNotFound("nonexistent.tpl".to_string());
        let err = ScaffoldError::FileGeneration {
            path: PathBuf::from("demo/go.mod"),
            template: "nonexistent.tpl".to_string(),
            source: Box::new(missing),
        };

        assert!(matches!(
            err.root_cause(),
            ScaffoldError::TemplateNotFound(id) if id == "nonexistent.tpl"
        ));
        let message = err.to_string();
        assert!(message.contains("demo/go.mod"));
        assert!(message.contains("nonexistent.tpl"));
    }

    #[test]
    fn test_syntax_error_message_includes_position() {
        let err = ScaffoldError::TemplateSyntax {
            template: "api/env.tpl".to_string(),
            line: Some(3),
            column: Some(7),
            message: "unclosed expression".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "syntax error in template api/env.tpl at line 3, column 7: unclosed expression"
        );
    }
}
