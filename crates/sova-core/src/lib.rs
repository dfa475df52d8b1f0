//! Sova Core - template-driven scaffolding for Go projects
//!
//! Generates Go API services and CLI applications from a store of Handlebars
//! templates. The library is used by the `sova` binary but has no terminal
//! dependencies outside the optional `tui` module.
//!
//! # Architecture
//!
//! - **Templates** - an immutable [`TemplateStore`] (bundled or loaded from a
//!   directory), a [`TemplateResolver`] with a fixed category fallback order, and
//!   a strict [`TemplateRenderer`]
//! - **Project** - per-kind planner tables producing a [`ProjectManifest`], and
//!   the [`Materializer`] that writes it to disk
//! - **Generator** - the [`Generator`] facade running plan, destination check and
//!   write as explicit phases
//! - **TUI** - optional cliclack prompts that collect a [`ProjectAnswers`] record
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt flow
//!
//! # Example Usage (without TUI)
//!
//! ```no_run
//! use sova_core::{FeatureFlags, Generator, ProjectAnswers, Settings, TemplateStore};
//! use std::path::Path;
//!
//! let store = TemplateStore::bundled()?;
//! let generator = Generator::new(&store, Settings::default());
//! let answers = ProjectAnswers::new("orders", "api", FeatureFlags::all());
//!
//! let plan = generator.generate(&answers)?;
//! Generator::prepare_destination(Path::new("orders"), false)?;
//! generator.write_files(&plan, Path::new("orders"))?;
//! # Ok::<(), sova_core::ScaffoldError>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod product;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::Settings;
pub use error::{Result, ScaffoldError};
pub use generator::{Destination, GenerationReport, Generator, ProjectPlan};
pub use product::ProductConfig;
pub use project::{
    Feature, FeatureFlags, FileSpec, Materializer, ProjectAnswers, ProjectKind, ProjectManifest,
};
pub use runtime::{Toolchain, ToolchainInfo};
pub use templates::{RenderContext, StoreSource, TemplateRenderer, TemplateResolver, TemplateStore};

#[cfg(feature = "tui")]
pub use tui::run;
