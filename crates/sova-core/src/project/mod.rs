//! Project planning and materialization
//!
//! - [`kind`]: project kinds, feature toggles and the answers record
//! - [`planner`]: the per-kind tables that produce a [`ProjectManifest`]
//! - [`context`]: metadata and the render context for a run
//! - [`materializer`]: writes a manifest to disk

pub mod context;
pub mod kind;
pub mod manifest;
pub mod materializer;
pub mod planner;

pub use context::{build_context, Dependency, ProjectMetadata};
pub use kind::{validate_project_name, Feature, FeatureFlags, ProjectAnswers, ProjectKind};
pub use manifest::{FileSpec, ManifestBuilder, ProjectManifest};
pub use materializer::Materializer;
pub use planner::{dependencies, plan, plan_answers};
