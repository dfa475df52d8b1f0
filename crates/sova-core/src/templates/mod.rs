//! Template storage, resolution, and rendering
//!
//! This module provides:
//! - The immutable template store (bundled or loaded from a directory)
//! - Identifier resolution with a fixed category fallback order
//! - Strict Handlebars rendering against a flat render context
//! - Store version compatibility checking

mod embedded;
mod helpers;

pub mod context;
pub mod manifest;
pub mod renderer;
pub mod resolver;
pub mod store;
pub mod version;

pub use context::RenderContext;
pub use manifest::{CategoryInfo, StoreManifest, STORE_MANIFEST};
pub use renderer::TemplateRenderer;
pub use resolver::{ResolvedTemplate, TemplateResolver};
pub use store::{StoreSource, TemplateStore};
pub use version::{check_compatibility, Compatibility};
