//! Product configuration trait for CLI binaries
//!
//! The core never hard-codes product identity; the binary supplies it through
//! this trait.

use crate::project::{FeatureFlags, ProjectKind};
use std::path::Path;

/// Configuration trait for a scaffolding CLI product
///
/// Implementations define:
/// - Product identity (name, display name)
/// - Where user settings and template overrides come from
/// - Documentation links
/// - Post-generation instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Settings file name looked up in the home directory
    fn config_file_name(&self) -> &'static str;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, kind: ProjectKind, features: FeatureFlags) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;
}
