//! Toolchain detection for generated projects
//!
//! Checks are advisory: a missing toolchain is reported so the user can install
//! it, but generation never depends on it.

use crate::project::{FeatureFlags, ProjectKind};
use std::fmt;
use std::process::Command;

/// External tools a generated project needs at build or run time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    Go,
    Docker,
}

impl Toolchain {
    pub fn display_name(&self) -> &'static str {
        match self {
            Toolchain::Go => "Go",
            Toolchain::Docker => "Docker",
        }
    }

    fn binary(&self) -> &'static str {
        match self {
            Toolchain::Go => "go",
            Toolchain::Docker => "docker",
        }
    }

    fn version_args(&self) -> &'static [&'static str] {
        match self {
            Toolchain::Go => &["version"],
            Toolchain::Docker => &["--version"],
        }
    }

    /// Installation instructions
    pub fn docs_url(&self) -> &'static str {
        match self {
            Toolchain::Go => "https://go.dev/doc/install",
            Toolchain::Docker => "https://docs.docker.com/get-docker/",
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Toolchain detection result
#[derive(Debug, Clone)]
pub struct ToolchainInfo {
    pub toolchain: Toolchain,
    pub version: Option<String>,
    pub available: bool,
}

/// Check whether a toolchain is on PATH and report its version
pub fn check_toolchain(toolchain: Toolchain) -> ToolchainInfo {
    let output = Command::new(toolchain.binary())
        .args(toolchain.version_args())
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            ToolchainInfo {
                toolchain,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolchainInfo {
            toolchain,
            version: None,
            available: false,
        },
    }
}

/// Toolchains a project of `kind` with `features` needs
///
/// Docker is only needed when an api project runs a backing service from its
/// compose file.
pub fn required_toolchains(kind: ProjectKind, features: FeatureFlags) -> Vec<Toolchain> {
    let features = features.masked_for(kind);
    let mut required = vec![Toolchain::Go];
    let needs_services = features.relational_store || features.cache || features.broker;
    if kind == ProjectKind::Api && needs_services {
        required.push(Toolchain::Docker);
    }
    required
}

/// Check every toolchain the project needs
pub fn check_toolchains(kind: ProjectKind, features: FeatureFlags) -> Vec<ToolchainInfo> {
    required_toolchains(kind, features)
        .into_iter()
        .map(check_toolchain)
        .collect()
}
