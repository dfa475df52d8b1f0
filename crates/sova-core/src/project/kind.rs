//! Project kinds, feature toggles, and the answers record collected up front

use crate::error::ScaffoldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Style of project skeleton to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Api,
    Cli,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 2] = [ProjectKind::Api, ProjectKind::Cli];

    /// Identifier used on the command line and as the template category
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Api => "api",
            ProjectKind::Cli => "cli",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectKind::Api => "API service",
            ProjectKind::Cli => "CLI application",
        }
    }

    /// Default `ProjectDescription` for generated READMEs
    pub fn default_description(&self) -> &'static str {
        match self {
            ProjectKind::Api => "A Go API service built with Gin",
            ProjectKind::Cli => "A CLI application built with Go and Cobra",
        }
    }

    /// Features this kind knows how to generate
    pub fn supported_features(&self) -> &'static [Feature] {
        match self {
            ProjectKind::Api => &Feature::ALL,
            ProjectKind::Cli => &[Feature::Logger],
        }
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.supported_features().contains(&feature)
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "api" => Ok(ProjectKind::Api),
            "cli" => Ok(ProjectKind::Cli),
            _ => Err(ScaffoldError::UnknownProjectKind(s.to_string())),
        }
    }
}

/// Optional integrations a generated project can include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Logger,
    RelationalStore,
    Cache,
    Broker,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Logger,
        Feature::RelationalStore,
        Feature::Cache,
        Feature::Broker,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Feature::Logger => "Zap structured logging",
            Feature::RelationalStore => "PostgreSQL database",
            Feature::Cache => "Redis cache",
            Feature::Broker => "RabbitMQ message broker",
        }
    }

    /// Name of the boolean render-context field driven by this feature
    pub fn context_key(&self) -> &'static str {
        match self {
            Feature::Logger => "UseLogger",
            Feature::RelationalStore => "UseRelationalStore",
            Feature::Cache => "UseCache",
            Feature::Broker => "UseBroker",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Per-feature toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default)]
    pub logger: bool,
    #[serde(default)]
    pub relational_store: bool,
    #[serde(default)]
    pub cache: bool,
    #[serde(default)]
    pub broker: bool,
}

impl FeatureFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            logger: true,
            relational_store: true,
            cache: true,
            broker: true,
        }
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Logger => self.logger,
            Feature::RelationalStore => self.relational_store,
            Feature::Cache => self.cache,
            Feature::Broker => self.broker,
        }
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        match feature {
            Feature::Logger => self.logger = enabled,
            Feature::RelationalStore => self.relational_store = enabled,
            Feature::Cache => self.cache = enabled,
            Feature::Broker => self.broker = enabled,
        }
    }

    pub fn with(mut self, feature: Feature) -> Self {
        self.set(feature, true);
        self
    }

    /// Enabled features in declaration order
    pub fn enabled(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| self.is_enabled(*f))
            .collect()
    }

    /// Answers assumed when nothing is asked: structured logging and a database
    /// for services, nothing for CLIs
    pub fn defaults_for(kind: ProjectKind) -> Self {
        match kind {
            ProjectKind::Api => Self::none()
                .with(Feature::Logger)
                .with(Feature::RelationalStore),
            ProjectKind::Cli => Self::none(),
        }
    }

    /// Drop toggles the kind cannot generate
    pub fn masked_for(&self, kind: ProjectKind) -> Self {
        let mut masked = Self::none();
        for feature in self.enabled() {
            if kind.supports(feature) {
                masked.set(feature, true);
            }
        }
        masked
    }

    /// Every combination of the four toggles
    pub fn combinations() -> Vec<FeatureFlags> {
        (0u8..16)
            .map(|bits| FeatureFlags {
                logger: bits & 1 != 0,
                relational_store: bits & 2 != 0,
                cache: bits & 4 != 0,
                broker: bits & 8 != 0,
            })
            .collect()
    }
}

/// Flat record produced by the question/answer step
///
/// `kind` stays a string so that an unknown kind surfaces as
/// [`ScaffoldError::UnknownProjectKind`] from the generator, before any
/// filesystem mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAnswers {
    pub project_name: String,
    pub kind: String,
    #[serde(default)]
    pub features: FeatureFlags,
}

impl ProjectAnswers {
    pub fn new(
        project_name: impl Into<String>,
        kind: impl Into<String>,
        features: FeatureFlags,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            kind: kind.into(),
            features,
        }
    }

    pub fn project_kind(&self) -> Result<ProjectKind, ScaffoldError> {
        self.kind.parse()
    }
}

/// Check a project name before it is used as a directory and module name
///
/// The name must be a single path segment: non-empty, no separators, no `..`.
pub fn validate_project_name(name: &str) -> Result<(), ScaffoldError> {
    let reason = if name.trim().is_empty() {
        "name cannot be empty"
    } else if name != name.trim() {
        "name cannot start or end with whitespace"
    } else if name.contains(['/', '\\']) {
        "name cannot contain path separators"
    } else if name == "." || name.contains("..") {
        "name cannot be '.' or contain '..'"
    } else {
        return Ok(());
    };
    Err(ScaffoldError::InvalidProjectName {
        name: name.to_string(),
        reason,
    })
}
