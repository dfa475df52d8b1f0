//! Project structure planning
//!
//! Each [`ProjectKind`] owns one static [`KindTable`]: base directories and files,
//! per-feature increments, and the Go module requirements each piece pulls in.
//! Planning is a pure lookup over that table; adding a kind means adding a table.
//!
//! Files whose content depends on several features (the services initializer,
//! `go.mod`, `.env`) appear once in the base table and branch on the context
//! booleans inside the template.

use super::context::Dependency;
use super::kind::{Feature, FeatureFlags, ProjectAnswers, ProjectKind};
use super::manifest::{FileSpec, ProjectManifest};
use crate::error::Result;
use tracing::debug;

struct FileEntry {
    path: &'static str,
    template: &'static str,
    vars: &'static [(&'static str, &'static str)],
}

const fn file(path: &'static str, template: &'static str) -> FileEntry {
    FileEntry {
        path,
        template,
        vars: &[],
    }
}

struct FeatureEntry {
    feature: Feature,
    files: &'static [FileEntry],
    dependencies: &'static [Dependency],
}

struct KindTable {
    directories: &'static [&'static str],
    files: &'static [FileEntry],
    dependencies: &'static [Dependency],
    features: &'static [FeatureEntry],
}

const ZAP: Dependency = Dependency::new("go.uber.org/zap", "v1.27.0");

static API: KindTable = KindTable {
    directories: &[
        "cmd",
        "internal/handlers",
        "internal/middleware",
        "internal/models",
        "internal/server",
        "internal/service",
        "routes",
    ],
    files: &[
        file("cmd/main.go", "api/main.tpl"),
        file("routes/routes.go", "api/routes.tpl"),
        file("internal/server/server.go", "api/server.tpl"),
        file("internal/handlers/ping.go", "api/ping-handler.tpl"),
        file("internal/service/service.go", "api/service-init.tpl"),
        file(".env", "api/env.tpl"),
        file("docker-compose.yml", "api/docker-compose.tpl"),
        file("go.mod", "api/go-mod.tpl"),
        file("README.md", "api/readme.tpl"),
        file(".gitignore", "gitignore.tpl"),
    ],
    dependencies: &[
        Dependency::new("github.com/gin-gonic/gin", "v1.9.1"),
        Dependency::new("github.com/joho/godotenv", "v1.5.1"),
    ],
    features: &[
        FeatureEntry {
            feature: Feature::Logger,
            files: &[
                file("internal/logger/logger.go", "logger.tpl"),
                file(
                    "internal/middleware/logging.go",
                    "api/logging-middleware.tpl",
                ),
            ],
            dependencies: &[ZAP],
        },
        FeatureEntry {
            feature: Feature::RelationalStore,
            files: &[file("internal/database/postgres.go", "api/postgres.tpl")],
            dependencies: &[Dependency::new("github.com/lib/pq", "v1.10.9")],
        },
        FeatureEntry {
            feature: Feature::Cache,
            files: &[file("internal/cache/redis.go", "api/redis.tpl")],
            dependencies: &[Dependency::new("github.com/redis/go-redis/v9", "v9.5.1")],
        },
        FeatureEntry {
            feature: Feature::Broker,
            files: &[file("internal/broker/rabbitmq.go", "api/rabbitmq.tpl")],
            dependencies: &[Dependency::new("github.com/rabbitmq/amqp091-go", "v1.9.0")],
        },
    ],
};

static CLI: KindTable = KindTable {
    directories: &["cmd", "internal", "test"],
    files: &[
        file("main.go", "cli/main.tpl"),
        file("cmd/root.go", "cli/root.tpl"),
        FileEntry {
            path: "cmd/command1.go",
            template: "cli/command.tpl",
            vars: &[("CommandName", "command1")],
        },
        FileEntry {
            path: "cmd/command2.go",
            template: "cli/command.tpl",
            vars: &[("CommandName", "command2")],
        },
        file("internal/utils.go", "cli/utils.tpl"),
        file("internal/config.go", "cli/config.tpl"),
        file("go.mod", "cli/go-mod.tpl"),
        file("README.md", "cli/readme.tpl"),
        file(".gitignore", "gitignore.tpl"),
    ],
    dependencies: &[Dependency::new("github.com/spf13/cobra", "v1.8.0")],
    features: &[FeatureEntry {
        feature: Feature::Logger,
        files: &[file("internal/logger/logger.go", "logger.tpl")],
        dependencies: &[ZAP],
    }],
};

fn table(kind: ProjectKind) -> &'static KindTable {
    match kind {
        ProjectKind::Api => &API,
        ProjectKind::Cli => &CLI,
    }
}

fn enabled_features(
    table: &'static KindTable,
    flags: FeatureFlags,
) -> impl Iterator<Item = &'static FeatureEntry> {
    table
        .features
        .iter()
        .filter(move |entry| flags.is_enabled(entry.feature))
}

/// Plan the manifest for already-parsed inputs
///
/// Toggles the kind does not support are ignored.
pub fn plan(kind: ProjectKind, flags: FeatureFlags) -> Result<ProjectManifest> {
    let table = table(kind);
    let flags = flags.masked_for(kind);
    let mut builder = ProjectManifest::builder();

    for dir in table.directories {
        builder.dir(dir)?;
    }

    let feature_files = enabled_features(table, flags).flat_map(|entry| entry.files.iter());
    for entry in table.files.iter().chain(feature_files) {
        let spec = entry
            .vars
            .iter()
            .fold(FileSpec::new(entry.template), |spec, (key, value)| {
                spec.with_var(*key, *value)
            });
        builder.file(entry.path, spec)?;
    }

    let manifest = builder.build();
    debug!(
        kind = %kind,
        directories = manifest.dir_count(),
        files = manifest.file_count(),
        "planned project"
    );
    Ok(manifest)
}

/// Plan from the raw answers record; an unknown kind fails here
pub fn plan_answers(answers: &ProjectAnswers) -> Result<ProjectManifest> {
    plan(answers.project_kind()?, answers.features)
}

/// Go module requirements for a kind and feature set, sorted by module path
pub fn dependencies(kind: ProjectKind, flags: FeatureFlags) -> Vec<Dependency> {
    let table = table(kind);
    let flags = flags.masked_for(kind);
    let mut deps = table.dependencies.to_vec();
    for entry in enabled_features(table, flags) {
        deps.extend_from_slice(entry.dependencies);
    }
    deps.sort();
    deps.dedup();
    deps
}
