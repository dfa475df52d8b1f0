//! End-to-end generation against the bundled template store

use sova_core::project::{build_context, dependencies, plan, ProjectMetadata};
use sova_core::{
    Feature, FeatureFlags, FileSpec, Generator, Materializer, ProjectAnswers, ProjectKind,
    ProjectManifest, ScaffoldError, Settings, TemplateStore,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn settings() -> Settings {
    Settings {
        year: Some(2024),
        ..Settings::default()
    }
}

fn generate(store: &TemplateStore, root: &Path, name: &str, kind: &str, flags: FeatureFlags) {
    let generator = Generator::new(store, settings());
    let answers = ProjectAnswers::new(name, kind, flags);
    generator.run(&answers, root, false).unwrap();
}

/// Relative path -> contents for every file under `root`
fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn test_cli_without_features() {
    let store = TemplateStore::bundled().unwrap();
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("demo");

    let manifest = plan(ProjectKind::Cli, FeatureFlags::none()).unwrap();
    for path in ["cmd/root.go", "main.go", "go.mod"] {
        assert!(manifest.contains_file(path), "manifest missing {path}");
    }

    generate(&store, &root, "demo", "cli", FeatureFlags::none());

    for path in ["cmd/root.go", "main.go", "go.mod"] {
        let contents = fs::read_to_string(root.join(path)).unwrap();
        assert!(!contents.trim().is_empty(), "{path} is empty");
    }
    let go_mod = fs::read_to_string(root.join("go.mod")).unwrap();
    assert!(go_mod.starts_with("module demo\n"));
    assert!(go_mod.contains("go 1.21"));
    assert!(go_mod.contains("github.com/spf13/cobra v1.8.0"));
    assert!(!go_mod.contains("go.uber.org/zap"));
    assert!(!root.join("internal/logger").exists());
    assert!(root.join("test").is_dir());

    let command1 = fs::read_to_string(root.join("cmd/command1.go")).unwrap();
    let command2 = fs::read_to_string(root.join("cmd/command2.go")).unwrap();
    assert!(command1.contains("var command1Cmd"));
    assert!(command2.contains("var command2Cmd"));
}

#[test]
fn test_api_service_initializer_follows_flags() {
    let store = TemplateStore::bundled().unwrap();
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("svc");
    let flags = FeatureFlags::none().with(Feature::Cache).with(Feature::Logger);

    generate(&store, &root, "svc", "api", flags);

    let services = fs::read_to_string(root.join("internal/service/service.go")).unwrap();
    assert_eq!(services.matches("cache.Connect(").count(), 1);
    assert!(!services.contains("database.Connect("));
    assert!(!services.contains("broker.Connect("));
    assert!(services.contains("logger.New()"));

    assert!(root.join("internal/cache/redis.go").is_file());
    assert!(root.join("internal/logger/logger.go").is_file());
    assert!(!root.join("internal/database").exists());
    assert!(!root.join("internal/broker").exists());

    let env = fs::read_to_string(root.join(".env")).unwrap();
    assert!(env.contains("REDIS_ADDR="));
    assert!(!env.contains("DATABASE_URL="));

    let compose = fs::read_to_string(root.join("docker-compose.yml")).unwrap();
    assert!(compose.contains("redis:"));
    assert!(!compose.contains("postgres:"));
}

#[test]
fn test_unknown_kind_creates_nothing() {
    let store = TemplateStore::bundled().unwrap();
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("demo");
    let generator = Generator::new(&store, settings());
    let answers = ProjectAnswers::new("demo", "web3", FeatureFlags::all());

    let err = generator.generate(&answers).unwrap_err();
    assert!(matches!(err, ScaffoldError::UnknownProjectKind(ref k) if k == "web3"));

    let err = generator.run(&answers, &root, true).unwrap_err();
    assert!(matches!(err, ScaffoldError::UnknownProjectKind(_)));
    assert!(!root.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_template_stops_between_files() {
    let store = TemplateStore::bundled().unwrap();
    let dir = TempDir::new().unwrap();
    let metadata = ProjectMetadata::new("demo").with_year(2024);
    let context = build_context(
        &metadata,
        ProjectKind::Cli,
        FeatureFlags::none(),
        &dependencies(ProjectKind::Cli, FeatureFlags::none()),
    );

    let mut builder = ProjectManifest::builder();
    builder
        .file("a/.gitignore", FileSpec::new("gitignore.tpl"))
        .unwrap()
        .file("m/missing.go", FileSpec::new("nonexistent.tpl"))
        .unwrap()
        .file("z/main.go", FileSpec::new("cli/main.tpl"))
        .unwrap();
    let manifest = builder.build();

    let materializer = Materializer::new(&store, context, dir.path());
    materializer.create_directories(&manifest).unwrap();
    let err = materializer.write_files(&manifest).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        ScaffoldError::TemplateNotFound(id) if id == "nonexistent.tpl"
    ));
    assert!(err.to_string().contains("missing.go"));
    assert!(dir.path().join("a/.gitignore").is_file());
    assert!(!dir.path().join("m/missing.go").exists());
    assert!(!dir.path().join("z/main.go").exists());
}

#[test]
fn test_every_flag_combination_renders() {
    let store = TemplateStore::bundled().unwrap();

    for kind in ProjectKind::ALL {
        for flags in FeatureFlags::combinations() {
            let dir = TempDir::new().unwrap();
            let root = dir.path().join("proj");
            generate(&store, &root, "proj", kind.as_str(), flags);

            let manifest = plan(kind, flags).unwrap();
            let files = snapshot(&root);
            let planned: Vec<&str> = manifest.files().map(|(p, _)| p).collect();
            let written: Vec<&str> = files.keys().map(String::as_str).collect();
            assert_eq!(planned, written, "{kind} {flags:?}");

            for (path, contents) in &files {
                assert!(!contents.is_empty(), "{kind} {flags:?}: {path} is empty");
                let text = String::from_utf8(contents.clone()).unwrap();
                assert!(
                    !text.contains("{{"),
                    "{kind} {flags:?}: {path} has unrendered markup"
                );
            }

            let go_mod = String::from_utf8(files["go.mod"].clone()).unwrap();
            let masked = flags.masked_for(kind);
            let requires = |module: &str| go_mod.contains(module);
            assert_eq!(
                requires("go.uber.org/zap"),
                masked.logger,
                "{kind} {flags:?}"
            );
            assert_eq!(requires("github.com/lib/pq"), masked.relational_store);
            assert_eq!(requires("github.com/redis/go-redis/v9"), masked.cache);
            assert_eq!(requires("github.com/rabbitmq/amqp091-go"), masked.broker);
        }
    }
}

#[test]
fn test_generation_is_byte_identical() {
    let store = TemplateStore::bundled().unwrap();
    let flags = FeatureFlags::all();

    for kind in ProjectKind::ALL {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let (first, second) = (first.path().join("app"), second.path().join("app"));
        generate(&store, &first, "app", kind.as_str(), flags);
        generate(&store, &second, "app", kind.as_str(), flags);

        assert_eq!(snapshot(&first), snapshot(&second));
    }
}

#[test]
fn test_regenerating_with_force_replaces_the_whole_tree() {
    let store = TemplateStore::bundled().unwrap();
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("svc");
    generate(&store, &root, "svc", "api", FeatureFlags::all());
    assert!(root.join("internal/cache/redis.go").is_file());
    fs::write(root.join("internal/models/user.go"), "package models\n").unwrap();

    let generator = Generator::new(&store, settings());
    let answers = ProjectAnswers::new("svc", "api", FeatureFlags::none());
    assert!(matches!(
        generator.run(&answers, &root, false),
        Err(ScaffoldError::DestinationConflict(_))
    ));
    assert!(root.join("internal/cache/redis.go").is_file());

    generator.run(&answers, &root, true).unwrap();

    assert!(!root.join("internal/cache").exists());
    assert!(!root.join("internal/models/user.go").exists());
    let services = fs::read_to_string(root.join("internal/service/service.go")).unwrap();
    assert!(!services.contains("cache.Connect("));

    let manifest = plan(ProjectKind::Api, FeatureFlags::none()).unwrap();
    let planned: Vec<&str> = manifest.files().map(|(p, _)| p).collect();
    let files = snapshot(&root);
    let written: Vec<&str> = files.keys().map(String::as_str).collect();
    assert_eq!(planned, written);
}

#[test]
fn test_custom_store_directory() {
    let templates = TempDir::new().unwrap();
    let write = |rel: &str, body: &str| {
        let path = templates.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    };
    // Override a cli template, keep everything else from a minimal store
    write("cli/main.tpl", "// custom main for {{ProjectName}}\n");
    write("cli/root.tpl", "package cmd\n");
    write("cli/command.tpl", "// {{CommandName}}\n");
    write("cli/utils.tpl", "package internal\n");
    write("cli/config.tpl", "package internal\n");
    write("cli/go-mod.tpl", "module {{ModuleName}}\n");
    write("cli/readme.tpl", "# {{ProjectName}}\n");
    write("shared/gitignore.tpl", "/bin/\n");

    let store = TemplateStore::from_dir(templates.path()).unwrap();
    let out = TempDir::new().unwrap();
    let root = out.path().join("tool");
    generate(&store, &root, "tool", "cli", FeatureFlags::none());

    assert_eq!(
        fs::read_to_string(root.join("main.go")).unwrap(),
        "// custom main for tool\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("cmd/command2.go")).unwrap(),
        "// command2\n"
    );
}
