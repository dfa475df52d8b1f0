//! Charm-style CLI prompts using cliclack
//!
//! Prompting only collects answers; everything after that goes through the
//! [`Generator`] facade.

use crate::config::Settings;
use crate::error::ScaffoldError;
use crate::generator::Generator;
use crate::product::ProductConfig;
use crate::project::{validate_project_name, Feature, FeatureFlags, ProjectAnswers, ProjectKind};
use crate::runtime::check;
use crate::templates::{version, StoreSource, TemplateStore};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name
    pub name: Option<String>,

    /// Project kind (`api` or `cli`)
    pub kind: Option<String>,

    /// Feature toggles given on the command line; `None` means ask
    pub features: Option<FeatureFlags>,

    /// Project directory to create (defaults to `./<name>`)
    pub directory: Option<PathBuf>,

    /// Write into an existing project directory
    pub force: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the init flow with interactive prompts
pub fn run<C: ProductConfig>(
    config: &C,
    args: CreateArgs,
    settings: Settings,
    cli_version: &str,
) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Load templates
    let store = load_store(&settings)?;

    if let Some(warning) =
        version::check_compatibility(cli_version, store.manifest(), config.upgrade_command())
    {
        cliclack::log::warning(warning)?;
    }

    // Step 2: Collect answers
    let name = select_name(&args)?;
    let kind = select_kind(&args)?;
    let features = select_features(kind, &args)?;
    let project_dir = resolve_directory(&args, &name);
    let force = confirm_destination(&project_dir, &args)?;

    // Step 3: Create project
    let answers = ProjectAnswers::new(name, kind.as_str(), features);
    let generator = Generator::new(&store, settings);
    create_project(&generator, &answers, &project_dir, force)?;

    // Step 4: Advisory toolchain check
    check_toolchains(kind, features, &args)?;

    // Step 5: Show next steps
    print_next_steps(config, &project_dir, kind, features)?;

    Ok(())
}

fn load_store(settings: &Settings) -> Result<TemplateStore> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");
    match TemplateStore::load(StoreSource::from_option(settings.template_dir.clone())) {
        Ok(store) => {
            spinner.stop(format!(
                "Loaded {} templates in {} categories",
                store.len(),
                store.list_categories().len()
            ));
            match store.source() {
                StoreSource::Directory(path) => {
                    cliclack::log::info(format!("Using local templates from {}", path.display()))?
                }
                _ => cliclack::log::info("Using bundled templates")?,
            }
            Ok(store)
        }
        Err(e) => {
            spinner.stop("Failed to load templates");
            Err(e.into())
        }
    }
}

fn select_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        validate_project_name(name)?;
        cliclack::log::info(format!("Project name: {}", name))?;
        return Ok(name.clone());
    }
    if args.yes {
        anyhow::bail!("A project name is required with --yes.");
    }

    let name: String = cliclack::input("Project name")
        .placeholder("my-project")
        .validate(|input: &String| {
            let name = input.trim();
            validate_project_name(name).map_err(|e| e.to_string())
        })
        .interact()?;
    Ok(name.trim().to_string())
}

fn select_kind(args: &CreateArgs) -> Result<ProjectKind> {
    if let Some(kind) = &args.kind {
        let kind: ProjectKind = kind.parse()?;
        cliclack::log::info(format!("Project type: {}", kind.display_name()))?;
        return Ok(kind);
    }
    if args.yes {
        return Ok(ProjectKind::Api);
    }

    let mut select = cliclack::select("What type of project do you want to create?");
    for kind in ProjectKind::ALL {
        select = select.item(kind, kind.display_name(), kind.as_str());
    }
    Ok(select.interact()?)
}

fn select_features(kind: ProjectKind, args: &CreateArgs) -> Result<FeatureFlags> {
    let defaults = FeatureFlags::defaults_for(kind);
    let features = match args.features {
        Some(features) => features.masked_for(kind),
        None if args.yes => defaults,
        None => {
            let mut features = FeatureFlags::none();
            for feature in kind.supported_features() {
                let include: bool =
                    cliclack::confirm(format!("Include {}?", feature.display_name()))
                        .initial_value(defaults.is_enabled(*feature))
                        .interact()?;
                features.set(*feature, include);
            }
            features
        }
    };

    let enabled: Vec<&str> = features
        .enabled()
        .iter()
        .map(Feature::display_name)
        .collect();
    if enabled.is_empty() {
        cliclack::log::success("Features: none")?;
    } else {
        cliclack::log::success(format!("Features: {}", enabled.join(", ")))?;
    }
    Ok(features)
}

fn resolve_directory(args: &CreateArgs, name: &str) -> PathBuf {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir.join(name),
    }
}

/// Decide whether an existing directory may be written into
fn confirm_destination(path: &Path, args: &CreateArgs) -> Result<bool> {
    if args.force || !path.exists() {
        return Ok(args.force);
    }
    if args.yes {
        let conflict = ScaffoldError::DestinationConflict(path.to_path_buf());
        return Err(conflict.into());
    }

    cliclack::log::warning(format!("Directory already exists: {}", path.display()))?;
    let confirm: bool = cliclack::confirm("Delete it and generate the project from scratch?")
        .initial_value(false)
        .interact()?;
    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }
    Ok(true)
}

fn create_project(
    generator: &Generator<'_>,
    answers: &ProjectAnswers,
    project_dir: &Path,
    force: bool,
) -> Result<()> {
    let plan = generator.generate(answers)?;
    let destination = Generator::prepare_destination(project_dir, force)?;
    Generator::clear_destination(project_dir, destination)?;

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    match generator.write_files(&plan, project_dir) {
        Ok(files) => {
            spinner.stop(format!(
                "Created {} files in {}",
                files.len(),
                project_dir.display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Project generation failed");
            Err(e.into())
        }
    }
}

fn check_toolchains(kind: ProjectKind, features: FeatureFlags, args: &CreateArgs) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking toolchains...");
    let results = check::check_toolchains(kind, features);

    let summary: Vec<String> = results
        .iter()
        .map(|r| match &r.version {
            Some(version) => format!("{} ({})", r.toolchain, version),
            None => format!("{} (not installed)", r.toolchain),
        })
        .collect();
    spinner.stop(format!("Toolchains: {}", summary.join(", ")));

    for missing in results.iter().filter(|r| !r.available) {
        let toolchain = missing.toolchain;
        cliclack::log::warning(format!(
            "{} is not installed; install it from {}",
            toolchain,
            toolchain.docs_url()
        ))?;

        if args.yes {
            continue;
        }
        let open_docs: bool =
            cliclack::confirm(format!("Open the {} installation guide?", toolchain))
                .initial_value(false)
                .interact()?;
        if open_docs {
            if let Err(e) = open::that(toolchain.docs_url()) {
                cliclack::log::error(format!("Could not open browser: {}", e))?;
            }
        }
    }
    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    kind: ProjectKind,
    features: FeatureFlags,
) -> Result<()> {
    let steps = config.next_steps(project_dir, kind, features);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Happy coding! Docs: {}", config.docs_url()))?;

    Ok(())
}
