//! Sova CLI - Project scaffolding for Go API services and CLI applications

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use sova_core::project::validate_project_name;
use sova_core::runtime::check_toolchains;
use sova_core::templates::check_compatibility;
use sova_core::tui::CreateArgs;
use sova_core::{
    FeatureFlags, Generator, ProductConfig, ProjectAnswers, ProjectKind, Settings, StoreSource,
    TemplateStore,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sova product configuration
#[derive(Clone)]
pub struct SovaConfig;

impl ProductConfig for SovaConfig {
    fn name(&self) -> &'static str {
        "sova"
    }

    fn display_name(&self) -> &'static str {
        "Sova"
    }

    fn config_file_name(&self) -> &'static str {
        ".sova.yaml"
    }

    fn template_dir_env(&self) -> &'static str {
        "SOVA_TEMPLATE_DIR"
    }

    fn docs_url(&self) -> &'static str {
        "https://go.dev/doc/"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding Go API services and CLI applications"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install sova --force"
    }

    fn next_steps(&self, dir: &Path, kind: ProjectKind, features: FeatureFlags) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Start backing services
        let features = features.masked_for(kind);
        if kind == ProjectKind::Api
            && (features.relational_store || features.cache || features.broker)
        {
            steps.push("docker compose up -d".to_string());
        }

        // Step 3: Resolve Go modules
        steps.push("go mod tidy".to_string());

        // Step 4: Run it
        match kind {
            ProjectKind::Api => {
                steps.push("go run ./cmd".to_string());
                steps.push("curl http://localhost:8080/api/ping".to_string());
            }
            ProjectKind::Cli => steps.push("go run . --help".to_string()),
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Settings file to use instead of ~/.sova.yaml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Go project
    Init(InitArgs),
    /// List template categories, or the templates in one category
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project name (also the Go module name)
    pub name: Option<String>,

    /// Project type: api or cli
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Include Zap structured logging
    #[arg(long)]
    pub logger: bool,

    /// Include a PostgreSQL database connection (api only)
    #[arg(long)]
    pub database: bool,

    /// Include a Redis cache client (api only)
    #[arg(long)]
    pub cache: bool,

    /// Include a RabbitMQ connection (api only)
    #[arg(long)]
    pub broker: bool,

    /// Project directory to create (defaults to ./<name>)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the bundled ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Write into the project directory even if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl InitArgs {
    /// Feature toggles, or `None` when no feature flag was given
    fn features(&self) -> Option<FeatureFlags> {
        if !(self.logger || self.database || self.cache || self.broker) {
            return None;
        }
        Some(FeatureFlags {
            logger: self.logger,
            relational_store: self.database,
            cache: self.cache,
            broker: self.broker,
        })
    }
}

impl From<InitArgs> for CreateArgs {
    fn from(args: InitArgs) -> Self {
        CreateArgs {
            features: args.features(),
            name: args.name,
            kind: args.kind,
            directory: args.directory,
            force: args.force,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Category to list templates for
    pub category: Option<String>,

    /// Local directory to use for templates instead of the bundled ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

/// Clap command named and described by the product configuration
fn build_command<C: ProductConfig>(config: &C) -> clap::Command {
    Args::command()
        .name(config.name())
        .bin_name(config.name())
        .about(config.cli_description())
}

fn parse_args<C: ProductConfig>(config: &C) -> Args {
    let matches = build_command(config).get_matches();
    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose { "warn,sova_core=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings<C: ProductConfig>(
    config: &C,
    config_path: Option<&Path>,
    template_dir: Option<PathBuf>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_path, config.config_file_name())
        .context("Failed to load settings")?;
    settings.apply_env(config.template_dir_env(), |key| std::env::var(key).ok());
    let settings = settings.with_template_dir(template_dir);
    tracing::debug!(?settings, "settings resolved");
    Ok(settings)
}

fn load_store(settings: &Settings) -> Result<TemplateStore> {
    let source = StoreSource::from_option(settings.template_dir.clone());
    Ok(TemplateStore::load(source)?)
}

/// `init --yes`: no prompts, plain colored output
fn run_unattended<C: ProductConfig>(config: &C, args: InitArgs, settings: Settings) -> Result<()> {
    let name = args
        .name
        .clone()
        .context("A project name is required with --yes")?;
    validate_project_name(&name)?;
    let kind: ProjectKind = args.kind.as_deref().unwrap_or("api").parse()?;
    let features = args
        .features()
        .unwrap_or_else(|| FeatureFlags::defaults_for(kind));

    let store = load_store(&settings)?;
    if let Some(warning) =
        check_compatibility(CLI_VERSION, store.manifest(), config.upgrade_command())
    {
        eprintln!("{}", warning.yellow());
    }

    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    let root = match &args.directory {
        Some(dir) => current_dir.join(dir),
        None => current_dir.join(&name),
    };

    let answers = ProjectAnswers::new(name, kind.as_str(), features);
    let generator = Generator::new(&store, settings);
    let report = generator.run(&answers, &root, args.force)?;

    println!(
        "{} Created {} {} with {} files in {}",
        "✔".green(),
        report.kind.display_name(),
        answers.project_name.bold(),
        report.files.len(),
        report.root.display()
    );

    for info in check_toolchains(report.kind, report.features) {
        match &info.version {
            Some(version) => println!("{} {}", "✔".green(), version.dimmed()),
            None => println!(
                "{} {} is not installed; install it from {}",
                "!".yellow(),
                info.toolchain,
                info.toolchain.docs_url().cyan()
            ),
        }
    }

    println!();
    println!("  {}", "Next steps".bold());
    println!();
    for (i, step) in config
        .next_steps(&report.root, report.kind, report.features)
        .iter()
        .enumerate()
    {
        println!("  {}.  {}", i + 1, step);
    }
    println!();

    Ok(())
}

fn run_list(args: ListArgs, settings: Settings) -> Result<()> {
    let store = load_store(&settings)?;

    match args.category {
        Some(category) => {
            let templates = store.list_templates(&category)?;
            println!(
                "{}  {}",
                category.cyan().bold(),
                store.describe(&category)?.dimmed()
            );
            for template in templates {
                println!("  - {}/{}", category, template);
            }
        }
        None => {
            for category in store.list_categories() {
                let count = store.list_templates(category)?.len();
                println!(
                    "{:<10} {} {}",
                    category.cyan().bold(),
                    store.describe(category)?,
                    format!("({} templates)", count).dimmed()
                );
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = SovaConfig;
    let args = parse_args(&config);
    init_tracing(args.verbose);

    match args.command {
        Some(Command::Init(init_args)) => {
            let settings = load_settings(
                &config,
                args.config.as_deref(),
                init_args.template_dir.clone(),
            )?;
            if init_args.yes {
                return run_unattended(&config, init_args, settings);
            }

            let result = sova_core::run(&config, init_args.into(), settings, CLI_VERSION);

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::List(list_args)) => {
            let settings = load_settings(
                &config,
                args.config.as_deref(),
                list_args.template_dir.clone(),
            )?;
            run_list(list_args, settings)
        }
        None => {
            // No subcommand provided, default to init behavior (interactive mode)
            let settings = load_settings(&config, args.config.as_deref(), None)?;
            let result = sova_core::run(&config, CreateArgs::default(), settings, CLI_VERSION);

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
