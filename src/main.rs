//! Specs Runner - Scala specs BDD runner
//!
//! A CLI tool that discovers `*Spec*.scala` files under `src/spec/scala`,
//! runs each one in its own JVM and reports which passed.
//!
//! ## Usage
//!
//! ```bash
//! # Run all specs of the project in the current directory
//! specs-runner run --classpath lib/specs-1.3.1.jar --classpath target/classes
//!
//! # Pass system properties and JVM arguments
//! specs-runner run -D env=ci --java-arg -Xmx1g --no-stacktrace
//!
//! # Run four JVMs at a time
//! specs-runner run --parallel --concurrent 4
//!
//! # List discovered specs
//! specs-runner list --project ../app
//!
//! # Check whether the project has specs
//! specs-runner probe
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use specs_runner::config::{self, AppConfig, EnvConfig};
use specs_runner::discovery;
use specs_runner::framework::{specs, FrameworkFactory, FrameworkRegistry, TestFramework};
use specs_runner::models::{DependencyContext, Project};
use specs_runner::output::{write_report_to_file, OutputFormat, ResultFormatter};
use specs_runner::utils::{init_logger, LogLevel};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let verbose = args.verbose || env.verbose.unwrap_or(false);
    init_logger(if verbose { LogLevel::Debug } else { LogLevel::Info });

    match args.command {
        cli::Command::Run(run_args) => {
            let all_passed = run_specs(run_args, &env).await?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        cli::Command::List(project_args) => {
            list_specs(project_args, &env)?;
        }
        cli::Command::Probe(project_args) => {
            if !probe(project_args, &env)? {
                std::process::exit(1);
            }
        }
        cli::Command::Requires => {
            for artifact in specs::REQUIRES {
                println!("{artifact}");
            }
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, &env)?;
        }
    }

    Ok(())
}

/// Effective configuration: file, then environment
fn load_settings(explicit: Option<&Path>, env: &EnvConfig) -> Result<AppConfig> {
    let path = explicit.map(Path::to_path_buf).or_else(|| env.config_file.clone());
    let mut config = config::load_config(path.as_deref())?;
    config.apply_env(env);
    Ok(config)
}

fn registry() -> FrameworkRegistry {
    let mut registry = FrameworkRegistry::new();
    specs::register(&mut registry);
    registry
}

/// The applicable framework, or specs when nothing applies
fn select_factory<'a>(
    registry: &'a FrameworkRegistry,
    project: &Project,
) -> Result<&'a dyn FrameworkFactory> {
    if let Some(factory) = registry.select(project) {
        return Ok(factory);
    }
    warn!(
        "No spec sources found under {}",
        project.spec_root(specs::LANG).display()
    );
    registry
        .get(specs::NAME)
        .ok_or_else(|| anyhow::anyhow!("Framework not registered: {}", specs::NAME))
}

async fn run_specs(args: cli::RunArgs, env: &EnvConfig) -> Result<bool> {
    let mut config = load_settings(args.project.config.as_deref(), env)?;

    if let Some(timeout) = args.timeout {
        config.timeout_secs = Some(timeout);
    }
    if args.parallel {
        config.parallel = true;
    }
    if let Some(concurrent) = args.concurrent {
        config.max_concurrent = concurrent;
    }
    if let Some(format) = &args.format {
        config.format = format.clone();
    }
    config.classpath.extend(args.classpath.iter().cloned());
    config.option_overrides = args.option_overrides();

    let format = OutputFormat::from_str(&config.format)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {}", config.format))?;

    let project = config.project(&args.project.project);
    let registry = registry();
    let factory = select_factory(&registry, &project)?;
    let framework = factory
        .create(&project, &config)
        .context("Failed to configure spec framework")?;

    let dependencies = DependencyContext::new(config.classpath.iter().cloned());
    let tests = framework.tests(&dependencies)?;

    info!(
        "Running {} specs ({})",
        tests.len(),
        if config.parallel {
            format!("parallel, {} at a time", config.max_concurrent)
        } else {
            "sequential".to_string()
        }
    );

    let report = framework.run(&tests, &dependencies).await;

    let formatter = ResultFormatter::new(format);
    println!("{}", formatter.format_report(&report));

    if let Some(output) = &args.output {
        write_report_to_file(output, &report, format)?;
        println!("\n✓ Report saved to {}", output.display());
    }

    Ok(report.is_all_passed())
}

fn list_specs(args: cli::ProjectArgs, env: &EnvConfig) -> Result<()> {
    let config = load_settings(args.config.as_deref(), env)?;
    let project = config.project(&args.project);
    let framework = specs::Specs::new(&project, &config)?;

    let tests = framework.tests(&DependencyContext::default())?;
    let spec_root = framework.spec_root();

    println!("Specs under {}:", spec_root.display());
    println!("{:-<70}", "");
    for test in &tests {
        match discovery::resolve(test, spec_root) {
            Ok(unit) => println!("  {:40} {}", unit.as_str(), test.path().display()),
            Err(e) => println!("  {:40} {}", format!("! {e}"), test.path().display()),
        }
    }
    println!("{:-<70}", "");
    println!("Total: {} specs", tests.len());

    Ok(())
}

fn probe(args: cli::ProjectArgs, env: &EnvConfig) -> Result<bool> {
    let config = load_settings(args.config.as_deref(), env)?;
    let project = config.project(&args.project);
    let registry = registry();

    match registry.select(&project) {
        Some(factory) => {
            println!("✓ {} applies to {}", factory.name(), project.base_dir().display());
            Ok(true)
        }
        None => {
            println!(
                "✗ No framework applies to {} (looked in {})",
                project.base_dir().display(),
                project.spec_root(specs::LANG).display()
            );
            Ok(false)
        }
    }
}

fn manage_config(args: cli::ConfigArgs, env: &EnvConfig) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {}. Use --force to overwrite.",
                    path.display()
                );
            }

            AppConfig::example().save(&path)?;
            println!("✓ Configuration file created: {}", path.display());
            println!("\nEdit the file to customize your settings.");
        }

        cli::ConfigAction::Show { config: file } => {
            let settings = load_settings(file.as_deref(), env)?;
            let source: Option<PathBuf> = file
                .or_else(|| env.config_file.clone())
                .or_else(config::find_config);
            match source {
                Some(path) => println!("# Loaded from {}", path.display()),
                None => println!("# Defaults (no config file found)"),
            }
            if env.has_any() {
                println!("# Environment overrides applied");
            }
            println!("{}", serde_yaml::to_string(&settings)?);
        }

        cli::ConfigAction::Env => {
            config::print_env_help();
            println!();
            env.print_summary();
        }
    }

    Ok(())
}
