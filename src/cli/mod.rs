//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use specs_runner::framework::RunOptions;

/// Scala specs BDD runner
#[derive(Parser, Debug)]
#[command(name = "specs-runner")]
#[command(version)]
#[command(about = "Discover and run Scala specs, one JVM per spec")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover and run specs
    Run(RunArgs),

    /// List discovered specs and their unit names
    List(ProjectArgs),

    /// Check whether the project has spec sources
    Probe(ProjectArgs),

    /// Print the artifacts that must be on the classpath
    Requires,

    /// Manage configuration
    Config(ConfigArgs),
}

/// Project location and config file
#[derive(ClapArgs, Debug, Clone)]
pub struct ProjectArgs {
    /// Project base directory
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Classpath entry (repeatable)
    #[arg(long = "classpath", value_name = "PATH")]
    pub classpath: Vec<PathBuf>,

    /// System property as KEY=VALUE (repeatable)
    #[arg(short = 'D', long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Extra JVM argument (repeatable)
    #[arg(long = "java-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub java_args: Vec<String>,

    /// Hide stack traces in spec output
    #[arg(long)]
    pub no_stacktrace: bool,

    /// Per-spec timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Run specs in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Number of concurrent specs (when parallel)
    #[arg(long)]
    pub concurrent: Option<usize>,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Save the report to file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RunArgs {
    /// Options given on the command line
    pub fn option_overrides(&self) -> RunOptions {
        let mut options = RunOptions::default().with_properties(self.properties.clone());
        if !self.java_args.is_empty() {
            options = options.with_extra_runtime_args(self.java_args.clone());
        }
        if self.no_stacktrace {
            options = options.without_stack_trace();
        }
        options
    }
}

/// Arguments for config management
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example configuration file
    Init {
        /// Output path
        #[arg(default_value = "specs-runner.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Show {
        /// Configuration file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Describe supported environment variables
    Env,
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property() {
        assert_eq!(
            parse_property("specs.env=ci"),
            Ok(("specs.env".to_string(), "ci".to_string()))
        );
        assert_eq!(
            parse_property("url=a=b"),
            Ok(("url".to_string(), "a=b".to_string()))
        );
        assert!(parse_property("novalue").is_err());
        assert!(parse_property("=x").is_err());
    }

    #[test]
    fn test_run_args() {
        let args = Args::parse_from([
            "specs-runner",
            "run",
            "--project",
            "/work/app",
            "--classpath",
            "lib/specs.jar",
            "-D",
            "env=ci",
            "--java-arg",
            "-Xmx1g",
            "--no-stacktrace",
            "--parallel",
        ]);

        let Command::Run(run) = args.command else {
            panic!("expected run command");
        };
        assert_eq!(run.project.project, PathBuf::from("/work/app"));
        assert_eq!(run.classpath, vec![PathBuf::from("lib/specs.jar")]);
        assert!(run.parallel);

        let options = run.option_overrides();
        assert!(options.exclude_stack_trace);
        assert_eq!(options.extra_runtime_args, Some(vec!["-Xmx1g".to_string()]));
        assert_eq!(options.properties.get("env").map(String::as_str), Some("ci"));
    }

    #[test]
    fn test_defaults_add_no_options() {
        let args = Args::parse_from(["specs-runner", "run"]);
        let Command::Run(run) = args.command else {
            panic!("expected run command");
        };
        assert_eq!(run.option_overrides(), RunOptions::default());
    }
}
