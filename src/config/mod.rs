//! Configuration module
//!
//! Handles loading and managing configuration. Precedence, lowest first:
//! defaults, config file, environment, command line.

mod env;
mod file;

pub use env::{print_env_help, EnvConfig};
pub use file::{find_config, load_config, CONFIG_LOCATIONS};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::discovery::{SpecMatcher, TESTS_PATTERN};
use crate::error::{SpecsError, SpecsResult};
use crate::framework::RunOptions;
use crate::models::{Project, BDD_DIR, SOURCE_DIR};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Source directory under the project base
    pub source_dir: String,

    /// BDD directory under the source directory
    pub bdd_dir: String,

    /// Spec file name patterns
    pub patterns: Vec<String>,

    /// JDK used to launch specs; `java` from PATH when unset
    pub java_home: Option<PathBuf>,

    /// JVM arguments used when no `extraRuntimeArgs` option is given
    pub java_opts: Vec<String>,

    /// Pre-resolved classpath entries
    pub classpath: Vec<PathBuf>,

    /// Per-spec timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Run specs concurrently
    pub parallel: bool,

    /// Maximum concurrent specs
    pub max_concurrent: usize,

    /// Output format
    pub format: String,

    /// Framework options bag, filtered by the framework
    pub options: Map<String, Value>,

    /// Options set on the command line, applied over `options`
    #[serde(skip)]
    pub option_overrides: RunOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_dir: SOURCE_DIR.to_string(),
            bdd_dir: BDD_DIR.to_string(),
            patterns: TESTS_PATTERN.iter().map(|p| p.to_string()).collect(),
            java_home: None,
            java_opts: Vec::new(),
            classpath: Vec::new(),
            timeout_secs: None,
            parallel: false,
            max_concurrent: 4,
            format: "table".to_string(),
            options: Map::new(),
            option_overrides: RunOptions::default(),
        }
    }
}

impl AppConfig {
    /// Validate configuration
    pub fn validate(&self) -> SpecsResult<()> {
        if self.max_concurrent == 0 {
            return Err(SpecsError::Config("max_concurrent must be at least 1".into()));
        }
        if self.source_dir.is_empty() || self.bdd_dir.is_empty() {
            return Err(SpecsError::Config(
                "source_dir and bdd_dir must not be empty".into(),
            ));
        }
        if self.patterns.is_empty() {
            return Err(SpecsError::Config("at least one test pattern is required".into()));
        }
        if self.timeout_secs == Some(0) {
            return Err(SpecsError::Config("timeout_secs must be at least 1".into()));
        }
        SpecMatcher::new(&self.patterns)?;
        Ok(())
    }

    /// Typed run options: the filtered bag merged with command-line overrides
    pub fn run_options(&self) -> SpecsResult<RunOptions> {
        Ok(RunOptions::from_bag(&self.options)?.merge(self.option_overrides.clone()))
    }

    /// Project rooted at `base_dir` with this configuration's layout
    pub fn project(&self, base_dir: impl Into<PathBuf>) -> Project {
        Project::new(base_dir)
            .with_source_dir(&self.source_dir)
            .with_bdd_dir(&self.bdd_dir)
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(home) = &env.java_home {
            self.java_home = Some(home.clone());
        }
        if let Some(opts) = &env.java_opts {
            self.java_opts = opts.clone();
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = Some(timeout);
        }
        if let Some(parallel) = env.parallel {
            self.parallel = parallel;
        }
        if let Some(concurrent) = env.concurrent {
            self.max_concurrent = concurrent;
        }
        if let Some(format) = &env.format {
            self.format = format.clone();
        }
    }

    /// Generate example configuration
    pub fn example() -> Self {
        let mut options = Map::new();
        options.insert("excludeStackTrace".into(), Value::Bool(false));
        options.insert(
            "properties".into(),
            serde_json::json!({ "specs.env": "test" }),
        );
        options.insert("extraRuntimeArgs".into(), serde_json::json!(["-Xmx512m"]));

        Self {
            classpath: vec![
                PathBuf::from("lib/specs-1.3.1.jar"),
                PathBuf::from("lib/scalacheck-1.3.jar"),
                PathBuf::from("target/classes"),
                PathBuf::from("target/spec-classes"),
            ],
            timeout_secs: Some(300),
            options,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.source_dir, "src");
        assert_eq!(config.bdd_dir, "spec");
        assert_eq!(config.max_concurrent, 4);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_example_is_valid() {
        let config = AppConfig::example();
        assert!(config.validate().is_ok());
        let options = config.run_options().unwrap();
        assert_eq!(options.extra_runtime_args, Some(vec!["-Xmx512m".to_string()]));
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = AppConfig {
            max_concurrent: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(SpecsError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let config = AppConfig {
            patterns: vec!["[".into()],
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SpecsError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = AppConfig::default();
        config
            .options
            .insert("properties".into(), serde_json::json!({ "a": "file" }));
        config.option_overrides = RunOptions::default()
            .with_properties([("a", "cli")])
            .without_stack_trace();

        let options = config.run_options().unwrap();
        assert!(options.exclude_stack_trace);
        assert_eq!(options.properties.get("a").map(String::as_str), Some("cli"));
    }

    #[test]
    fn test_apply_env() {
        let mut config = AppConfig::default();
        let env = EnvConfig {
            java_home: Some(PathBuf::from("/opt/jdk")),
            java_opts: Some(vec!["-server".into()]),
            timeout: Some(60),
            parallel: Some(true),
            concurrent: Some(8),
            ..EnvConfig::default()
        };
        config.apply_env(&env);

        assert_eq!(config.java_home.as_deref(), Some(Path::new("/opt/jdk")));
        assert_eq!(config.java_opts, vec!["-server"]);
        assert_eq!(config.timeout_secs, Some(60));
        assert!(config.parallel);
        assert_eq!(config.max_concurrent, 8);
        assert_eq!(config.format, "table");
    }

    #[test]
    fn test_project_layout() {
        let config = AppConfig {
            bdd_dir: "bdd".into(),
            ..AppConfig::default()
        };
        let project = config.project("/work/app");
        assert_eq!(
            project.spec_root("scala"),
            PathBuf::from("/work/app/src/bdd/scala")
        );
    }
}
