//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "SPECS_RUNNER";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Config file from SPECS_RUNNER_CONFIG
    pub config_file: Option<PathBuf>,
    /// Timeout from SPECS_RUNNER_TIMEOUT
    pub timeout: Option<u64>,
    /// Parallel from SPECS_RUNNER_PARALLEL
    pub parallel: Option<bool>,
    /// Concurrency from SPECS_RUNNER_CONCURRENT
    pub concurrent: Option<usize>,
    /// Output format from SPECS_RUNNER_FORMAT
    pub format: Option<String>,
    /// Verbose from SPECS_RUNNER_VERBOSE
    pub verbose: Option<bool>,
    /// JDK from JAVA_HOME
    pub java_home: Option<PathBuf>,
    /// JVM arguments from JAVA_OPTS, falling back to JAVA_OPTIONS
    pub java_opts: Option<Vec<String>>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let prefixed = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            config_file: prefixed("CONFIG").map(PathBuf::from),
            timeout: prefixed("TIMEOUT").and_then(|v| v.parse().ok()),
            parallel: prefixed("PARALLEL").map(|v| parse_bool(&v)),
            concurrent: prefixed("CONCURRENT").and_then(|v| v.parse().ok()),
            format: prefixed("FORMAT"),
            verbose: prefixed("VERBOSE").map(|v| parse_bool(&v)),
            java_home: non_empty("JAVA_HOME").map(PathBuf::from),
            java_opts: non_empty("JAVA_OPTS")
                .or_else(|| non_empty("JAVA_OPTIONS"))
                .map(|v| v.split_whitespace().map(String::from).collect()),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.config_file.is_some()
            || self.timeout.is_some()
            || self.parallel.is_some()
            || self.concurrent.is_some()
            || self.format.is_some()
            || self.verbose.is_some()
            || self.java_home.is_some()
            || self.java_opts.is_some()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_CONFIG:     {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_TIMEOUT:    {:?}", ENV_PREFIX, self.timeout);
        println!("  {}_PARALLEL:   {:?}", ENV_PREFIX, self.parallel);
        println!("  {}_CONCURRENT: {:?}", ENV_PREFIX, self.concurrent);
        println!("  {}_FORMAT:     {:?}", ENV_PREFIX, self.format);
        println!("  {}_VERBOSE:    {:?}", ENV_PREFIX, self.verbose);
        println!("  JAVA_HOME:               {:?}", self.java_home);
        println!("  JAVA_OPTS:               {:?}", self.java_opts);
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}

/// Print all recognized environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_CONFIG      Path to configuration file");
    println!("  {ENV_PREFIX}_TIMEOUT     Per-spec timeout in seconds");
    println!("  {ENV_PREFIX}_PARALLEL    Enable parallel execution (true/false)");
    println!("  {ENV_PREFIX}_CONCURRENT  Maximum concurrent specs");
    println!("  {ENV_PREFIX}_FORMAT      Output format (table, json, json-pretty, summary)");
    println!("  {ENV_PREFIX}_VERBOSE     Enable verbose output (true/false)");
    println!("  JAVA_HOME                JDK used to launch specs");
    println!("  JAVA_OPTS                JVM arguments when none are configured");
    println!();
    println!("Example:");
    println!("  export JAVA_HOME=/usr/lib/jvm/java-8-openjdk");
    println!("  export {ENV_PREFIX}_TIMEOUT=300");
    println!("  specs-runner run --classpath lib/specs-1.3.1.jar");
}
