//! Spec process invocation

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::framework::RunOptions;
use crate::models::{DependencyContext, TestUnit};

/// How a single unit ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvocationOutcome {
    Passed,
    Failed(String),
    TimedOut(Duration),
}

impl InvocationOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, InvocationOutcome::Passed)
    }
}

/// Runs one unit to completion
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(
        &self,
        unit: &TestUnit,
        options: &RunOptions,
        dependencies: &DependencyContext,
    ) -> InvocationOutcome;
}

/// Launches each unit as a `java` process
#[derive(Clone, Debug)]
pub struct JavaInvoker {
    java_bin: PathBuf,
    default_args: Vec<String>,
    timeout: Option<Duration>,
}

impl JavaInvoker {
    pub fn new() -> Self {
        Self {
            java_bin: PathBuf::from("java"),
            default_args: Vec::new(),
            timeout: None,
        }
    }

    /// Use `<home>/bin/java`
    pub fn with_java_home(mut self, home: impl AsRef<Path>) -> Self {
        self.java_bin = home.as_ref().join("bin").join("java");
        self
    }

    pub fn with_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.java_bin = path.into();
        self
    }

    /// JVM arguments used when the options carry none
    pub fn with_default_args(mut self, args: Vec<String>) -> Self {
        self.default_args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn java_bin(&self) -> &Path {
        &self.java_bin
    }

    /// Arguments after the launcher: classpath, properties, JVM args, unit, flags
    pub fn command_args(
        &self,
        unit: &TestUnit,
        options: &RunOptions,
        dependencies: &DependencyContext,
    ) -> Result<Vec<OsString>, String> {
        let mut args: Vec<OsString> = Vec::new();

        if !dependencies.is_empty() {
            let classpath = dependencies
                .classpath()
                .map_err(|e| format!("Invalid classpath: {e}"))?;
            args.push("-classpath".into());
            args.push(classpath);
        }

        for (key, value) in &options.properties {
            args.push(format!("-D{key}={value}").into());
        }

        let jvm_args = options
            .extra_runtime_args
            .as_deref()
            .unwrap_or(&self.default_args);
        args.extend(jvm_args.iter().map(OsString::from));

        args.push(unit.as_str().into());
        args.extend(options.flags().into_iter().map(OsString::from));

        Ok(args)
    }
}

impl Default for JavaInvoker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Invoker for JavaInvoker {
    async fn invoke(
        &self,
        unit: &TestUnit,
        options: &RunOptions,
        dependencies: &DependencyContext,
    ) -> InvocationOutcome {
        let args = match self.command_args(unit, options, dependencies) {
            Ok(args) => args,
            Err(e) => return InvocationOutcome::Failed(e),
        };

        debug!("{} {:?}", self.java_bin.display(), args);

        // Spec output goes straight to the console while the process runs
        let mut child = match Command::new(&self.java_bin)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return InvocationOutcome::Failed(format!(
                    "Failed to launch {}: {e}",
                    self.java_bin.display()
                ))
            }
        };

        let status = match self.timeout {
            Some(limit) => {
                let waited = tokio::time::timeout(limit, child.wait()).await;
                match waited {
                    Ok(status) => status,
                    Err(_) => {
                        if let Err(e) = child.kill().await {
                            warn!("Failed to kill {}: {}", unit, e);
                        }
                        return InvocationOutcome::TimedOut(limit);
                    }
                }
            }
            None => child.wait().await,
        };

        match status {
            Ok(status) if status.success() => InvocationOutcome::Passed,
            Ok(status) => InvocationOutcome::Failed(format!("{unit} exited with {status}")),
            Err(e) => InvocationOutcome::Failed(format!("Failed waiting for {unit}: {e}")),
        }
    }
}
