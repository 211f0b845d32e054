//! Scala specs BDD framework
//!
//! Runs every `src/spec/scala/**/*Spec*.scala` file as its own JVM process.
//!
//! Supported options:
//! * `excludeStackTrace`: hide stack traces in the console (default false)
//! * `properties`: system properties for the JVM
//! * `extraRuntimeArgs`: extra JVM arguments

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{FrameworkFactory, FrameworkRegistry, RunOptions, TestFramework};
use crate::config::AppConfig;
use crate::discovery::{self, SpecMatcher};
use crate::error::SpecsResult;
use crate::executor::{Invoker, JavaInvoker, ParallelExecutor, SequentialRunner};
use crate::models::{DependencyContext, Project, RunReport, TestFile};

pub const NAME: &str = "specs";

/// Language directory under the BDD source directory
pub const LANG: &str = "scala";

pub const EXTENSION: &str = "scala";

/// Artifacts the specs runner needs on its classpath
pub const REQUIRES: &[&str] = &[
    "com.googlecode.specs:specs:jar:1.3.1",
    "com.googlecode.scalacheck:scalacheck:jar:1.3",
    "cglib:cglib:jar:2.1_3",
    "org.hamcrest:hamcrest-all:jar:1.0",
    "org.objenesis:objenesis:jar:1.0",
    "asm:asm:jar:1.5.3",
    "org.jmock:jmock:jar:2.4.0",
];

/// Register the specs framework with a host registry
pub fn register(registry: &mut FrameworkRegistry) -> bool {
    registry.register(Box::new(SpecsFactory))
}

pub struct SpecsFactory;

impl FrameworkFactory for SpecsFactory {
    fn name(&self) -> &'static str {
        NAME
    }

    fn requires(&self) -> &'static [&'static str] {
        REQUIRES
    }

    fn applies_to(&self, project: &Project) -> bool {
        discovery::applies_to(project.spec_root(LANG), EXTENSION)
    }

    fn create(
        &self,
        project: &Project,
        config: &AppConfig,
    ) -> SpecsResult<Box<dyn TestFramework>> {
        Ok(Box::new(Specs::new(project, config)?))
    }
}

/// Specs framework bound to a project
pub struct Specs {
    spec_root: PathBuf,
    matcher: SpecMatcher,
    options: Arc<RunOptions>,
    invoker: Arc<dyn Invoker>,
    max_concurrent: Option<usize>,
}

impl Specs {
    pub fn new(project: &Project, config: &AppConfig) -> SpecsResult<Self> {
        config.validate()?;

        let mut invoker = JavaInvoker::new()
            .with_default_args(config.java_opts.clone())
            .with_timeout(config.timeout_secs.map(Duration::from_secs));
        if let Some(home) = &config.java_home {
            invoker = invoker.with_java_home(home);
        }

        Ok(Self {
            spec_root: project.spec_root(LANG),
            matcher: SpecMatcher::new(&config.patterns)?,
            options: Arc::new(config.run_options()?),
            invoker: Arc::new(invoker),
            max_concurrent: config.parallel.then_some(config.max_concurrent),
        })
    }

    /// Replace the process launcher
    pub fn with_invoker(mut self, invoker: Arc<dyn Invoker>) -> Self {
        self.invoker = invoker;
        self
    }

    pub fn spec_root(&self) -> &std::path::Path {
        &self.spec_root
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }
}

#[async_trait]
impl TestFramework for Specs {
    fn name(&self) -> &'static str {
        NAME
    }

    fn tests(&self, _dependencies: &DependencyContext) -> SpecsResult<Vec<TestFile>> {
        let tests = discovery::discover(&self.spec_root, &self.matcher)?;
        info!(
            "Found {} specs under {}",
            tests.len(),
            self.spec_root.display()
        );
        Ok(tests)
    }

    async fn run(&self, tests: &[TestFile], dependencies: &DependencyContext) -> RunReport {
        match self.max_concurrent {
            Some(max_concurrent) => {
                ParallelExecutor::new(
                    NAME,
                    self.spec_root.clone(),
                    self.invoker.clone(),
                    self.options.clone(),
                    max_concurrent,
                )
                .run(tests, dependencies)
                .await
            }
            None => {
                SequentialRunner::new(
                    NAME,
                    self.spec_root.clone(),
                    self.invoker.clone(),
                    self.options.clone(),
                )
                .run(tests, dependencies)
                .await
            }
        }
    }
}
