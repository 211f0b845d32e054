//! Pluggable test frameworks
//!
//! A host keeps a [`FrameworkRegistry`], registers the frameworks it knows
//! about once at startup, then asks the registry which one applies to a
//! project. The specs adapter is registered through [`specs::register`].

mod options;
pub mod specs;

pub use options::{RunOptions, NO_STACKTRACE_FLAG, RECOGNIZED_OPTIONS};

use async_trait::async_trait;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::SpecsResult;
use crate::models::{DependencyContext, Project, RunReport, TestFile};

/// A configured framework bound to one project
#[async_trait]
pub trait TestFramework: Send + Sync {
    fn name(&self) -> &'static str;

    /// Discover the spec files to run
    fn tests(&self, dependencies: &DependencyContext) -> SpecsResult<Vec<TestFile>>;

    /// Run `tests` in order. Per-test failures never abort the run.
    async fn run(&self, tests: &[TestFile], dependencies: &DependencyContext) -> RunReport;
}

/// Registry entry that knows whether and how to build a framework
pub trait FrameworkFactory: Send + Sync {
    fn name(&self) -> &'static str;

    /// Artifact coordinates the host must resolve into the classpath
    fn requires(&self) -> &'static [&'static str];

    /// Cheap existence check, no full discovery
    fn applies_to(&self, project: &Project) -> bool;

    fn create(&self, project: &Project, config: &AppConfig)
        -> SpecsResult<Box<dyn TestFramework>>;
}

/// Caller-owned list of available frameworks
#[derive(Default)]
pub struct FrameworkRegistry {
    factories: Vec<Box<dyn FrameworkFactory>>,
}

impl FrameworkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a framework. Returns false if one with the same name exists.
    pub fn register(&mut self, factory: Box<dyn FrameworkFactory>) -> bool {
        if self.get(factory.name()).is_some() {
            debug!("Framework '{}' already registered", factory.name());
            return false;
        }
        debug!("Registered framework '{}'", factory.name());
        self.factories.push(factory);
        true
    }

    pub fn get(&self, name: &str) -> Option<&dyn FrameworkFactory> {
        self.factories
            .iter()
            .find(|f| f.name() == name)
            .map(|f| f.as_ref())
    }

    /// First registered framework that applies to `project`
    pub fn select(&self, project: &Project) -> Option<&dyn FrameworkFactory> {
        self.factories
            .iter()
            .find(|f| f.applies_to(project))
            .map(|f| f.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.factories.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
