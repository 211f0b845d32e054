//! Specs runner - BDD spec discovery and execution
//!
//! Finds Scala specs files in a project, runs each one as its own JVM process
//! and reports which passed. A failing spec never stops the run.
//!
//! ```no_run
//! use specs_runner::config::AppConfig;
//! use specs_runner::framework::{specs, FrameworkRegistry};
//! use specs_runner::models::DependencyContext;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::default();
//! let project = config.project(".");
//!
//! let mut registry = FrameworkRegistry::new();
//! specs::register(&mut registry);
//!
//! if let Some(factory) = registry.select(&project) {
//!     let framework = factory.create(&project, &config)?;
//!     let deps = DependencyContext::new(["lib/specs-1.3.1.jar"]);
//!     let tests = framework.tests(&deps)?;
//!     let report = framework.run(&tests, &deps).await;
//!     println!("{} of {} passed", report.passed, report.total);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod framework;
pub mod models;
pub mod output;
pub mod utils;

pub use error::{SpecsError, SpecsResult};
