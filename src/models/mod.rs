//! Data models for spec discovery and execution
//!
//! This module contains all data structures shared by the pipeline stages.

mod project;
mod test_file;
mod test_result;

pub use project::{Project, BDD_DIR, SOURCE_DIR};
pub use test_file::{DependencyContext, TestFile, TestUnit};
pub use test_result::{RunReport, TestResult, TestStatus};
