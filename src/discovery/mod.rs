//! Spec discovery
//!
//! Finds spec files under a project's BDD source tree and maps them to
//! runnable unit identifiers.

mod pattern;
mod resolver;
mod scanner;

pub use pattern::{SpecMatcher, TESTS_PATTERN};
pub use resolver::resolve;
pub use scanner::{applies_to, discover};
