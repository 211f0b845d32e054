//! File name patterns identifying spec files

use regex::RegexSet;
use std::path::Path;

use crate::error::{SpecsError, SpecsResult};

/// Default spec file patterns, matched against the file name
pub const TESTS_PATTERN: &[&str] = &[r"^.*Spec.*\.scala$"];

/// Case-sensitive matcher over a fixed set of file name patterns
#[derive(Clone, Debug)]
pub struct SpecMatcher {
    set: RegexSet,
}

impl SpecMatcher {
    /// Build a matcher, reporting the first pattern that fails to compile
    pub fn new<I, S>(patterns: I) -> SpecsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();

        for pattern in &patterns {
            regex::Regex::new(pattern).map_err(|source| SpecsError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }

        let set = RegexSet::new(&patterns).map_err(|source| SpecsError::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })?;

        Ok(Self { set })
    }

    pub fn default_patterns() -> SpecsResult<Self> {
        Self::new(TESTS_PATTERN)
    }

    /// Whether the file name of `path` matches any pattern
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| self.set.is_match(name))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SpecMatcher {
        SpecMatcher::default_patterns().unwrap()
    }

    #[test]
    fn test_spec_file_matches() {
        assert!(matcher().matches("src/spec/scala/FooSpec.scala"));
        assert!(matcher().matches("src/spec/scala/a/b/FooSpecs.scala"));
        assert!(matcher().matches("SpecFoo.scala"));
    }

    #[test]
    fn test_plain_file_does_not_match() {
        assert!(!matcher().matches("src/spec/scala/Foo.scala"));
        assert!(!matcher().matches("src/spec/scala/FooSpec.java"));
        assert!(!matcher().matches("src/spec/scala/FooSpec.scala.bak"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(!matcher().matches("src/spec/scala/Foospec.scala"));
        assert!(!matcher().matches("src/spec/scala/FOOSPEC.scala"));
        assert!(!matcher().matches("src/spec/scala/FooSpec.Scala"));
    }

    #[test]
    fn test_only_file_name_is_considered() {
        assert!(!matcher().matches("src/spec/scala/SpecUtils/Helper.scala"));
    }

    #[test]
    fn test_multiple_patterns() {
        let matcher = SpecMatcher::new([r"^.*Spec\.scala$", r"^.*Test\.scala$"]).unwrap();
        assert_eq!(matcher.len(), 2);
        assert!(matcher.matches("FooSpec.scala"));
        assert!(matcher.matches("FooTest.scala"));
        assert!(!matcher.matches("Foo.scala"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = SpecMatcher::new([r"^.*Spec(\.scala$"]).unwrap_err();
        assert!(matches!(err, SpecsError::InvalidPattern { .. }));
    }
}
