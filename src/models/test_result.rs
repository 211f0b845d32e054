//! Test result models
//!
//! Defines per-spec results, status types and the run report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{TestFile, TestUnit};

/// Terminal status of a single spec
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Timeout,
    Error,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
            TestStatus::Timeout => "⧗",
            TestStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Timeout => write!(f, "TIMEOUT"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of running one spec file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResult {
    pub test: TestFile,
    /// Absent when the file could not be resolved
    pub unit: Option<TestUnit>,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
}

impl TestResult {
    pub fn pass(test: TestFile, unit: TestUnit, duration_ms: u64) -> Self {
        Self {
            test,
            unit: Some(unit),
            status: TestStatus::Pass,
            duration_ms,
            message: None,
        }
    }

    pub fn fail(
        test: TestFile,
        unit: TestUnit,
        duration_ms: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            test,
            unit: Some(unit),
            status: TestStatus::Fail,
            duration_ms,
            message: Some(message.into()),
        }
    }

    pub fn timeout(test: TestFile, unit: TestUnit, duration_ms: u64) -> Self {
        Self {
            test,
            unit: Some(unit),
            status: TestStatus::Timeout,
            duration_ms,
            message: Some(format!("timed out after {duration_ms}ms")),
        }
    }

    /// Spec that never ran, e.g. unresolvable path or crashed worker
    pub fn error(test: TestFile, unit: Option<TestUnit>, error: impl Into<String>) -> Self {
        Self {
            test,
            unit,
            status: TestStatus::Error,
            duration_ms: 0,
            message: Some(error.into()),
        }
    }

    /// Name shown in output: the unit if resolved, else the path
    pub fn display_name(&self) -> String {
        match &self.unit {
            Some(unit) => unit.to_string(),
            None => self.test.to_string(),
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.display_name(),
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Outcome of a whole run, in discovery order
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub framework: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl RunReport {
    /// Build a report from results already ordered as discovered
    pub fn new(
        framework: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<TestResult>,
    ) -> Self {
        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();

        Self {
            framework: framework.into(),
            started_at,
            completed_at: Utc::now(),
            total: results.len(),
            passed: count(TestStatus::Pass),
            failed: count(TestStatus::Fail),
            timed_out: count(TestStatus::Timeout),
            errors: count(TestStatus::Error),
            total_duration_ms: results.iter().map(|r| r.duration_ms).sum(),
            results,
        }
    }

    /// Files that completed without error, in discovery order
    pub fn passed(&self) -> Vec<TestFile> {
        self.results
            .iter()
            .filter(|r| r.status.is_success())
            .map(|r| r.test.clone())
            .collect()
    }

    /// Results that did not pass, in discovery order
    pub fn failed(&self) -> Vec<&TestResult> {
        self.results
            .iter()
            .filter(|r| !r.status.is_success())
            .collect()
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} specs", self.framework)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Timeout: {} | Error: {}",
            self.total, self.passed, self.failed, self.timed_out, self.errors
        )?;
        writeln!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> TestFile {
        TestFile::new(format!("src/spec/scala/{name}.scala"))
    }

    fn unit(name: &str) -> TestUnit {
        TestUnit::new(name)
    }

    #[test]
    fn test_result_creation() {
        let result = TestResult::pass(file("ASpec"), unit("ASpec"), 100);
        assert!(result.status.is_success());
        assert_eq!(result.duration_ms, 100);
        assert_eq!(result.display_name(), "ASpec");
    }

    #[test]
    fn test_error_without_unit_shows_path() {
        let result = TestResult::error(file("a.b/ASpec"), None, "bad path");
        assert_eq!(result.display_name(), "src/spec/scala/a.b/ASpec.scala");
        assert!(result.to_string().contains("bad path"));
    }

    #[test]
    fn test_report_counts() {
        let results = vec![
            TestResult::pass(file("ASpec"), unit("ASpec"), 100),
            TestResult::fail(file("BSpec"), unit("BSpec"), 50, "exit status 1"),
            TestResult::timeout(file("CSpec"), unit("CSpec"), 1000),
            TestResult::error(file("DSpec"), None, "unresolvable"),
        ];

        let report = RunReport::new("specs", Utc::now(), results);
        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.timed_out, 1);
        assert_eq!(report.errors, 1);
        assert_eq!(report.total_duration_ms, 1150);
        assert!(!report.is_all_passed());
    }

    #[test]
    fn test_passed_and_failed_keep_order() {
        let results = vec![
            TestResult::pass(file("ASpec"), unit("ASpec"), 1),
            TestResult::fail(file("BSpec"), unit("BSpec"), 1, "boom"),
            TestResult::pass(file("CSpec"), unit("CSpec"), 1),
            TestResult::fail(file("DSpec"), unit("DSpec"), 1, "boom"),
        ];
        let report = RunReport::new("specs", Utc::now(), results);

        assert_eq!(report.passed(), vec![file("ASpec"), file("CSpec")]);
        let failed: Vec<_> = report.failed().iter().map(|r| r.test.clone()).collect();
        assert_eq!(failed, vec![file("BSpec"), file("DSpec")]);
    }

    #[test]
    fn test_empty_report() {
        let report = RunReport::new("specs", Utc::now(), Vec::new());
        assert_eq!(report.pass_rate(), 0.0);
        assert!(report.is_all_passed());
        assert!(report.passed().is_empty());
    }
}
