//! Sequential spec runner
//!
//! Runs specs one at a time in discovery order. A failing spec is logged as
//! soon as its process exits and the run moves on to the next one.

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::{InvocationOutcome, Invoker};
use crate::discovery::resolve;
use crate::framework::RunOptions;
use crate::models::{DependencyContext, RunReport, TestFile, TestResult};
use crate::utils::Timer;

pub struct SequentialRunner {
    framework: String,
    source_root: PathBuf,
    invoker: Arc<dyn Invoker>,
    options: Arc<RunOptions>,
}

impl SequentialRunner {
    pub fn new(
        framework: impl Into<String>,
        source_root: impl Into<PathBuf>,
        invoker: Arc<dyn Invoker>,
        options: Arc<RunOptions>,
    ) -> Self {
        Self {
            framework: framework.into(),
            source_root: source_root.into(),
            invoker,
            options,
        }
    }

    pub async fn run(&self, tests: &[TestFile], dependencies: &DependencyContext) -> RunReport {
        info!("Running {} {} specs", tests.len(), self.framework);

        let started_at = Utc::now();
        let timer = Timer::start("run");
        let mut results = Vec::with_capacity(tests.len());

        for (index, test) in tests.iter().enumerate() {
            debug!("[{}/{}] {}", index + 1, tests.len(), test);
            let result = run_spec(
                self.invoker.as_ref(),
                &self.source_root,
                &self.options,
                dependencies,
                test,
            )
            .await;
            results.push(result);
        }

        let report = RunReport::new(&self.framework, started_at, results);
        info!(
            "Run completed in {}ms - Pass: {}/{} ({:.1}%)",
            timer.elapsed_ms(),
            report.passed,
            report.total,
            report.pass_rate()
        );
        report
    }
}

/// Resolve and invoke one spec. Never fails: every problem becomes a result.
pub(crate) async fn run_spec(
    invoker: &dyn Invoker,
    source_root: &Path,
    options: &RunOptions,
    dependencies: &DependencyContext,
    test: &TestFile,
) -> TestResult {
    let unit = match resolve(test, source_root) {
        Ok(unit) => unit,
        Err(e) => {
            error!("{}", e);
            return TestResult::error(test.clone(), None, e.to_string());
        }
    };

    info!("Running {}", unit);
    let timer = Timer::start(unit.as_str());
    let outcome = invoker.invoke(&unit, options, dependencies).await;
    let duration_ms = timer.stop();

    match outcome {
        InvocationOutcome::Passed => TestResult::pass(test.clone(), unit, duration_ms),
        InvocationOutcome::Failed(message) => {
            error!("{} failed: {}", unit, message);
            TestResult::fail(test.clone(), unit, duration_ms, message)
        }
        InvocationOutcome::TimedOut(limit) => {
            error!("{} timed out after {}ms", unit, limit.as_millis());
            TestResult::timeout(test.clone(), unit, duration_ms)
        }
    }
}
