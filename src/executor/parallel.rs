//! Parallel spec execution
//!
//! Runs up to `max_concurrent` spec processes at once. Results are collected
//! by discovery index, so the report has the same order as a sequential run.

use chrono::Utc;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use super::runner::run_spec;
use super::Invoker;
use crate::framework::RunOptions;
use crate::models::{DependencyContext, RunReport, TestFile, TestResult};
use crate::utils::Timer;

/// Parallel spec executor
pub struct ParallelExecutor {
    framework: String,
    source_root: Arc<PathBuf>,
    invoker: Arc<dyn Invoker>,
    options: Arc<RunOptions>,
    max_concurrent: usize,
}

impl ParallelExecutor {
    pub fn new(
        framework: impl Into<String>,
        source_root: impl Into<PathBuf>,
        invoker: Arc<dyn Invoker>,
        options: Arc<RunOptions>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            framework: framework.into(),
            source_root: Arc::new(source_root.into()),
            invoker,
            options,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub async fn run(&self, tests: &[TestFile], dependencies: &DependencyContext) -> RunReport {
        info!(
            "Running {} {} specs in parallel (max {} concurrent)",
            tests.len(),
            self.framework,
            self.max_concurrent
        );

        let started_at = Utc::now();
        let timer = Timer::start("parallel run");
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let dependencies = Arc::new(dependencies.clone());

        let handles: Vec<_> = tests
            .iter()
            .cloned()
            .map(|test| {
                let semaphore = semaphore.clone();
                let invoker = self.invoker.clone();
                let source_root = self.source_root.clone();
                let options = self.options.clone();
                let dependencies = dependencies.clone();

                tokio::spawn(async move {
                    let _permit = semaphore.acquire().await;
                    debug!("Starting parallel execution of {}", test);
                    run_spec(
                        invoker.as_ref(),
                        &source_root,
                        &options,
                        &dependencies,
                        &test,
                    )
                    .await
                })
            })
            .collect();

        // join_all keeps submission order, which is discovery order
        let results: Vec<TestResult> = tests
            .iter()
            .zip(join_all(handles).await)
            .map(|(test, joined)| {
                joined.unwrap_or_else(|e| {
                    error!("Worker for {} crashed: {}", test, e);
                    TestResult::error(test.clone(), None, format!("worker task failed: {e}"))
                })
            })
            .collect();

        let report = RunReport::new(&self.framework, started_at, results);
        info!(
            "Parallel execution completed in {}ms - Pass: {}/{} ({:.1}%)",
            timer.elapsed_ms(),
            report.passed,
            report.total,
            report.pass_rate()
        );
        report
    }
}
