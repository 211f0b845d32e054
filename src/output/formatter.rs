//! Output formatters for run reports
//!
//! Provides JSON, Table, and summary output formats.

use std::io::Write;

use crate::models::{RunReport, TestResult, TestStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single spec result
    pub fn format_result(&self, result: &TestResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_result_table(result),
            OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(result).unwrap_or_default(),
            OutputFormat::Summary => self.format_result_summary(result),
        }
    }

    fn status_label(&self, status: TestStatus) -> &'static str {
        if self.colorize {
            match status {
                TestStatus::Pass => "\x1b[32m✓ PASS\x1b[0m",
                TestStatus::Fail => "\x1b[31m✗ FAIL\x1b[0m",
                TestStatus::Timeout => "\x1b[33m⧗ TIMEOUT\x1b[0m",
                TestStatus::Error => "\x1b[31m! ERROR\x1b[0m",
            }
        } else {
            match status {
                TestStatus::Pass => "✓ PASS",
                TestStatus::Fail => "✗ FAIL",
                TestStatus::Timeout => "⧗ TIMEOUT",
                TestStatus::Error => "! ERROR",
            }
        }
    }

    fn format_result_table(&self, result: &TestResult) -> String {
        format!(
            "{:40} {} [{:>6}ms]",
            result.display_name(),
            self.status_label(result.status),
            result.duration_ms
        )
    }

    fn format_result_summary(&self, result: &TestResult) -> String {
        format!(
            "{} {} ({}ms)",
            result.status.symbol(),
            result.display_name(),
            result.duration_ms
        )
    }

    /// Format a whole run
    pub fn format_report(&self, report: &RunReport) -> String {
        match self.format {
            OutputFormat::Table => self.format_report_table(report),
            OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Summary => self.format_report_brief(report),
        }
    }

    fn format_report_table(&self, report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str("\n═══════════════════════════════════════════════════════════════\n");
        output.push_str(&format!(
            " {} specs - {} run\n",
            report.framework, report.total
        ));
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        for result in &report.results {
            output.push_str(&format!(" {}\n", self.format_result_table(result)));
        }

        let failures = report.failed();
        if !failures.is_empty() {
            output.push_str(" ───────────────────────────────────────────────────────────\n");
            output.push_str(" Failures:\n");
            for result in failures {
                output.push_str(&format!(
                    "   - {}: {}\n",
                    result.display_name(),
                    result.message.as_deref().unwrap_or("no message")
                ));
            }
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", report.passed)
        } else {
            report.passed.to_string()
        };
        let fail_count = report.failed + report.timed_out + report.errors;
        let fail_str = if self.colorize && fail_count > 0 {
            format!("\x1b[31m{fail_count}\x1b[0m")
        } else {
            fail_count.to_string()
        };

        output.push_str(&format!(
            " Total: {} | Pass: {} | Not passed: {} (fail {}, timeout {}, error {})\n",
            report.total, pass_str, fail_str, report.failed, report.timed_out, report.errors
        ));
        output.push_str(&format!(
            " Pass Rate: {:5.1}% | Duration: {}ms\n",
            report.pass_rate(),
            report.total_duration_ms
        ));

        output
    }

    fn format_report_brief(&self, report: &RunReport) -> String {
        format!(
            "{}: {}/{} specs passed ({:.1}%) in {}ms",
            report.framework,
            report.passed,
            report.total,
            report.pass_rate(),
            report.total_duration_ms
        )
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Write a report to a file, without colors
pub fn write_report_to_file(
    path: &std::path::Path,
    report: &RunReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let formatter = ResultFormatter::new(format).no_color();
    let content = formatter.format_report(report);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
