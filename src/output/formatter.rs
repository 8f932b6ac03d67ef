//! Output formatters for scenario results
//!
//! Provides Table, JSON, CSV, and summary output formats.

use crate::models::{Scenario, TestResult, TestRunSummary, TestStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
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

    fn status_label(&self, status: TestStatus) -> String {
        let plain = format!("{} {}", status.symbol(), status);
        if !self.colorize {
            return plain;
        }
        let color = match status {
            TestStatus::Pass => "32",
            TestStatus::Skip => "33",
            TestStatus::Fail | TestStatus::Error => "31",
        };
        format!("\x1b[{color}m{plain}\x1b[0m")
    }

    fn format_result_table(&self, result: &TestResult) -> String {
        format!(
            "{:2}. {:26} {:8} w{} [{:>6}ms]",
            result.scenario.number(),
            result.scenario.name(),
            self.status_label(result.status),
            result.worker,
            result.duration_ms
        )
    }

    fn format_result_csv(&self, result: &TestResult) -> String {
        format!(
            "{},{},{},{},{},\"{}\"",
            result.scenario.number(),
            result.scenario.name(),
            result.status,
            result.worker,
            result.duration_ms,
            result.message.as_deref().unwrap_or("").replace('"', "\"\"")
        )
    }

    /// Format a run summary
    pub fn format_summary(&self, summary: &TestRunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Csv => self.format_summary_csv(summary),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &TestRunSummary) -> String {
        let mut output = String::new();
        let rule = "═".repeat(64);

        output.push_str(&format!("\n{rule}\n"));
        output.push_str(&format!(
            "  Player API {} ({})\n",
            summary.base_url,
            summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("{rule}\n"));

        for result in &summary.results {
            output.push_str(&format!("  {}\n", self.format_result_table(result)));
            if result.status.is_failure() {
                if let Some(message) = &result.message {
                    output.push_str(&format!("      {message}\n"));
                }
            }
        }

        output.push_str(&format!("{rule}\n"));
        output.push_str(&format!(
            "  Total: {} | Pass: {} | Fail: {} | Skip: {} | Error: {}\n",
            summary.total, summary.passed, summary.failed, summary.skipped, summary.errors
        ));
        output.push_str(&format!(
            "  Pass Rate: {:5.1}% | Duration: {}ms\n",
            summary.pass_rate(),
            summary.total_duration_ms
        ));
        output.push_str(&format!("{rule}\n"));

        output
    }

    fn format_summary_csv(&self, summary: &TestRunSummary) -> String {
        let mut output = String::new();
        output.push_str("scenario_num,scenario_name,status,worker,duration_ms,message\n");
        for result in &summary.results {
            output.push_str(&self.format_result_csv(result));
            output.push('\n');
        }
        output
    }

    fn format_summary_brief(&self, summary: &TestRunSummary) -> String {
        format!(
            "Player API {}: {}/{} passed ({:.1}%) in {}ms",
            summary.base_url,
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.total_duration_ms
        )
    }

    /// Format the scenario catalogue
    pub fn format_catalogue(&self, detailed: bool, describe: impl Fn(Scenario) -> String) -> String {
        let mut output = String::new();
        let mut current_category = "";

        for scenario in Scenario::all() {
            let category = scenario.category();
            if category != current_category {
                output.push_str(&format!("\n{category} Scenarios:\n"));
                output.push_str(&format!("{}\n", "─".repeat(64)));
                current_category = category;
            }

            if detailed {
                output.push_str(&format!(
                    "  {:2}. {:26} {}\n",
                    scenario.number(),
                    scenario.name(),
                    describe(scenario)
                ));
            } else {
                output.push_str(&format!("  {:2}. {}\n", scenario.number(), scenario.name()));
            }
        }

        output
    }
}
