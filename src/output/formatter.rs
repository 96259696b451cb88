//! Console formatters for run results

use crate::error::Result;
use crate::models::EndpointReport;
use crate::stats::{CategoryBreakdown, ReachableReport, RunSummary};
use crate::types::PerformanceLevel;
use colored::Colorize;

/// Formatter seam for console output
pub trait OutputFormatter: Send + Sync {
    /// Format a section header
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format the run-level summary
    fn format_run_summary(&self, summary: &RunSummary) -> Result<String>;

    /// Format the per-endpoint result table
    fn format_endpoint_table(&self, reports: &[EndpointReport]) -> Result<String>;

    /// Format the reachable-only list
    fn format_reachable_list(&self, reachable: &ReachableReport) -> Result<String>;

    /// Format the per-category breakdown
    fn format_category_breakdown(&self, categories: &[CategoryBreakdown]) -> Result<String>;
}

fn summary_lines(summary: &RunSummary) -> Vec<String> {
    vec![
        format!("Run started:    {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")),
        format!(
            "Total time:     {:.1}s",
            summary.total_duration.as_secs_f64()
        ),
        format!("Checked:        {}", summary.checked),
        format!(
            "Reachable:      {} ({} fully, {} partially)",
            summary.reachable_count(),
            summary.fully_reachable,
            summary.partially_reachable
        ),
        format!("Unreachable:    {}", summary.unreachable),
        format!("Success rate:   {:.1}%", summary.success_rate),
    ]
}

fn endpoint_row(report: &EndpointReport) -> String {
    let latency = match report.mean_latency_ms() {
        Some(ms) => format!("{:.1}ms", ms),
        None => "-".to_string(),
    };

    let dns = match &report.dns {
        Some(resolution) => match resolution.resolved_ip {
            Some(ip) => ip.to_string(),
            None => "unresolved".to_string(),
        },
        None => "-".to_string(),
    };

    format!(
        "{:<28} {:<12} {:>8} {:>7.1}% {:<16} {}",
        truncate(&report.endpoint.name, 28),
        report.status.label(),
        latency,
        report.loss_pct,
        dns,
        report.endpoint.category.label(),
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Plain text formatter for scripts and logs
pub struct PlainFormatter {
    verbose: bool,
}

impl PlainFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        Ok(format!("{}\n{}", title, "=".repeat(title.len())))
    }

    fn format_run_summary(&self, summary: &RunSummary) -> Result<String> {
        Ok(summary_lines(summary).join("\n"))
    }

    fn format_endpoint_table(&self, reports: &[EndpointReport]) -> Result<String> {
        let mut lines = vec![format!(
            "{:<28} {:<12} {:>8} {:>8} {:<16} {}",
            "Endpoint", "Status", "Avg", "Loss", "Resolved IP", "Category"
        )];

        for report in reports {
            lines.push(endpoint_row(report));

            if self.verbose {
                if let Some(error) = report.first_error() {
                    lines.push(format!("    last error: {}", error));
                }
            }
        }

        Ok(lines.join("\n"))
    }

    fn format_reachable_list(&self, reachable: &ReachableReport) -> Result<String> {
        let mut lines = vec![format!(
            "Reachable endpoints ({} of {} checked):",
            reachable.reachable_count, reachable.checked
        )];

        for entry in &reachable.endpoints {
            lines.push(format!(
                "  {:<28} {:>8.1}ms  {}",
                truncate(&entry.name, 28),
                entry.avg_latency_ms,
                entry.address
            ));
        }

        if reachable.endpoints.is_empty() {
            lines.push("  (none)".to_string());
        }

        Ok(lines.join("\n"))
    }

    fn format_category_breakdown(&self, categories: &[CategoryBreakdown]) -> Result<String> {
        let mut lines = vec!["By category:".to_string()];

        for group in categories {
            lines.push(format!(
                "  {:<16} {:>3} checked, {:>3} reachable ({:.0}%)",
                group.category.label(),
                group.checked,
                group.reachable,
                group.success_rate
            ));
        }

        Ok(lines.join("\n"))
    }
}

/// Colored console formatter
pub struct ColoredFormatter {
    verbose: bool,
}

impl ColoredFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn paint_status(&self, report: &EndpointReport, row: String) -> String {
        use crate::types::ReachabilityStatus;

        match report.status {
            ReachabilityStatus::FullyReachable => match report.statistics.performance_level() {
                PerformanceLevel::Good => row.green().to_string(),
                PerformanceLevel::Moderate => row.yellow().to_string(),
                PerformanceLevel::Poor => row.red().to_string(),
            },
            ReachabilityStatus::PartiallyReachable => row.yellow().to_string(),
            ReachabilityStatus::Unreachable => row.red().to_string(),
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        Ok(format!(
            "{}\n{}",
            title.bold().cyan(),
            "=".repeat(title.len()).cyan()
        ))
    }

    fn format_run_summary(&self, summary: &RunSummary) -> Result<String> {
        let mut lines = summary_lines(summary);

        // Recolor the success-rate line by how the run went
        if let Some(last) = lines.pop() {
            let colored_line = if summary.success_rate >= 80.0 {
                last.green().to_string()
            } else if summary.success_rate >= 50.0 {
                last.yellow().to_string()
            } else {
                last.red().to_string()
            };
            lines.push(colored_line);
        }

        Ok(lines.join("\n"))
    }

    fn format_endpoint_table(&self, reports: &[EndpointReport]) -> Result<String> {
        let mut lines = vec![format!(
            "{:<28} {:<12} {:>8} {:>8} {:<16} {}",
            "Endpoint", "Status", "Avg", "Loss", "Resolved IP", "Category"
        )
        .bold()
        .to_string()];

        for report in reports {
            lines.push(self.paint_status(report, endpoint_row(report)));

            if self.verbose {
                if let Some(error) = report.first_error() {
                    lines.push(format!("    last error: {}", error).dimmed().to_string());
                }
            }
        }

        Ok(lines.join("\n"))
    }

    fn format_reachable_list(&self, reachable: &ReachableReport) -> Result<String> {
        let header = format!(
            "Reachable endpoints ({} of {} checked):",
            reachable.reachable_count, reachable.checked
        )
        .bold()
        .to_string();

        let mut lines = vec![header];

        for entry in &reachable.endpoints {
            let row = format!(
                "  {:<28} {:>8.1}ms  {}",
                truncate(&entry.name, 28),
                entry.avg_latency_ms,
                entry.address
            );
            let colored_row = match PerformanceLevel::from_millis(entry.avg_latency_ms) {
                PerformanceLevel::Good => row.green().to_string(),
                PerformanceLevel::Moderate => row.yellow().to_string(),
                PerformanceLevel::Poor => row.red().to_string(),
            };
            lines.push(colored_row);
        }

        if reachable.endpoints.is_empty() {
            lines.push("  (none)".dimmed().to_string());
        }

        Ok(lines.join("\n"))
    }

    fn format_category_breakdown(&self, categories: &[CategoryBreakdown]) -> Result<String> {
        let mut lines = vec!["By category:".bold().to_string()];

        for group in categories {
            lines.push(format!(
                "  {:<16} {:>3} checked, {:>3} reachable ({:.0}%)",
                group.category.label(),
                group.checked,
                group.reachable,
                group.success_rate
            ));
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Endpoint;
    use crate::models::ProbeOutcome;
    use crate::stats::{reachable_report, RunSummary};
    use crate::types::ProbeMethod;
    use chrono::Utc;
    use std::time::Duration;
    use uuid::Uuid;

    fn sample_reports() -> Vec<EndpointReport> {
        let ok = EndpointReport::from_attempts(
            Endpoint::new("Media One", "http://media.example"),
            vec![ProbeOutcome::success(
                Duration::from_millis(42),
                200,
                ProbeMethod::Head,
            )],
            None,
            Utc::now(),
        );
        let gone = EndpointReport::from_attempts(
            Endpoint::new("Gone", "http://gone.example"),
            vec![ProbeOutcome::failure(
                crate::models::FailureKind::Transport,
                "connection refused",
                Duration::from_millis(3),
            )],
            None,
            Utc::now(),
        );
        vec![ok, gone]
    }

    #[test]
    fn test_plain_summary_contains_counts() {
        let reports = sample_reports();
        let summary =
            RunSummary::from_reports(Uuid::new_v4(), Utc::now(), Duration::from_secs(1), &reports);

        let formatter = PlainFormatter::new(false);
        let output = formatter.format_run_summary(&summary).unwrap();

        assert!(output.contains("Checked:        2"));
        assert!(output.contains("Success rate:   50.0%"));
    }

    #[test]
    fn test_plain_table_lists_every_endpoint() {
        let reports = sample_reports();
        let formatter = PlainFormatter::new(false);
        let output = formatter.format_endpoint_table(&reports).unwrap();

        assert!(output.contains("Media One"));
        assert!(output.contains("Gone"));
        assert!(output.contains("unreachable"));
        assert!(output.contains("42.0ms"));
    }

    #[test]
    fn test_verbose_table_shows_errors() {
        let reports = sample_reports();
        let formatter = PlainFormatter::new(true);
        let output = formatter.format_endpoint_table(&reports).unwrap();

        assert!(output.contains("last error: connection refused"));
    }

    #[test]
    fn test_reachable_list_sorted_and_counted() {
        let reports = sample_reports();
        let view = reachable_report(&reports);
        let formatter = PlainFormatter::new(false);
        let output = formatter.format_reachable_list(&view).unwrap();

        assert!(output.contains("Reachable endpoints (1 of 2 checked):"));
        assert!(output.contains("Media One"));
        assert!(!output.contains("Gone   "));
    }

    #[test]
    fn test_truncate_long_names() {
        let long = "a".repeat(40);
        let cut = truncate(&long, 28);
        assert!(cut.chars().count() <= 28);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_colored_formatter_renders() {
        let reports = sample_reports();
        let summary =
            RunSummary::from_reports(Uuid::new_v4(), Utc::now(), Duration::from_secs(1), &reports);

        let formatter = ColoredFormatter::new(false);
        // Content survives coloring even if the test terminal strips codes
        let output = formatter.format_run_summary(&summary).unwrap();
        assert!(output.contains("Checked"));

        let table = formatter.format_endpoint_table(&reports).unwrap();
        assert!(table.contains("Media One"));
    }
}
