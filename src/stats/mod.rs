//! Statistical aggregation over probe results
//!
//! Pure computation: per-endpoint latency statistics, the run-level summary,
//! and the reachable-only filtered view. No failure modes beyond the
//! division-by-zero guards for empty inputs.

use crate::catalog::Category;
use crate::models::EndpointReport;
use crate::types::{PerformanceLevel, ReachabilityStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

/// Latency statistics over the successful attempts of one endpoint
/// (or any other sample set)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStatistics {
    /// Minimum latency (milliseconds)
    pub min_ms: f64,

    /// Maximum latency (milliseconds)
    pub max_ms: f64,

    /// Arithmetic mean latency (milliseconds)
    pub avg_ms: f64,

    /// Population standard deviation of latencies (milliseconds)
    pub std_dev_ms: f64,

    /// Percentage of attempts that failed (0.0-100.0)
    pub loss_pct: f64,

    /// Number of successful samples included
    pub sample_count: usize,
}

impl LatencyStatistics {
    /// Calculate statistics from successful latency samples out of
    /// `attempted` total attempts. An empty sample set yields zeroed
    /// timing fields and 100% loss.
    pub fn from_samples(samples: &[Duration], attempted: usize) -> Self {
        let count = samples.len();

        if count == 0 {
            return Self {
                min_ms: 0.0,
                max_ms: 0.0,
                avg_ms: 0.0,
                std_dev_ms: 0.0,
                loss_pct: 100.0,
                sample_count: 0,
            };
        }

        let times: Vec<f64> = samples.iter().map(|d| d.as_secs_f64() * 1000.0).collect();

        let sum: f64 = times.iter().sum();
        let avg = sum / count as f64;
        let min = times.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = times.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let variance = times.iter().map(|&x| (x - avg).powi(2)).sum::<f64>() / count as f64;
        let std_dev = variance.sqrt();

        let loss_pct = if attempted == 0 {
            0.0
        } else {
            ((attempted - count.min(attempted)) as f64 / attempted as f64) * 100.0
        };

        Self {
            min_ms: min,
            max_ms: max,
            avg_ms: avg,
            std_dev_ms: std_dev,
            loss_pct,
            sample_count: count,
        }
    }

    /// Create empty statistics
    pub fn empty() -> Self {
        Self::from_samples(&[], 0)
    }

    /// Performance level based on mean latency
    pub fn performance_level(&self) -> PerformanceLevel {
        PerformanceLevel::from_millis(self.avg_ms)
    }

    /// Format mean latency for display
    pub fn format_avg(&self) -> String {
        format!("{:.1}ms", self.avg_ms)
    }
}

/// One reachable endpoint in the run summary, with its mean latency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReachableEntry {
    /// Display name
    pub name: String,
    /// Endpoint address
    pub address: String,
    /// Declared category
    pub category: Category,
    /// Mean latency over successful attempts (milliseconds)
    pub avg_latency_ms: f64,
}

/// Per-category aggregate for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Category tag
    pub category: Category,
    /// Endpoints checked in this category
    pub checked: usize,
    /// Endpoints that answered at least once
    pub reachable: usize,
    /// Endpoints that never answered
    pub unreachable: usize,
    /// Reachable percentage (0.0-100.0), 0 when checked is 0
    pub success_rate: f64,
}

/// Per-run aggregate over all endpoint reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Correlation ID for the run
    pub run_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Total probe time for the whole run
    pub total_duration: Duration,

    /// Number of unique endpoints checked
    pub checked: usize,

    /// Endpoints where every attempt succeeded
    pub fully_reachable: usize,

    /// Endpoints where some but not all attempts succeeded
    pub partially_reachable: usize,

    /// Endpoints where no attempt succeeded
    pub unreachable: usize,

    /// Percentage of endpoints that answered at least once,
    /// 0 when no endpoints were checked
    pub success_rate: f64,

    /// Reachable endpoints sorted ascending by mean latency
    pub reachable: Vec<ReachableEntry>,

    /// Per-category breakdown for reporting
    pub categories: Vec<CategoryBreakdown>,
}

impl RunSummary {
    /// Aggregate endpoint reports into a run summary
    pub fn from_reports(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        total_duration: Duration,
        reports: &[EndpointReport],
    ) -> Self {
        let checked = reports.len();

        let fully_reachable = reports
            .iter()
            .filter(|r| r.status == ReachabilityStatus::FullyReachable)
            .count();
        let partially_reachable = reports
            .iter()
            .filter(|r| r.status == ReachabilityStatus::PartiallyReachable)
            .count();
        let unreachable = reports
            .iter()
            .filter(|r| r.status == ReachabilityStatus::Unreachable)
            .count();

        let success_rate = if checked == 0 {
            0.0
        } else {
            ((fully_reachable + partially_reachable) as f64 / checked as f64) * 100.0
        };

        let mut reachable: Vec<ReachableEntry> = reports
            .iter()
            .filter(|r| r.is_reachable())
            .map(|r| ReachableEntry {
                name: r.endpoint.name.clone(),
                address: r.endpoint.address.clone(),
                category: r.endpoint.category,
                avg_latency_ms: r.statistics.avg_ms,
            })
            .collect();

        reachable.sort_by(|a, b| {
            a.avg_latency_ms
                .partial_cmp(&b.avg_latency_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Self {
            run_id,
            started_at,
            total_duration,
            checked,
            fully_reachable,
            partially_reachable,
            unreachable,
            success_rate,
            reachable,
            categories: category_breakdown(reports),
        }
    }

    /// Number of endpoints that answered at least once
    pub fn reachable_count(&self) -> usize {
        self.fully_reachable + self.partially_reachable
    }

    /// The fastest reachable endpoint, if any
    pub fn fastest(&self) -> Option<&ReachableEntry> {
        self.reachable.first()
    }
}

/// Group endpoint reports by declared category
pub fn category_breakdown(reports: &[EndpointReport]) -> Vec<CategoryBreakdown> {
    let mut groups: BTreeMap<&'static str, (Category, usize, usize)> = BTreeMap::new();

    for report in reports {
        let category = report.endpoint.category;
        let entry = groups.entry(category.label()).or_insert((category, 0, 0));
        entry.1 += 1;
        if report.is_reachable() {
            entry.2 += 1;
        }
    }

    groups
        .into_values()
        .map(|(category, checked, reachable)| CategoryBreakdown {
            category,
            checked,
            reachable,
            unreachable: checked - reachable,
            success_rate: if checked == 0 {
                0.0
            } else {
                (reachable as f64 / checked as f64) * 100.0
            },
        })
        .collect()
}

/// Filtered view over only the reachable endpoints, plain and detailed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReachableReport {
    /// Number of endpoints checked overall
    pub checked: usize,
    /// Number of endpoints that answered at least once
    pub reachable_count: usize,
    /// Plain list sorted ascending by mean latency
    pub endpoints: Vec<ReachableEntry>,
    /// Detailed reports for the reachable endpoints, same order
    pub reports: Vec<EndpointReport>,
}

/// Build the reachable-only view from the full report set
pub fn reachable_report(reports: &[EndpointReport]) -> ReachableReport {
    let mut detailed: Vec<EndpointReport> = reports
        .iter()
        .filter(|r| r.is_reachable())
        .cloned()
        .collect();

    detailed.sort_by(|a, b| {
        a.statistics
            .avg_ms
            .partial_cmp(&b.statistics.avg_ms)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let endpoints = detailed
        .iter()
        .map(|r| ReachableEntry {
            name: r.endpoint.name.clone(),
            address: r.endpoint.address.clone(),
            category: r.endpoint.category,
            avg_latency_ms: r.statistics.avg_ms,
        })
        .collect();

    ReachableReport {
        checked: reports.len(),
        reachable_count: detailed.len(),
        endpoints,
        reports: detailed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Endpoint;
    use crate::models::{FailureKind, ProbeOutcome};
    use crate::types::ProbeMethod;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn report_with(name: &str, address: &str, outcomes: Vec<ProbeOutcome>) -> EndpointReport {
        EndpointReport::from_attempts(Endpoint::new(name, address), outcomes, None, Utc::now())
    }

    fn success_ms(latency: u64) -> ProbeOutcome {
        ProbeOutcome::success(ms(latency), 200, ProbeMethod::Head)
    }

    fn failed() -> ProbeOutcome {
        ProbeOutcome::failure(FailureKind::Transport, "refused", ms(5))
    }

    #[test]
    fn test_statistics_empty_sample_set() {
        let stats = LatencyStatistics::from_samples(&[], 5);

        assert_eq!(stats.min_ms, 0.0);
        assert_eq!(stats.max_ms, 0.0);
        assert_eq!(stats.avg_ms, 0.0);
        assert_eq!(stats.std_dev_ms, 0.0);
        assert_eq!(stats.loss_pct, 100.0);
        assert_eq!(stats.sample_count, 0);
    }

    #[test]
    fn test_statistics_known_samples() {
        let samples = [ms(10), ms(20), ms(30)];
        let stats = LatencyStatistics::from_samples(&samples, 3);

        assert_eq!(stats.min_ms, 10.0);
        assert_eq!(stats.max_ms, 30.0);
        assert_eq!(stats.avg_ms, 20.0);
        assert!((stats.std_dev_ms - 8.165).abs() < 0.001);
        assert_eq!(stats.loss_pct, 0.0);
        assert_eq!(stats.sample_count, 3);
    }

    #[test]
    fn test_statistics_partial_loss() {
        let samples = [ms(10), ms(20), ms(30)];
        let stats = LatencyStatistics::from_samples(&samples, 5);

        assert!((stats.loss_pct - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_statistics_single_sample_has_zero_deviation() {
        let stats = LatencyStatistics::from_samples(&[ms(42)], 1);

        assert_eq!(stats.min_ms, 42.0);
        assert_eq!(stats.max_ms, 42.0);
        assert_eq!(stats.avg_ms, 42.0);
        assert_eq!(stats.std_dev_ms, 0.0);
    }

    #[test]
    fn test_run_summary_counts_and_rate() {
        let reports = vec![
            report_with("A", "http://a.example", vec![success_ms(30), success_ms(50)]),
            report_with("B", "http://b.example", vec![success_ms(10), failed()]),
            report_with("C", "http://c.example", vec![failed(), failed()]),
        ];

        let summary =
            RunSummary::from_reports(Uuid::new_v4(), Utc::now(), Duration::from_secs(2), &reports);

        assert_eq!(summary.checked, 3);
        assert_eq!(summary.fully_reachable, 1);
        assert_eq!(summary.partially_reachable, 1);
        assert_eq!(summary.unreachable, 1);
        assert_eq!(summary.reachable_count(), 2);
        assert!((summary.success_rate - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_run_summary_sorted_by_latency() {
        let reports = vec![
            report_with("Slow", "http://slow.example", vec![success_ms(300)]),
            report_with("Fast", "http://fast.example", vec![success_ms(20)]),
            report_with("Mid", "http://mid.example", vec![success_ms(150)]),
        ];

        let summary =
            RunSummary::from_reports(Uuid::new_v4(), Utc::now(), Duration::from_secs(1), &reports);

        let names: Vec<&str> = summary.reachable.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Fast", "Mid", "Slow"]);
        assert_eq!(summary.fastest().unwrap().name, "Fast");
    }

    #[test]
    fn test_run_summary_empty_input() {
        let summary =
            RunSummary::from_reports(Uuid::new_v4(), Utc::now(), Duration::ZERO, &[]);

        assert_eq!(summary.checked, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert!(summary.reachable.is_empty());
        assert!(summary.categories.is_empty());
        assert!(summary.fastest().is_none());
    }

    #[test]
    fn test_category_breakdown() {
        let mut ftp = Endpoint::new("FTP", "http://ftp.example");
        ftp.category = Category::FileTransfer;
        let mut media = Endpoint::new("TV", "http://tv.example");
        media.category = Category::MediaStreaming;

        let reports = vec![
            EndpointReport::from_attempts(ftp, vec![success_ms(10)], None, Utc::now()),
            EndpointReport::from_attempts(media, vec![failed()], None, Utc::now()),
        ];

        let breakdown = category_breakdown(&reports);
        assert_eq!(breakdown.len(), 2);

        let ftp_group = breakdown
            .iter()
            .find(|b| b.category == Category::FileTransfer)
            .unwrap();
        assert_eq!(ftp_group.checked, 1);
        assert_eq!(ftp_group.reachable, 1);
        assert_eq!(ftp_group.success_rate, 100.0);

        let media_group = breakdown
            .iter()
            .find(|b| b.category == Category::MediaStreaming)
            .unwrap();
        assert_eq!(media_group.unreachable, 1);
        assert_eq!(media_group.success_rate, 0.0);
    }

    #[test]
    fn test_reachable_report_filters_and_sorts() {
        let reports = vec![
            report_with("Gone", "http://gone.example", vec![failed()]),
            report_with("Slow", "http://slow.example", vec![success_ms(200)]),
            report_with("Fast", "http://fast.example", vec![success_ms(15)]),
        ];

        let view = reachable_report(&reports);

        assert_eq!(view.checked, 3);
        assert_eq!(view.reachable_count, 2);
        assert_eq!(view.endpoints.len(), 2);
        assert_eq!(view.endpoints[0].name, "Fast");
        assert_eq!(view.reports[1].endpoint.name, "Slow");
    }
}
