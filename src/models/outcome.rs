//! Probe outcome and per-endpoint report data models

use crate::catalog::Endpoint;
use crate::stats::LatencyStatistics;
use crate::types::{ProbeMethod, ReachabilityStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Failure category for an unsuccessful probe attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Hostname could not be resolved
    Dns,
    /// Connection or protocol failure
    Transport,
    /// The per-attempt timeout elapsed
    Timeout,
    /// The address could not be parsed into a probeable URL
    MalformedAddress,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Dns => "dns",
            FailureKind::Transport => "transport",
            FailureKind::Timeout => "timeout",
            FailureKind::MalformedAddress => "malformed_address",
        }
    }
}

/// One reachability result for one endpoint at one attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The endpoint answered
    Success {
        /// Elapsed wall-clock time for the attempt
        latency: Duration,
        /// HTTP status code received
        http_status: u16,
        /// Method that produced the answer
        method: ProbeMethod,
        /// When the attempt was executed
        timestamp: DateTime<Utc>,
    },
    /// The attempt failed
    Failure {
        /// Failure category
        kind: FailureKind,
        /// Human-readable cause
        detail: String,
        /// Elapsed wall-clock time until the failure
        elapsed: Duration,
        /// When the attempt was executed
        timestamp: DateTime<Utc>,
    },
}

impl ProbeOutcome {
    /// Create a successful outcome
    pub fn success(latency: Duration, http_status: u16, method: ProbeMethod) -> Self {
        Self::Success {
            latency,
            http_status,
            method,
            timestamp: Utc::now(),
        }
    }

    /// Create a failed outcome
    pub fn failure<S: Into<String>>(kind: FailureKind, detail: S, elapsed: Duration) -> Self {
        Self::Failure {
            kind,
            detail: detail.into(),
            elapsed,
            timestamp: Utc::now(),
        }
    }

    /// Create a timed-out outcome
    pub fn timed_out(timeout: Duration, elapsed: Duration) -> Self {
        Self::failure(
            FailureKind::Timeout,
            format!("No response within {} ms", timeout.as_millis()),
            elapsed,
        )
    }

    /// Whether this attempt reached the endpoint
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Latency of a successful attempt
    pub fn latency(&self) -> Option<Duration> {
        match self {
            Self::Success { latency, .. } => Some(*latency),
            Self::Failure { .. } => None,
        }
    }

    /// Elapsed wall-clock time regardless of outcome
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::Success { latency, .. } => *latency,
            Self::Failure { elapsed, .. } => *elapsed,
        }
    }

    /// Elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Failure detail for an unsuccessful attempt
    pub fn error_detail(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { detail, .. } => Some(detail),
        }
    }

    /// Failure kind for an unsuccessful attempt
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// DNS resolution info recorded for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsResolution {
    /// First resolved address, if any
    pub resolved_ip: Option<IpAddr>,
    /// All resolved addresses
    pub all_ips: Vec<IpAddr>,
    /// Time taken by the resolution
    pub resolution_time: Duration,
    /// Resolution error, if the lookup failed
    pub error: Option<String>,
}

impl DnsResolution {
    /// Create a successful resolution record
    pub fn resolved(ips: Vec<IpAddr>, resolution_time: Duration) -> Self {
        Self {
            resolved_ip: ips.first().copied(),
            all_ips: ips,
            resolution_time,
            error: None,
        }
    }

    /// Create a failed resolution record
    pub fn failed<S: Into<String>>(error: S, resolution_time: Duration) -> Self {
        Self {
            resolved_ip: None,
            all_ips: Vec::new(),
            resolution_time,
            error: Some(error.into()),
        }
    }

    /// Whether the lookup produced at least one address
    pub fn is_resolved(&self) -> bool {
        self.resolved_ip.is_some()
    }
}

/// Detailed per-endpoint record produced by the multi-attempt dispatcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointReport {
    /// The endpoint that was probed
    pub endpoint: Endpoint,

    /// Classification from the attempt success ratio
    pub status: ReachabilityStatus,

    /// Total number of attempts issued
    pub attempt_count: u32,

    /// Number of successful attempts
    pub success_count: u32,

    /// Packet-loss percentage (failed / total × 100)
    pub loss_pct: f64,

    /// Latency statistics over the successful attempts
    pub statistics: LatencyStatistics,

    /// DNS resolution info, when the inspection step ran
    pub dns: Option<DnsResolution>,

    /// Declared URL scheme of the address
    pub scheme: Option<String>,

    /// Declared or default port of the address
    pub port: Option<u16>,

    /// Raw per-attempt outcomes, in attempt order
    pub attempts: Vec<ProbeOutcome>,

    /// When probing of this endpoint started
    pub started_at: DateTime<Utc>,

    /// When probing of this endpoint completed
    pub completed_at: DateTime<Utc>,
}

impl EndpointReport {
    /// Build a report from the raw attempt outcomes of one endpoint
    pub fn from_attempts(
        endpoint: Endpoint,
        attempts: Vec<ProbeOutcome>,
        dns: Option<DnsResolution>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let attempt_count = attempts.len() as u32;
        let success_count = attempts.iter().filter(|a| a.is_success()).count() as u32;
        let status = ReachabilityStatus::from_counts(success_count, attempt_count);

        let samples: Vec<Duration> = attempts.iter().filter_map(|a| a.latency()).collect();
        let statistics = LatencyStatistics::from_samples(&samples, attempt_count as usize);

        let scheme = endpoint.scheme();
        let port = endpoint.port();

        Self {
            endpoint,
            status,
            attempt_count,
            success_count,
            loss_pct: statistics.loss_pct,
            statistics,
            dns,
            scheme,
            port,
            attempts,
            started_at,
            completed_at: Utc::now(),
        }
    }

    /// Whether the endpoint answered at least once
    pub fn is_reachable(&self) -> bool {
        self.status.is_reachable()
    }

    /// Mean latency in milliseconds over successful attempts, if any
    pub fn mean_latency_ms(&self) -> Option<f64> {
        if self.success_count > 0 {
            Some(self.statistics.avg_ms)
        } else {
            None
        }
    }

    /// First failure detail across the attempts, for display
    pub fn first_error(&self) -> Option<&str> {
        self.attempts.iter().find_map(|a| a.error_detail())
    }
}
