//! Probe dispatch engine
//!
//! One dispatcher, parameterized by a [`ProbePlan`], covers both run modes:
//! the thorough multi-attempt mode and the fast single-pass mode. Endpoints
//! are partitioned into fixed-size batches; all probes within a batch run
//! concurrently behind a join barrier; batches run strictly sequentially
//! with a fixed inter-batch delay.

pub mod dns;
pub mod http;

pub use dns::DnsInspector;
pub use http::HttpProber;

use crate::catalog::Endpoint;
use crate::logging::ProbeLogger;
use crate::models::{DnsResolution, EndpointReport, ProbeOutcome};
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// A single reachability check. Implementations catch every failure and
/// map it to a [`ProbeOutcome`]; nothing propagates past this boundary.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Perform one reachability attempt against an address
    async fn probe_once(&self, address: &str, timeout: Duration) -> ProbeOutcome;
}

/// Execution parameters for one probe run
#[derive(Debug, Clone, PartialEq)]
pub struct ProbePlan {
    /// Attempts per endpoint
    pub attempts: u32,
    /// Delay between attempts against the same endpoint
    pub attempt_delay: Duration,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Endpoints probed concurrently per batch
    pub batch_size: usize,
    /// Delay between batches
    pub batch_delay: Duration,
    /// Run the DNS inspection step before the attempts
    pub resolve_dns: bool,
}

impl ProbePlan {
    /// Multi-attempt plan with the default constants
    pub fn thorough() -> Self {
        Self {
            attempts: crate::defaults::DEFAULT_ATTEMPT_COUNT,
            attempt_delay: crate::defaults::DEFAULT_ATTEMPT_DELAY,
            timeout: crate::defaults::DEFAULT_TIMEOUT,
            batch_size: crate::defaults::default_batch_size(),
            batch_delay: crate::defaults::DEFAULT_BATCH_DELAY,
            resolve_dns: true,
        }
    }

    /// Single-pass plan: one attempt per endpoint, one batch covering
    /// every endpoint, no delays, each probe bounded only by its own
    /// timeout
    pub fn fast() -> Self {
        Self {
            attempts: 1,
            attempt_delay: Duration::ZERO,
            timeout: crate::defaults::FAST_TIMEOUT,
            batch_size: usize::MAX,
            batch_delay: Duration::ZERO,
            resolve_dns: false,
        }
    }

    /// Derive the plan from the application configuration
    pub fn from_config(config: &crate::models::Config) -> Self {
        if config.fast {
            return Self::fast();
        }

        Self {
            attempts: config.attempt_count,
            attempt_delay: config.attempt_delay(),
            timeout: config.timeout(),
            batch_size: config.batch_size,
            batch_delay: config.batch_delay(),
            resolve_dns: config.resolve_dns,
        }
    }

    /// Batch size clamped to the endpoint count
    pub fn effective_batch_size(&self, endpoint_count: usize) -> usize {
        self.batch_size.max(1).min(endpoint_count.max(1))
    }
}

impl Default for ProbePlan {
    fn default() -> Self {
        Self::thorough()
    }
}

/// System resource information for default concurrency sizing
#[derive(Debug, Clone)]
pub struct SystemResources {
    /// Number of logical CPU cores
    pub cpu_cores: usize,
    /// Suggested batch size for I/O bound probing
    pub suggested_batch_size: usize,
}

impl SystemResources {
    /// Detect system resources and calculate a batch-size suggestion.
    /// 2x CPU cores for I/O bound operations, capped at reasonable limits.
    pub fn detect() -> Self {
        let cpu_cores = num_cpus::get();
        let suggested_batch_size = (cpu_cores * 2).clamp(4, 50);

        Self {
            cpu_cores,
            suggested_batch_size,
        }
    }
}

/// Partition `total` endpoints into index ranges of at most `batch_size`,
/// preserving order. Yields ceil(total / batch_size) ranges.
pub fn partition_batches(total: usize, batch_size: usize) -> Vec<Range<usize>> {
    if total == 0 {
        return Vec::new();
    }

    let size = batch_size.max(1).min(total);
    (0..total)
        .step_by(size)
        .map(|start| start..(start + size).min(total))
        .collect()
}

/// Batch-probing dispatcher
pub struct ProbeDispatcher<P: Prober> {
    prober: Arc<P>,
    dns: Option<Arc<DnsInspector>>,
    logger: Option<ProbeLogger>,
    plan: ProbePlan,
}

impl<P: Prober> ProbeDispatcher<P> {
    /// Create a dispatcher over a prober and a plan
    pub fn new(prober: P, plan: ProbePlan) -> Self {
        Self {
            prober: Arc::new(prober),
            dns: None,
            logger: None,
            plan,
        }
    }

    /// Attach a DNS inspector for the optional resolution step
    pub fn with_dns(mut self, dns: DnsInspector) -> Self {
        self.dns = Some(Arc::new(dns));
        self
    }

    /// Attach a probe logger for batch and attempt events
    pub fn with_logger(mut self, logger: ProbeLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The plan this dispatcher runs with
    pub fn plan(&self) -> &ProbePlan {
        &self.plan
    }

    /// Probe every endpoint, batched, and collect one report per endpoint
    /// in the input order. One probe's failure never affects another.
    pub async fn dispatch(&self, endpoints: &[Endpoint]) -> Vec<EndpointReport> {
        if endpoints.is_empty() {
            return Vec::new();
        }

        let batch_size = self.plan.effective_batch_size(endpoints.len());
        let batches = partition_batches(endpoints.len(), batch_size);
        let batch_count = batches.len();

        let mut reports = Vec::with_capacity(endpoints.len());

        for (index, range) in batches.into_iter().enumerate() {
            let chunk = &endpoints[range];

            if let Some(logger) = &self.logger {
                logger.batch_started(index, batch_count, chunk.len()).await;
            }

            let probes = chunk.iter().map(|endpoint| self.probe_endpoint(endpoint));

            // Join barrier: the next batch starts only after every probe
            // in this one has finished or timed out.
            reports.extend(join_all(probes).await);

            if index + 1 < batch_count && !self.plan.batch_delay.is_zero() {
                sleep(self.plan.batch_delay).await;
            }
        }

        reports
    }

    /// Probe a single endpoint: optional DNS inspection, then the fixed
    /// number of sequential attempts with the inter-attempt delay.
    pub async fn probe_endpoint(&self, endpoint: &Endpoint) -> EndpointReport {
        let started_at = Utc::now();

        let dns = self.inspect_dns(endpoint).await;

        let mut attempts = Vec::with_capacity(self.plan.attempts as usize);
        for attempt in 0..self.plan.attempts {
            let outcome = self
                .prober
                .probe_once(&endpoint.address, self.plan.timeout)
                .await;

            if let Some(logger) = &self.logger {
                logger
                    .attempt_finished(&endpoint.address, outcome.is_success(), outcome.elapsed_ms())
                    .await;
            }

            attempts.push(outcome);

            if attempt + 1 < self.plan.attempts && !self.plan.attempt_delay.is_zero() {
                sleep(self.plan.attempt_delay).await;
            }
        }

        let report = EndpointReport::from_attempts(endpoint.clone(), attempts, dns, started_at);

        if let Some(logger) = &self.logger {
            logger
                .endpoint_classified(&endpoint.address, report.status.label(), report.loss_pct)
                .await;
        }

        report
    }

    /// Run the DNS inspection step when enabled. Reporting only: a
    /// resolution failure is recorded and never skips the attempts.
    async fn inspect_dns(&self, endpoint: &Endpoint) -> Option<DnsResolution> {
        if !self.plan.resolve_dns {
            return None;
        }

        let inspector = self.dns.as_ref()?;
        Some(inspector.inspect(&endpoint.address).await)
    }
}
