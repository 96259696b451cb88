//! Endpoint Connectivity Tester
//!
//! A batch connectivity tester: given a static catalog of network endpoints,
//! it probes each one for reachability and latency with bounded concurrency
//! and per-check timeouts, then reports aggregated results.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use catalog::{dedupe_endpoints, load_catalog, Category, Endpoint};
pub use error::{AppError, Result};
pub use models::{Config, DnsResolution, EndpointReport, FailureKind, ProbeOutcome};
pub use output::{OutputFormatter, OutputFormatterFactory, ReportRenderer, ResultWriter};
pub use probe::{partition_batches, HttpProber, ProbeDispatcher, ProbePlan, Prober};
pub use stats::{reachable_report, LatencyStatistics, ReachableReport, RunSummary};
pub use types::ReachabilityStatus;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_ATTEMPT_COUNT: u32 = 5;
    pub const DEFAULT_ATTEMPT_DELAY: Duration = Duration::from_millis(500);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    pub const FAST_TIMEOUT: Duration = Duration::from_secs(3);
    pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(1);
    pub const DEFAULT_CATALOG_PATH: &str = "data/endpoints.json";
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Default batch size derived from system resources
    pub fn default_batch_size() -> usize {
        crate::probe::SystemResources::detect().suggested_batch_size
    }
}
