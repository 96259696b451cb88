//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::time::Duration;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Classification of an endpoint based on its attempt success ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReachabilityStatus {
    /// Every attempt succeeded
    FullyReachable,
    /// Some but not all attempts succeeded
    PartiallyReachable,
    /// No attempt succeeded
    Unreachable,
}

impl ReachabilityStatus {
    /// Classify an endpoint from its attempt counts
    pub fn from_counts(successes: u32, total: u32) -> Self {
        if total == 0 || successes == 0 {
            Self::Unreachable
        } else if successes == total {
            Self::FullyReachable
        } else {
            Self::PartiallyReachable
        }
    }

    /// Whether the endpoint answered at least once
    pub fn is_reachable(&self) -> bool {
        !matches!(self, Self::Unreachable)
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullyReachable => "reachable",
            Self::PartiallyReachable => "partial",
            Self::Unreachable => "unreachable",
        }
    }
}

/// HTTP method used for a reachability attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeMethod {
    /// HEAD request answered
    Head,
    /// HEAD was rejected, GET fallback answered
    GetFallback,
}

impl ProbeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "HEAD",
            Self::GetFallback => "GET",
        }
    }
}

/// Latency classification based on mean response time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceLevel {
    /// Good performance (< 1 second)
    Good,
    /// Moderate performance (1-3 seconds)
    Moderate,
    /// Poor performance (> 3 seconds)
    Poor,
}

impl PerformanceLevel {
    /// Classify performance based on total duration
    pub fn from_duration(duration: Duration) -> Self {
        let secs = duration.as_secs_f64();
        if secs < 1.0 {
            Self::Good
        } else if secs < 3.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    /// Classify performance from a latency in milliseconds
    pub fn from_millis(ms: f64) -> Self {
        Self::from_duration(Duration::from_millis(ms.max(0.0) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_from_counts() {
        assert_eq!(
            ReachabilityStatus::from_counts(5, 5),
            ReachabilityStatus::FullyReachable
        );
        assert_eq!(
            ReachabilityStatus::from_counts(3, 5),
            ReachabilityStatus::PartiallyReachable
        );
        assert_eq!(
            ReachabilityStatus::from_counts(0, 5),
            ReachabilityStatus::Unreachable
        );
        assert_eq!(
            ReachabilityStatus::from_counts(0, 0),
            ReachabilityStatus::Unreachable
        );
    }

    #[test]
    fn test_reachable_predicate() {
        assert!(ReachabilityStatus::FullyReachable.is_reachable());
        assert!(ReachabilityStatus::PartiallyReachable.is_reachable());
        assert!(!ReachabilityStatus::Unreachable.is_reachable());
    }

    #[test]
    fn test_performance_levels() {
        assert_eq!(
            PerformanceLevel::from_duration(Duration::from_millis(200)),
            PerformanceLevel::Good
        );
        assert_eq!(
            PerformanceLevel::from_duration(Duration::from_millis(1500)),
            PerformanceLevel::Moderate
        );
        assert_eq!(
            PerformanceLevel::from_duration(Duration::from_secs(5)),
            PerformanceLevel::Poor
        );
    }
}
