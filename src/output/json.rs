//! JSON result artifact writer

use crate::error::{AppError, Result};
use crate::models::EndpointReport;
use crate::stats::{ReachableReport, RunSummary};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The structured artifact persisted at the end of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultArtifact {
    /// Run-level summary
    pub summary: RunSummary,
    /// Detailed per-endpoint reports
    pub reports: Vec<EndpointReport>,
    /// Reachable-only filtered view
    pub reachable: ReachableReport,
}

impl ResultArtifact {
    /// Assemble the artifact from the run's aggregates
    pub fn new(
        summary: RunSummary,
        reports: Vec<EndpointReport>,
        reachable: ReachableReport,
    ) -> Self {
        Self {
            summary,
            reports,
            reachable,
        }
    }
}

/// Writes the result artifact to disk as pretty-printed JSON
pub struct ResultWriter;

impl ResultWriter {
    /// Serialize the artifact
    pub fn to_json(artifact: &ResultArtifact) -> Result<String> {
        serde_json::to_string_pretty(artifact)
            .map_err(|e| AppError::internal(format!("Failed to serialize results: {}", e)))
    }

    /// Write the artifact to the given path
    pub fn write<P: AsRef<Path>>(artifact: &ResultArtifact, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = Self::to_json(artifact)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::io(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        fs::write(path, json)
            .map_err(|e| AppError::io(format!("Failed to write {}: {}", path.display(), e)))
    }
}
