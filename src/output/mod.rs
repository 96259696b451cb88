//! Output formatting and result persistence
//!
//! Thin glue over the in-memory aggregates: a console renderer with plain
//! and colored formatters, and a JSON writer for the structured artifact.

mod formatter;
mod json;

pub use formatter::{ColoredFormatter, OutputFormatter, PlainFormatter};
pub use json::{ResultArtifact, ResultWriter};

use crate::error::Result;
use crate::models::EndpointReport;
use crate::stats::{ReachableReport, RunSummary};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new(verbose))
        } else {
            Box::new(PlainFormatter::new(verbose))
        }
    }
}

/// Console report renderer over a formatter
pub struct ReportRenderer {
    formatter: Box<dyn OutputFormatter>,
}

impl ReportRenderer {
    /// Create a renderer with the given formatter
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    /// Render the complete console report
    pub fn render(
        &self,
        summary: &RunSummary,
        reports: &[EndpointReport],
        reachable: &ReachableReport,
    ) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.formatter.format_header("Connectivity Test Results")?);
        output.push_str("\n\n");

        output.push_str(&self.formatter.format_run_summary(summary)?);
        output.push_str("\n\n");

        output.push_str(&self.formatter.format_endpoint_table(reports)?);
        output.push_str("\n\n");

        output.push_str(&self.formatter.format_reachable_list(reachable)?);

        if !summary.categories.is_empty() {
            output.push_str("\n\n");
            output.push_str(&self.formatter.format_category_breakdown(&summary.categories)?);
        }

        Ok(output)
    }
}
