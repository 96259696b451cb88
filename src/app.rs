//! Main application orchestration
//!
//! Composes the pipeline: load catalog → dedupe → probe (concurrently,
//! batched) → aggregate → report.

use crate::{
    catalog::{self, Endpoint},
    cli::Cli,
    config::{load_config, validate_config},
    error::{AppError, Result},
    logging::{Logger, ProbeLogger},
    models::Config,
    output::{OutputFormatterFactory, ReportRenderer, ResultArtifact, ResultWriter},
    probe::{DnsInspector, HttpProber, ProbeDispatcher, ProbePlan},
    stats::{reachable_report, RunSummary},
};
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Result<Self> {
        cli.validate().map_err(AppError::validation)?;
        Ok(Self { cli })
    }

    /// Run the application
    pub async fn run(self) -> Result<()> {
        let config = load_config(self.cli.clone())?;
        let logger = Logger::with_config("app".to_string(), &config);

        let run_id_text = logger.start_run().await;
        let run_id = Uuid::parse_str(&run_id_text).unwrap_or_default();

        // Display validation warnings
        let warnings = validate_config(&config)?;
        if !warnings.is_empty() {
            for warning in &warnings {
                eprintln!("{}", warning.format(config.enable_color));
            }
        }

        if config.debug {
            println!("Configuration Summary:");
            println!("{}", crate::config::display_config_summary(&config));
            println!();
        }

        // Load the catalog into an immutable endpoint table
        let endpoints = self.load_endpoints(&config, &logger).await?;
        let unique = catalog::dedupe_endpoints(&endpoints);

        logger
            .info("Catalog loaded")
            .field("total", endpoints.len())
            .field("unique", unique.len())
            .log()
            .await;

        if unique.is_empty() {
            return Err(AppError::catalog("No endpoints to probe"));
        }

        // Build the dispatcher from the unified plan
        let plan = ProbePlan::from_config(&config);
        let prober = HttpProber::new()?;
        let mut dispatcher = ProbeDispatcher::new(prober, plan.clone())
            .with_logger(ProbeLogger::with_config(&config));

        if plan.resolve_dns {
            match DnsInspector::from_system() {
                Ok(inspector) => dispatcher = dispatcher.with_dns(inspector),
                Err(e) => {
                    // DNS inspection is reporting-only; carry on without it
                    logger
                        .warn("DNS inspection disabled")
                        .field("cause", e.to_string())
                        .log()
                        .await;
                }
            }
        }

        if config.verbose || config.debug {
            println!(
                "Probing {} endpoints ({} attempts each, batch size {}, timeout {}s)",
                unique.len(),
                plan.attempts,
                plan.effective_batch_size(unique.len()),
                plan.timeout.as_secs()
            );
            println!();
        }

        // Probe and aggregate
        let started_at = chrono::Utc::now();
        let probe_start = Instant::now();
        let reports = dispatcher.dispatch(&unique).await;
        let total_duration = probe_start.elapsed();

        let summary = RunSummary::from_reports(run_id, started_at, total_duration, &reports);
        let reachable = reachable_report(&reports);

        logger
            .info("Probe run completed")
            .field("checked", summary.checked)
            .field("reachable", summary.reachable_count())
            .field("success_rate", summary.success_rate)
            .log()
            .await;

        // Persist the structured artifact when requested
        if let Some(ref output_path) = config.output_path {
            let artifact =
                ResultArtifact::new(summary.clone(), reports.clone(), reachable.clone());
            ResultWriter::write(&artifact, output_path)?;

            if config.verbose || config.debug {
                println!("Results written to {}", output_path);
            }
        }

        // Render the console report
        let formatter =
            OutputFormatterFactory::create_formatter(config.enable_color, config.verbose);
        let renderer = ReportRenderer::new(formatter);
        println!("{}", renderer.render(&summary, &reports, &reachable)?);

        if summary.reachable_count() == 0 {
            return Err(AppError::probe_run(
                "No endpoint was reachable - check network connectivity",
            ));
        }

        Ok(())
    }

    /// Load catalog endpoints plus any ad-hoc --url endpoints. A missing
    /// catalog file is fatal unless ad-hoc endpoints were given.
    async fn load_endpoints(&self, config: &Config, logger: &Logger) -> Result<Vec<Endpoint>> {
        let catalog_exists = Path::new(&config.catalog_path).exists();

        let mut endpoints = if catalog_exists {
            catalog::load_catalog(&config.catalog_path)?
        } else if config.extra_urls.is_empty() {
            return Err(AppError::catalog(format!(
                "Catalog file not found: {}",
                config.catalog_path
            )));
        } else {
            logger
                .warn("Catalog file missing, probing ad-hoc endpoints only")
                .field("catalog_path", config.catalog_path.as_str())
                .log()
                .await;
            Vec::new()
        };

        for url in &config.extra_urls {
            endpoints.push(Endpoint::new(url.clone(), url.clone()));
        }

        Ok(endpoints)
    }
}
