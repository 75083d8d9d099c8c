//! Application execution logic.
//!
//! This module wires the validated configuration into a provisioning
//! pipeline and runs it once.

use thiserror::Error;

use gs_provision::config::ValidatedConfig;
use gs_provision::output::{DryRunWriter, FileOutputWriter, OutputWriter};
use gs_provision::pipeline::{FailurePolicy, Pipeline, PipelineError, RunSummary};
use gs_provision::render::{HandlebarsRenderer, RenderError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The provisioning template could not be compiled.
    #[error("Failed to prepare provisioning template: {0}")]
    Template(#[source] RenderError),

    /// The pipeline aborted.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Executes one provisioning run.
///
/// This function:
/// 1. Compiles the provisioning template
/// 2. Selects the output writer (dry-run or filesystem)
/// 3. Loads the roster and provisions every valid device
///
/// # Errors
///
/// Returns an error if:
/// - The template does not compile
/// - The roster cannot be loaded
/// - A device fails and the failure policy is [`FailurePolicy::Abort`]
pub fn execute(config: &ValidatedConfig) -> Result<RunSummary, RunError> {
    let renderer = HandlebarsRenderer::from_template(&config.template).map_err(RunError::Template)?;

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - documents will be rendered but not written");
        run_with(config, renderer, DryRunWriter)
    } else {
        run_with(config, renderer, FileOutputWriter::new())
    }
}

fn run_with<W: OutputWriter>(
    config: &ValidatedConfig,
    renderer: HandlebarsRenderer,
    writer: W,
) -> Result<RunSummary, RunError> {
    if config.failure_policy == FailurePolicy::Continue {
        tracing::info!("Keep-going mode enabled - failing devices will be skipped");
    }

    let pipeline =
        Pipeline::new(renderer, writer, &config.output_dir).with_policy(config.failure_policy);

    let summary = pipeline.run(&config.devices, &config.base_config)?;
    log_summary(&summary);

    Ok(summary)
}

fn log_summary(summary: &RunSummary) {
    tracing::info!(
        "Provisioning finished: {} written, {} skipped, {} failed",
        summary.written.len(),
        summary.rejected,
        summary.failed.len()
    );
}
