//! Simple metrics module for the route enrichment pipeline
//!
//! This module provides a straightforward API for recording metrics using
//! the standard Prometheus naming conventions.

use std::fmt;
use tracing::info;

/// Enum representing all metric names used in the system
/// This eliminates magic strings and provides compile-time safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Enrich metrics
    EnrichRecordsProcessed,
    EnrichBatchesProcessed,
    EnrichBatchSize,

    // Pipeline run metrics
    PipelineRuns,
    PipelineRowErrors,
    PipelineDuration,
}

impl MetricName {
    /// Get the metric name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::EnrichRecordsProcessed => "routes_enrich_records_processed_total",
            MetricName::EnrichBatchesProcessed => "routes_enrich_batches_processed_total",
            MetricName::EnrichBatchSize => "routes_enrich_batch_size",
            MetricName::PipelineRuns => "routes_pipeline_runs_total",
            MetricName::PipelineRowErrors => "routes_pipeline_row_errors_total",
            MetricName::PipelineDuration => "routes_pipeline_duration_seconds",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Install the Prometheus recorder for the process
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;

    info!("Metrics system initialized");
    Ok(())
}

// ============================================================================
// Enrich Metrics
// ============================================================================

pub mod enrich {
    use super::MetricName;

    /// Record that a record was enriched, labeled by derived categories
    pub fn record_enriched(distance_category: &str, route_type: &str) {
        ::metrics::counter!(MetricName::EnrichRecordsProcessed.as_str(),
            "distance_category" => distance_category.to_string(),
            "route_type" => route_type.to_string()
        )
        .increment(1);
    }

    /// Record that a batch was processed through enrichment
    pub fn batch_processed(batch_size: usize) {
        ::metrics::histogram!(MetricName::EnrichBatchSize.as_str()).record(batch_size as f64);
        ::metrics::counter!(MetricName::EnrichBatchesProcessed.as_str()).increment(1);
    }
}

// ============================================================================
// Pipeline Run Metrics
// ============================================================================

pub mod pipeline {
    use super::MetricName;

    /// Count a pipeline run
    pub fn run_started() {
        ::metrics::counter!(MetricName::PipelineRuns.as_str()).increment(1);
    }

    /// Count rows that failed to decode during a run
    pub fn row_errors(count: u64) {
        ::metrics::counter!(MetricName::PipelineRowErrors.as_str()).increment(count);
    }

    /// Record total run duration
    pub fn run_duration(secs: f64) {
        ::metrics::histogram!(MetricName::PipelineDuration.as_str()).record(secs);
    }
}
