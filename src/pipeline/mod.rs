pub mod processing;
pub mod sink;
pub mod source;

use chrono::Utc;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::app::enrich_use_case::EnrichUseCase;
use crate::config::PipelineConfig;
use crate::error::{EnricherError, Result};
use crate::files;
use crate::observability::metrics;
use crate::pipeline::processing::enrich::{DefaultRouteEnricher, MetricsRouteEnricher};
use crate::pipeline::sink::JsonlRouteSink;
use crate::pipeline::source::read_base_routes;

/// Result of a complete enrichment run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub input_file: String,
    pub output_file: String,
    pub total_rows: usize,
    pub enriched_rows: usize,
    pub row_errors: Vec<String>,
    pub archived_to: Option<String>,
    pub duration_secs: f64,
}

/// Batch runner: reads staged base route rows, enriches every row, and
/// materializes the enriched rows to a timestamped output file.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Enrich one explicit input file.
    #[instrument(skip(self), fields(input = %input.display()))]
    pub async fn run_file(&self, input: &Path) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        info!("🚀 Starting enrichment run {}", run_id);
        metrics::pipeline::run_started();
        let t_run = std::time::Instant::now();

        if !files::is_nonempty_file(input) {
            if input.exists() {
                return Err(EnricherError::EmptyInput(input.to_path_buf()));
            }
            return Err(EnricherError::InputNotFound(input.to_path_buf()));
        }

        // Step 1: read staged rows
        info!("📄 Reading base routes from {}", input.display());
        let batch = read_base_routes(input)?;
        let total_rows = batch.records.len() + batch.row_errors.len();
        info!(
            "✅ Read {} rows ({} undecodable)",
            total_rows,
            batch.row_errors.len()
        );
        if !batch.row_errors.is_empty() {
            warn!(
                "{} rows could not be decoded and were skipped",
                batch.row_errors.len()
            );
            metrics::pipeline::row_errors(batch.row_errors.len() as u64);
        }

        // Step 2: enrich and materialize
        let output_path = self.output_path(input);
        let sink = Arc::new(JsonlRouteSink::create(&output_path)?);
        let enricher = MetricsRouteEnricher::new(DefaultRouteEnricher::with_bands(
            self.config.distance_bands(),
        ));
        let use_case = EnrichUseCase::new(Box::new(enricher), Box::new(sink.clone()));

        let enriched = use_case
            .enrich_batch(&batch.records)
            .await
            .map_err(|e| EnricherError::Sink(e.to_string()))?;
        sink.flush()?;
        info!(
            "💾 Wrote {} enriched rows to {}",
            enriched.len(),
            output_path.display()
        );

        let stats = EnrichUseCase::batch_stats(&enriched);
        info!(
            "📊 Distance mix: {} short / {} medium / {} long / {} unknown; {} domestic, {} international",
            stats.short_haul,
            stats.medium_haul,
            stats.long_haul,
            stats.unknown_distance,
            stats.domestic,
            stats.international
        );

        let duration_secs = t_run.elapsed().as_secs_f64();
        metrics::pipeline::run_duration(duration_secs);

        Ok(RunSummary {
            run_id,
            input_file: input.to_string_lossy().to_string(),
            output_file: output_path.to_string_lossy().to_string(),
            total_rows,
            enriched_rows: enriched.len(),
            row_errors: batch
                .row_errors
                .iter()
                .map(|e| format!("row {}: {}", e.line, e.message))
                .collect(),
            archived_to: None,
            duration_secs,
        })
    }

    /// Discover the newest staged file in the incoming directory, enrich it,
    /// and archive it. Returns `None` when there is nothing to process.
    #[instrument(skip(self))]
    pub async fn run_incoming(&self) -> Result<Option<RunSummary>> {
        let incoming_dir = Path::new(&self.config.incoming_dir);
        let latest =
            files::find_latest_incoming(incoming_dir, &self.config.incoming_prefix)?;

        let Some(input) = latest else {
            info!(
                "No '{}*' files found in {}; nothing to do",
                self.config.incoming_prefix,
                incoming_dir.display()
            );
            return Ok(None);
        };

        let mut summary = self.run_file(&input).await?;

        let archived = files::archive_processed(&input, Path::new(&self.config.processed_dir))?;
        info!("📦 Archived input to {}", archived.display());
        summary.archived_to = Some(archived.to_string_lossy().to_string());

        Ok(Some(summary))
    }

    /// Timestamped output path for one run
    fn output_path(&self, input: &Path) -> std::path::PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("routes");
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        Path::new(&self.config.output_dir).join(format!("{stem}_enriched_{timestamp}.jsonl"))
    }
}
