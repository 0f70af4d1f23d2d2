use anyhow::Result;

use crate::app::ports::EnrichedOutputPort;
use crate::domain::{BaseRouteRecord, DistanceCategory, EnrichedRouteRecord, RouteType};
use crate::pipeline::processing::enrich::{
    DefaultRouteEnricher, MetricsRouteEnricher, RouteEnricher,
};

/// Use case for enriching base route records with derived analytics columns
pub struct EnrichUseCase {
    enricher: Box<dyn RouteEnricher>,
    output: Box<dyn EnrichedOutputPort>,
}

impl EnrichUseCase {
    pub fn new(enricher: Box<dyn RouteEnricher>, output: Box<dyn EnrichedOutputPort>) -> Self {
        Self { enricher, output }
    }

    /// Create a use case with the default enricher
    pub fn with_default_enricher(output: Box<dyn EnrichedOutputPort>) -> Self {
        Self {
            enricher: Box::new(MetricsRouteEnricher::new(DefaultRouteEnricher::new())),
            output,
        }
    }

    /// Enrich a single base route record and write it to the output
    pub async fn enrich_record(&self, record: &BaseRouteRecord) -> Result<EnrichedRouteRecord> {
        let enriched = self.enricher.enrich(record);

        self.output.write_enriched_record(&enriched).await?;

        Ok(enriched)
    }

    /// Enrich multiple base route records in batch
    pub async fn enrich_batch(
        &self,
        records: &[BaseRouteRecord],
    ) -> Result<Vec<EnrichedRouteRecord>> {
        let mut all_enriched = Vec::with_capacity(records.len());

        for record in records {
            let enriched = self.enrich_record(record).await?;
            all_enriched.push(enriched);
        }

        crate::observability::metrics::enrich::batch_processed(records.len());
        Ok(all_enriched)
    }

    /// Summarize the derived-column distribution of a batch
    pub fn batch_stats(enriched_records: &[EnrichedRouteRecord]) -> EnrichBatchStats {
        let mut stats = EnrichBatchStats::default();

        for record in enriched_records {
            stats.total_records += 1;

            match record.distance_category {
                DistanceCategory::ShortHaul => stats.short_haul += 1,
                DistanceCategory::MediumHaul => stats.medium_haul += 1,
                DistanceCategory::LongHaul => stats.long_haul += 1,
                DistanceCategory::Unknown => stats.unknown_distance += 1,
            }

            if record.route_type == RouteType::Domestic {
                stats.domestic += 1;
            } else {
                stats.international += 1;
            }
        }

        stats
    }
}

/// Distribution of derived labels across one enriched batch
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrichBatchStats {
    pub total_records: usize,
    pub short_haul: usize,
    pub medium_haul: usize,
    pub long_haul: usize,
    pub unknown_distance: usize,
    pub domestic: usize,
    pub international: usize,
}
