use anyhow::Result;
use async_trait::async_trait;

use crate::domain::EnrichedRouteRecord;

/// Output boundary for enriched route records.
///
/// Implemented by the materialization adapters (file sinks, in-memory
/// collection); the use case stays independent of where rows end up.
#[async_trait]
pub trait EnrichedOutputPort: Send + Sync {
    async fn write_enriched_record(&self, record: &EnrichedRouteRecord) -> Result<()>;
}

// Shared sinks can be handed to a use case while the caller keeps a handle
// for flushing/inspection.
#[async_trait]
impl<T: EnrichedOutputPort + ?Sized> EnrichedOutputPort for std::sync::Arc<T> {
    async fn write_enriched_record(&self, record: &EnrichedRouteRecord) -> Result<()> {
        (**self).write_enriched_record(record).await
    }
}
