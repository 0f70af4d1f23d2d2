use crate::error::{EnricherError, Result};
use crate::pipeline::processing::enrich::{DistanceBands, LONG_HAUL_FROM_KM, SHORT_HAUL_BELOW_KM};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Filename prefix the upstream loader uses for staged route files
pub const INCOMING_FILE_PREFIX: &str = "routes_";

/// Pipeline configuration, loadable from a TOML file.
///
/// Every field has a default so a missing config file (or a partial one)
/// yields a fully usable configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory scanned for newly staged route files
    pub incoming_dir: String,
    /// Directory processed input files are archived into
    pub processed_dir: String,
    /// Directory enriched output files are written to
    pub output_dir: String,
    /// Filename prefix matched during incoming-directory discovery
    pub incoming_prefix: String,
    /// Upper bound (exclusive) of the short-haul band, km
    pub short_haul_below_km: f64,
    /// Lower bound (inclusive) of the long-haul band, km
    pub long_haul_from_km: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            incoming_dir: "data/incoming".to_string(),
            processed_dir: "data/processed".to_string(),
            output_dir: "output".to_string(),
            incoming_prefix: INCOMING_FILE_PREFIX.to_string(),
            short_haul_below_km: SHORT_HAUL_BELOW_KM,
            long_haul_from_km: LONG_HAUL_FROM_KM,
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            EnricherError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: PipelineConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// The haul thresholds as enricher configuration
    pub fn distance_bands(&self) -> DistanceBands {
        DistanceBands {
            short_haul_below_km: self.short_haul_below_km,
            long_haul_from_km: self.long_haul_from_km,
        }
    }
}
