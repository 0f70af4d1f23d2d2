use crate::domain::{
    BaseRouteRecord, DistanceCategory, EnrichedRouteRecord, FlightType, RouteType,
};

/// Distances below this are short-haul
pub const SHORT_HAUL_BELOW_KM: f64 = 1500.0;
/// Distances at or above this are long-haul
pub const LONG_HAUL_FROM_KM: f64 = 4000.0;

/// Separator used between the origin and destination regions in `region_pair`
const REGION_PAIR_SEPARATOR: &str = " to ";

/// Trait for enriching base route records with derived analytics columns.
///
/// Implementations must be pure: the output depends only on the single
/// input record, so callers are free to apply them to any number of
/// records in parallel.
pub trait RouteEnricher: Send + Sync {
    /// Derive the five analytics columns for one route record.
    ///
    /// Total by construction; unknown inputs map to defined fallback
    /// labels instead of errors.
    fn enrich(&self, record: &BaseRouteRecord) -> EnrichedRouteRecord;
}

/// Haul-length thresholds, in kilometers.
///
/// Each boundary belongs to the band it opens: exactly 1500 km is
/// medium-haul, exactly 4000 km is long-haul.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBands {
    pub short_haul_below_km: f64,
    pub long_haul_from_km: f64,
}

impl Default for DistanceBands {
    fn default() -> Self {
        Self {
            short_haul_below_km: SHORT_HAUL_BELOW_KM,
            long_haul_from_km: LONG_HAUL_FROM_KM,
        }
    }
}

/// Default enricher implementing the standard analytics derivation rules
pub struct DefaultRouteEnricher {
    pub bands: DistanceBands,
}

impl Default for DefaultRouteEnricher {
    fn default() -> Self {
        Self {
            bands: DistanceBands::default(),
        }
    }
}

impl DefaultRouteEnricher {
    /// Create an enricher with the standard haul thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an enricher with custom haul thresholds
    pub fn with_bands(bands: DistanceBands) -> Self {
        Self { bands }
    }

    /// Bucket a route by distance.
    ///
    /// Unknown distance is decided before any threshold comparison; a known
    /// distance always lands in one of the three bands. No floor is applied,
    /// so zero and negative distances classify as short-haul.
    fn classify_distance(&self, distance_km: Option<f64>) -> DistanceCategory {
        match distance_km {
            None => DistanceCategory::Unknown,
            Some(d) if d < self.bands.short_haul_below_km => DistanceCategory::ShortHaul,
            Some(d) if d < self.bands.long_haul_from_km => DistanceCategory::MediumHaul,
            Some(_) => DistanceCategory::LongHaul,
        }
    }

    /// Domestic only when both countries are known and byte-equal; an
    /// unknown country on either side classifies as international.
    fn classify_route_type(&self, record: &BaseRouteRecord) -> RouteType {
        match (&record.origin_country, &record.destination_country) {
            (Some(origin), Some(destination)) if origin == destination => RouteType::Domestic,
            _ => RouteType::International,
        }
    }

    /// Build the `"{origin_region} to {destination_region}"` label; an
    /// unknown region contributes an empty segment, the separator stays.
    fn build_region_pair(&self, record: &BaseRouteRecord) -> String {
        format!(
            "{}{}{}",
            record.origin_region.as_deref().unwrap_or(""),
            REGION_PAIR_SEPARATOR,
            record.destination_region.as_deref().unwrap_or(""),
        )
    }

    /// Direct only for exactly zero stops; unknown stop counts take the
    /// conservative label.
    fn classify_flight_type(&self, stops: Option<u32>) -> FlightType {
        match stops {
            Some(0) => FlightType::Direct,
            _ => FlightType::WithStops,
        }
    }

    /// Build the `"{origin}-{destination}"` identifier, airport codes verbatim
    fn build_route_id(&self, record: &BaseRouteRecord) -> String {
        format!("{}-{}", record.origin_airport, record.destination_airport)
    }
}

impl RouteEnricher for DefaultRouteEnricher {
    fn enrich(&self, record: &BaseRouteRecord) -> EnrichedRouteRecord {
        EnrichedRouteRecord {
            distance_category: self.classify_distance(record.distance_km),
            route_type: self.classify_route_type(record),
            region_pair: self.build_region_pair(record),
            flight_type: self.classify_flight_type(record.stops),
            route_id: self.build_route_id(record),
            route: record.clone(),
        }
    }
}

/// Enricher wrapper that records per-record metrics around an inner enricher
pub struct MetricsRouteEnricher<E> {
    inner: E,
}

impl<E: RouteEnricher> MetricsRouteEnricher<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: RouteEnricher> RouteEnricher for MetricsRouteEnricher<E> {
    fn enrich(&self, record: &BaseRouteRecord) -> EnrichedRouteRecord {
        let enriched = self.inner.enrich(record);
        crate::observability::metrics::enrich::record_enriched(
            enriched.distance_category.as_str(),
            enriched.route_type.as_str(),
        );
        enriched
    }
}
