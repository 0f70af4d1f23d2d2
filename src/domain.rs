use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized flight route row as staged by the upstream loader.
///
/// Country, region, distance and stop-count fields may be unknown; the
/// enrichment rules fall back to defined labels rather than failing.
/// Everything else is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRouteRecord {
    /// Origin airport code, passed through without normalization
    pub origin_airport: String,
    /// Destination airport code, passed through without normalization
    pub destination_airport: String,
    #[serde(default)]
    pub origin_country: Option<String>,
    #[serde(default)]
    pub destination_country: Option<String>,
    #[serde(default)]
    pub origin_region: Option<String>,
    #[serde(default)]
    pub destination_region: Option<String>,
    /// Great-circle distance in kilometers, unknown for some routes
    #[serde(default)]
    pub distance_km: Option<f64>,
    /// Number of intermediate stops; 0 means a direct flight
    #[serde(default)]
    pub stops: Option<u32>,
    #[serde(default)]
    pub aircraft_type: Option<String>,
    #[serde(default)]
    pub codeshare: Option<String>,
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub airline_code: Option<String>,
    #[serde(default)]
    pub airline_name: Option<String>,
    #[serde(default)]
    pub flight_date: Option<NaiveDate>,
    #[serde(default)]
    pub flight_year: Option<i32>,
    #[serde(default)]
    pub flight_month: Option<u8>,
    #[serde(default)]
    pub flight_quarter: Option<u8>,
}

/// A route row with the five derived analytics columns appended.
///
/// The base fields serialize first and unchanged; consumers that expect a
/// fixed schema get base columns in their original order followed by
/// `distance_category`, `route_type`, `region_pair`, `flight_type`,
/// `route_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRouteRecord {
    #[serde(flatten)]
    pub route: BaseRouteRecord,
    pub distance_category: DistanceCategory,
    pub route_type: RouteType,
    pub region_pair: String,
    pub flight_type: FlightType,
    pub route_id: String,
}

/// Haul-length bucket derived from `distance_km`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceCategory {
    #[serde(rename = "Short-haul")]
    ShortHaul,
    #[serde(rename = "Medium-haul")]
    MediumHaul,
    #[serde(rename = "Long-haul")]
    LongHaul,
    Unknown,
}

/// Whether origin and destination lie in the same country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteType {
    Domestic,
    International,
}

/// Direct vs. multi-stop classification derived from `stops`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightType {
    Direct,
    #[serde(rename = "With Stops")]
    WithStops,
}

impl DistanceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceCategory::ShortHaul => "Short-haul",
            DistanceCategory::MediumHaul => "Medium-haul",
            DistanceCategory::LongHaul => "Long-haul",
            DistanceCategory::Unknown => "Unknown",
        }
    }
}

impl RouteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::Domestic => "Domestic",
            RouteType::International => "International",
        }
    }
}

impl FlightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightType::Direct => "Direct",
            FlightType::WithStops => "With Stops",
        }
    }
}

impl fmt::Display for DistanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FlightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
