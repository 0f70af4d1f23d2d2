use anyhow::Result;
use async_trait::async_trait;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::app::ports::EnrichedOutputPort;
use crate::domain::EnrichedRouteRecord;

/// Column order of the enriched schema: base fields in their original
/// order, then the five derived columns. Documented here for consumers
/// that expect a fixed layout (the CSV sink emits exactly this header).
pub const ENRICHED_COLUMNS: [&str; 22] = [
    "origin_airport",
    "destination_airport",
    "origin_country",
    "destination_country",
    "origin_region",
    "destination_region",
    "distance_km",
    "stops",
    "aircraft_type",
    "codeshare",
    "flight_number",
    "airline_code",
    "airline_name",
    "flight_date",
    "flight_year",
    "flight_month",
    "flight_quarter",
    "distance_category",
    "route_type",
    "region_pair",
    "flight_type",
    "route_id",
];

/// Sink writing one enriched record per line as JSON
pub struct JsonlRouteSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonlRouteSink {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&self) -> std::io::Result<()> {
        self.writer.lock().unwrap().flush()
    }
}

#[async_trait]
impl EnrichedOutputPort for JsonlRouteSink {
    async fn write_enriched_record(&self, record: &EnrichedRouteRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        let mut writer = self.writer.lock().unwrap();
        writeln!(writer, "{}", line)?;
        Ok(())
    }
}

/// Sink writing enriched records as delimited rows with a header line
pub struct CsvRouteSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl CsvRouteSink {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", ENRICHED_COLUMNS.join(","))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flush(&self) -> std::io::Result<()> {
        self.writer.lock().unwrap().flush()
    }

    fn format_row(record: &EnrichedRouteRecord) -> String {
        let route = &record.route;
        let fields: [String; 22] = [
            route.origin_airport.clone(),
            route.destination_airport.clone(),
            route.origin_country.clone().unwrap_or_default(),
            route.destination_country.clone().unwrap_or_default(),
            route.origin_region.clone().unwrap_or_default(),
            route.destination_region.clone().unwrap_or_default(),
            route.distance_km.map(|d| d.to_string()).unwrap_or_default(),
            route.stops.map(|s| s.to_string()).unwrap_or_default(),
            route.aircraft_type.clone().unwrap_or_default(),
            route.codeshare.clone().unwrap_or_default(),
            route.flight_number.clone().unwrap_or_default(),
            route.airline_code.clone().unwrap_or_default(),
            route.airline_name.clone().unwrap_or_default(),
            route
                .flight_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            route
                .flight_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            route
                .flight_month
                .map(|m| m.to_string())
                .unwrap_or_default(),
            route
                .flight_quarter
                .map(|q| q.to_string())
                .unwrap_or_default(),
            record.distance_category.as_str().to_string(),
            record.route_type.as_str().to_string(),
            record.region_pair.clone(),
            record.flight_type.as_str().to_string(),
            record.route_id.clone(),
        ];

        fields
            .iter()
            .map(|field| escape_csv_field(field))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[async_trait]
impl EnrichedOutputPort for CsvRouteSink {
    async fn write_enriched_record(&self, record: &EnrichedRouteRecord) -> Result<()> {
        let row = Self::format_row(record);
        let mut writer = self.writer.lock().unwrap();
        writeln!(writer, "{}", row)?;
        Ok(())
    }
}

/// Quote a field when it contains a delimiter, quote, or line break;
/// embedded quotes are doubled.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// In-memory sink for development and testing
#[derive(Default)]
pub struct InMemoryRouteSink {
    records: Arc<Mutex<Vec<EnrichedRouteRecord>>>,
}

impl InMemoryRouteSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<EnrichedRouteRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnrichedOutputPort for InMemoryRouteSink {
    async fn write_enriched_record(&self, record: &EnrichedRouteRecord) -> Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BaseRouteRecord, DistanceCategory, FlightType, RouteType};
    use serde_json::json;
    use tempfile::tempdir;

    fn enriched_fixture() -> EnrichedRouteRecord {
        let route: BaseRouteRecord = serde_json::from_value(json!({
            "origin_airport": "LAX",
            "destination_airport": "SFO",
            "origin_country": "US",
            "destination_country": "US",
            "origin_region": "West",
            "destination_region": "West",
            "distance_km": 800.0,
            "stops": 0,
            "airline_name": "Acme, Inc. \"Air\""
        }))
        .unwrap();
        EnrichedRouteRecord {
            route,
            distance_category: DistanceCategory::ShortHaul,
            route_type: RouteType::Domestic,
            region_pair: "West to West".to_string(),
            flight_type: FlightType::Direct,
            route_id: "LAX-SFO".to_string(),
        }
    }

    #[tokio::test]
    async fn test_jsonl_sink_writes_one_object_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("enriched.jsonl");
        let sink = JsonlRouteSink::create(&path).unwrap();

        sink.write_enriched_record(&enriched_fixture()).await.unwrap();
        sink.write_enriched_record(&enriched_fixture()).await.unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let row: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(row["route_id"], "LAX-SFO");
        assert_eq!(row["flight_type"], "Direct");
    }

    #[tokio::test]
    async fn test_csv_sink_emits_header_and_quoted_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("enriched.csv");
        let sink = CsvRouteSink::create(&path).unwrap();

        sink.write_enriched_record(&enriched_fixture()).await.unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("origin_airport,destination_airport"));
        assert!(lines[0].ends_with("flight_type,route_id"));
        assert!(lines[1].contains("\"Acme, Inc. \"\"Air\"\"\""));
        assert!(lines[1].ends_with("Direct,LAX-SFO"));
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[tokio::test]
    async fn test_in_memory_sink_collects_records() {
        let sink = InMemoryRouteSink::new();
        sink.write_enriched_record(&enriched_fixture()).await.unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].route_id, "LAX-SFO");
    }
}
